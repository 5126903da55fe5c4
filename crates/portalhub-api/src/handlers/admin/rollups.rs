//! Manual usage rollup trigger.

use axum::Json;
use axum::extract::State;

use portalhub_core::error::AppError;
use portalhub_worker::RollupReport;

use crate::dto::response::ApiResponse;
use crate::state::AppState;

/// POST /api/admin/rollups/run
///
/// Runs the rollup inline and returns its report. Answers 409 while another
/// run (scheduled or manual) is in progress.
pub async fn run_rollup(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RollupReport>>, AppError> {
    tracing::info!("Manual usage rollup requested");
    let report = state.rollup_job.run().await?;
    Ok(Json(ApiResponse::ok(report)))
}
