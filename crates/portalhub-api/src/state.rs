//! Application state shared across all handlers.

use std::sync::Arc;

use portalhub_core::config::AppConfig;
use portalhub_service::QuotaService;
use portalhub_worker::UsageRollupJob;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Quota checks, overview and feature gates
    pub quota_service: Arc<QuotaService>,
    /// On-demand usage rollup
    pub rollup_job: Arc<UsageRollupJob>,
}
