//! Quota and feature gate handlers.

use axum::Json;
use axum::extract::{Path, State};

use portalhub_core::error::AppError;
use portalhub_core::types::{ResourceType, UserId};
use portalhub_entity::plan::Feature;
use portalhub_entity::quota::{FeatureDecision, QuotaDecision, UsageOverview};

use crate::dto::response::ApiResponse;
use crate::state::AppState;

/// GET /api/users/{user_id}/quota/{resource}
///
/// An exceeded quota is a 200 with `can_proceed = false`; only unreadable
/// usage is an error.
pub async fn check_quota(
    State(state): State<AppState>,
    Path((user_id, resource)): Path<(String, String)>,
) -> Result<Json<ApiResponse<QuotaDecision>>, AppError> {
    let user_id: UserId = user_id.parse()?;
    let resource: ResourceType = resource.parse()?;

    let decision = state.quota_service.check_quota(user_id, resource).await?;
    Ok(Json(ApiResponse::ok(decision)))
}

/// GET /api/users/{user_id}/quota
pub async fn usage_overview(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UsageOverview>>, AppError> {
    let user_id: UserId = user_id.parse()?;
    let overview = state.quota_service.usage_overview(user_id).await?;
    Ok(Json(ApiResponse::ok(overview)))
}

/// GET /api/users/{user_id}/features/{feature}
pub async fn check_feature(
    State(state): State<AppState>,
    Path((user_id, feature)): Path<(String, String)>,
) -> Result<Json<ApiResponse<FeatureDecision>>, AppError> {
    let user_id: UserId = user_id.parse()?;
    let feature: Feature = feature.parse()?;

    let decision = state.quota_service.check_feature(user_id, feature).await?;
    Ok(Json(ApiResponse::ok(decision)))
}
