//! Route definitions for the PortalHub quota API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(quota_routes())
        .merge(admin_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Quota checks, overview and feature gates
fn quota_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/{user_id}/quota",
            get(handlers::quota::usage_overview),
        )
        .route(
            "/users/{user_id}/quota/{resource}",
            get(handlers::quota::check_quota),
        )
        .route(
            "/users/{user_id}/features/{feature}",
            get(handlers::quota::check_feature),
        )
}

/// Operator endpoints
fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/rollups/run",
        post(handlers::admin::rollups::run_rollup),
    )
}
