//! Application builder: wires router, middleware and state into an Axum app.

use std::future::Future;

use axum::Router;
use tower_http::trace::TraceLayer;

use portalhub_core::config::ServerConfig;
use portalhub_core::error::AppError;
use portalhub_core::result::AppResult;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until `shutdown` resolves.
pub async fn serve(
    state: AppState,
    server: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> AppResult<()> {
    let app = build_app(state);
    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("PortalHub quota API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
