//! Response envelopes.

use serde::Serialize;

/// `{"success": true, "data": ...}` wrapper for every 2xx body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// The daily rollup is registered with the cron scheduler.
    pub rollups_scheduled: bool,
}
