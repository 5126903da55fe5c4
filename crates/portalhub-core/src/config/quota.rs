//! Quota evaluation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for live quota checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Upper bound for a single usage query, in milliseconds. A query that
    /// runs longer fails the check closed.
    #[serde(default = "default_aggregation_timeout")]
    pub aggregation_timeout_ms: u64,
}

impl QuotaConfig {
    /// The aggregation timeout as a [`Duration`].
    pub fn aggregation_timeout(&self) -> Duration {
        Duration::from_millis(self.aggregation_timeout_ms)
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            aggregation_timeout_ms: default_aggregation_timeout(),
        }
    }
}

fn default_aggregation_timeout() -> u64 {
    2_000
}
