//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Usage rollup worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduled rollup is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds) for the daily rollup.
    #[serde(default = "default_rollup_schedule")]
    pub rollup_schedule: String,
    /// Number of users processed concurrently within one run.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Run one rollup immediately after startup.
    #[serde(default)]
    pub run_on_startup: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            rollup_schedule: default_rollup_schedule(),
            concurrency: default_concurrency(),
            run_on_startup: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_rollup_schedule() -> String {
    "0 0 2 * * *".to_string()
}

fn default_concurrency() -> usize {
    4
}
