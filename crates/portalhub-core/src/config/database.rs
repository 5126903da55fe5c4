//! PostgreSQL settings.

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_MIN_CONNECTIONS: u32 = 5;

/// `[database]` section. Only `url` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "DatabaseConfig::default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a free pooled connection.
    #[serde(default = "DatabaseConfig::default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "DatabaseConfig::default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Apply `migrations/` on startup.
    #[serde(default = "DatabaseConfig::default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    fn default_max_connections() -> u32 {
        DEFAULT_MAX_CONNECTIONS
    }

    fn default_min_connections() -> u32 {
        DEFAULT_MIN_CONNECTIONS
    }

    fn default_connect_timeout() -> u64 {
        10
    }

    fn default_idle_timeout() -> u64 {
        300
    }

    fn default_run_migrations() -> bool {
        true
    }
}
