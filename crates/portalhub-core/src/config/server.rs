//! HTTP listener settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// `[server]` section. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long shutdown waits for in-flight background work.
    pub shutdown_grace_seconds: u64,
}

impl ServerConfig {
    /// `host:port` string passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_grace_seconds: 30,
        }
    }
}
