//! Notification value types shared with delivery backends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;
use crate::types::usage::BillingMonth;

/// Kind of quota alert, used as the suppression key for re-sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Stored bytes reached the warning threshold of the plan.
    StorageWarning,
}

impl AlertKind {
    /// Return the alert kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StorageWarning => "storage_warning",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload for a "storage almost full" warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageWarning {
    /// Recipient.
    pub user_id: UserId,
    /// Plan identifier the limit comes from.
    pub plan: String,
    /// Month of the rollup that triggered the warning.
    pub month: BillingMonth,
    /// Stored bytes.
    pub used_bytes: u64,
    /// Plan storage ceiling in bytes.
    pub limit_bytes: u64,
    /// `100 * used / limit`.
    pub percentage: f64,
}
