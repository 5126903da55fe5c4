//! Grace allowance for exceeded quotas.

use serde::{Deserialize, Serialize};

/// Outcome of a grace computation for an exceeded quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraceEvaluation {
    /// Overage tolerated beyond the limit.
    pub grace_total: u64,
    /// Part of the tolerance already consumed.
    pub grace_used: u64,
    /// Tolerance left.
    pub grace_remaining: u64,
    /// Whether one more action is still tolerated.
    pub can_proceed: bool,
}
