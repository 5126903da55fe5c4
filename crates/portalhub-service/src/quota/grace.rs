//! Grace allowance once a ceiling is reached.
//!
//! Grace is recomputed from `(used, limit)` on every call. There is no
//! persisted counter to increment, so concurrent requests cannot corrupt it;
//! two requests racing at the boundary may both pass, and the next read
//! reflects the real overage.

use portalhub_entity::quota::GraceEvaluation;

/// Share of the limit tolerated as overage, in percent.
pub const GRACE_PERCENT: u64 = 10;

/// Stateless grace calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GracePeriodTracker;

impl GracePeriodTracker {
    /// Create a new tracker.
    pub fn new() -> Self {
        Self
    }

    /// Total tolerated overage: `max(ceil(limit * 10%), 1)`.
    pub fn grace_total(limit: u64) -> u64 {
        (limit / 100 * GRACE_PERCENT + (limit % 100 * GRACE_PERCENT).div_ceil(100)).max(1)
    }

    /// Grace state for an exceeded quota. `used` below `limit` is treated
    /// as zero overage.
    pub fn evaluate_grace(&self, used: u64, limit: u64) -> GraceEvaluation {
        let grace_total = Self::grace_total(limit);
        let overage = used.saturating_sub(limit);
        let grace_remaining = grace_total.saturating_sub(overage);
        let grace_used = grace_total - grace_remaining;

        GraceEvaluation {
            grace_total,
            grace_used,
            grace_remaining,
            can_proceed: grace_remaining > 0,
        }
    }
}
