//! Live usage snapshot.

use serde::{Deserialize, Serialize};

use portalhub_core::types::{ResourceType, UserId};

use crate::plan::PlanTier;

/// Current consumption of one resource by one user, with the ceiling of
/// the user's plan. Recomputed from source counts on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsageSnapshot {
    /// The user.
    pub user_id: UserId,
    /// The measured resource.
    pub resource: ResourceType,
    /// Plan the limit comes from.
    pub plan: PlanTier,
    /// Current consumption.
    pub used: u64,
    /// Plan ceiling (raw, may be the unlimited sentinel).
    pub limit: u64,
    /// Whether the ceiling is the unlimited sentinel.
    pub is_unlimited: bool,
}
