//! Quota decision returned to callers.

use serde::{Deserialize, Serialize};

use portalhub_core::types::ResourceType;

use super::grace::GraceEvaluation;
use super::level::QuotaLevel;
use crate::plan::PlanTier;

/// Suggested upgrade attached to decisions that require one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeRecommendation {
    /// Tier to upgrade to.
    pub target_plan: PlanTier,
    /// Ceiling the target tier offers for the same resource (`None` = unlimited).
    pub target_limit: Option<u64>,
    /// Human-readable prompt.
    pub message: String,
}

/// The result of a quota check.
///
/// `allowed` reports whether usage is within the plan ceiling; callers
/// gate the action on `can_proceed`, which additionally honours the grace
/// allowance once the ceiling is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaDecision {
    /// Evaluated resource.
    pub resource: ResourceType,
    /// The user's plan.
    pub plan: PlanTier,
    /// Usage is below the ceiling.
    pub allowed: bool,
    /// Classification.
    pub level: QuotaLevel,
    /// Current consumption.
    pub current: u64,
    /// Ceiling, `None` when unlimited.
    pub limit: Option<u64>,
    /// `100 * current / limit`, `None` when unlimited.
    pub percentage: Option<f64>,
    /// Whether the caller may perform the action.
    pub can_proceed: bool,
    /// Whether the user should be prompted to upgrade.
    pub requires_upgrade: bool,
    /// Grace state, present only when exceeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace: Option<GraceEvaluation>,
    /// Upgrade suggestion, present when an upgrade is required and a
    /// higher tier exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<UpgradeRecommendation>,
}

impl QuotaDecision {
    /// Whether the resource has no ceiling.
    pub fn is_unlimited(&self) -> bool {
        self.limit.is_none()
    }
}
