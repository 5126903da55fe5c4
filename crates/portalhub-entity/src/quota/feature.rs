//! Feature gate decision.

use serde::{Deserialize, Serialize};

use crate::plan::{Feature, PlanTier};

/// Whether a plan feature is available to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDecision {
    /// The feature.
    pub feature: Feature,
    /// The user's plan.
    pub plan: PlanTier,
    /// Whether the plan includes the feature.
    pub enabled: bool,
    /// Lowest tier including the feature, when the current plan lacks it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_plan: Option<PlanTier>,
}
