//! Dashboard usage overview.

use serde::{Deserialize, Serialize};

use portalhub_core::types::{ResourceType, UserId};

use super::decision::QuotaDecision;

/// Quota state of one resource on the dashboard.
///
/// The overview is a non-critical read, so a failed measurement degrades
/// to `Unknown` instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Usage was measured.
    Known {
        /// The evaluated decision.
        decision: QuotaDecision,
    },
    /// Usage could not be measured.
    Unknown {
        /// The resource.
        resource: ResourceType,
        /// Why it is unknown.
        reason: String,
    },
}

/// Usage of every resource for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageOverview {
    /// The user.
    pub user_id: UserId,
    /// One entry per resource type.
    pub resources: Vec<ResourceStatus>,
}
