//! Immutable plan definitions: numeric ceilings and feature flags.

use serde::{Deserialize, Serialize};

use portalhub_core::types::ResourceType;

use super::feature::Feature;
use super::tier::PlanTier;

/// Sentinel ceiling meaning "no limit". Any limit at or above this value
/// is treated as unlimited and skips percentage logic entirely.
pub const UNLIMITED: u64 = 1 << 60;

/// Per-resource ceilings of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Maximum number of portals.
    pub portals: u64,
    /// Maximum stored bytes.
    pub storage_bytes: u64,
    /// Maximum number of team members.
    pub team_members: u64,
    /// Maximum number of custom domains.
    pub custom_domains: u64,
}

impl PlanLimits {
    /// Ceiling for the given resource.
    pub fn limit_for(&self, resource: ResourceType) -> u64 {
        match resource {
            ResourceType::Portals => self.portals,
            ResourceType::Storage => self.storage_bytes,
            ResourceType::TeamMembers => self.team_members,
            ResourceType::CustomDomains => self.custom_domains,
        }
    }

    /// Whether the given resource has no ceiling.
    pub fn is_unlimited(&self, resource: ResourceType) -> bool {
        is_unlimited(self.limit_for(resource))
    }
}

/// Feature flags of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanFeatures {
    /// White-labelled portals.
    pub white_label: bool,
    /// Single sign-on.
    pub sso: bool,
    /// Custom branding.
    pub custom_branding: bool,
    /// Priority support.
    pub priority_support: bool,
}

impl PlanFeatures {
    /// Whether the feature is enabled.
    pub fn has(&self, feature: Feature) -> bool {
        match feature {
            Feature::WhiteLabel => self.white_label,
            Feature::Sso => self.sso,
            Feature::CustomBranding => self.custom_branding,
            Feature::PrioritySupport => self.priority_support,
        }
    }
}

/// A plan tier with its ceilings and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDefinition {
    /// The tier.
    pub tier: PlanTier,
    /// Resource ceilings.
    pub limits: PlanLimits,
    /// Feature flags.
    pub features: PlanFeatures,
}

impl PlanDefinition {
    /// Ceiling for the given resource.
    pub fn limit_for(&self, resource: ResourceType) -> u64 {
        self.limits.limit_for(resource)
    }
}

/// Whether a raw limit value represents "no ceiling".
pub fn is_unlimited(limit: u64) -> bool {
    limit >= UNLIMITED
}
