//! Plan catalog: immutable limits and feature flags per tier.

use portalhub_core::error::AppError;
use portalhub_core::result::AppResult;
use portalhub_core::types::ResourceType;
use portalhub_entity::plan::{Feature, PlanDefinition, PlanFeatures, PlanLimits, PlanTier, UNLIMITED};

const GIB: u64 = 1024 * 1024 * 1024;

/// Lookup of plan definitions, loaded once at startup.
///
/// Unknown plan identifiers fail fast with a configuration error; they are
/// never mapped onto the free tier.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    /// One definition per tier, in [`PlanTier::ALL`] order.
    definitions: [PlanDefinition; 4],
}

impl PlanCatalog {
    /// The catalog of plans currently sold.
    pub fn standard() -> Self {
        Self {
            definitions: [
                PlanDefinition {
                    tier: PlanTier::Free,
                    limits: PlanLimits {
                        portals: 1,
                        storage_bytes: GIB,
                        team_members: 1,
                        custom_domains: 0,
                    },
                    features: PlanFeatures::default(),
                },
                PlanDefinition {
                    tier: PlanTier::Pro,
                    limits: PlanLimits {
                        portals: 10,
                        storage_bytes: 50 * GIB,
                        team_members: 3,
                        custom_domains: 1,
                    },
                    features: PlanFeatures {
                        custom_branding: true,
                        ..PlanFeatures::default()
                    },
                },
                PlanDefinition {
                    tier: PlanTier::Team,
                    limits: PlanLimits {
                        portals: 50,
                        storage_bytes: 500 * GIB,
                        team_members: 25,
                        custom_domains: 5,
                    },
                    features: PlanFeatures {
                        white_label: true,
                        sso: false,
                        custom_branding: true,
                        priority_support: true,
                    },
                },
                PlanDefinition {
                    tier: PlanTier::Enterprise,
                    limits: PlanLimits {
                        portals: UNLIMITED,
                        storage_bytes: UNLIMITED,
                        team_members: UNLIMITED,
                        custom_domains: UNLIMITED,
                    },
                    features: PlanFeatures {
                        white_label: true,
                        sso: true,
                        custom_branding: true,
                        priority_support: true,
                    },
                },
            ],
        }
    }

    /// Build a catalog from explicit definitions (one per tier, any order).
    pub fn from_definitions(definitions: [PlanDefinition; 4]) -> AppResult<Self> {
        let mut ordered = definitions;
        ordered.sort_by_key(|d| d.tier);

        for (definition, tier) in ordered.iter().zip(PlanTier::ALL) {
            if definition.tier != tier {
                return Err(AppError::configuration(format!(
                    "Plan catalog must define each tier exactly once (missing '{tier}')"
                )));
            }
        }

        let catalog = Self {
            definitions: ordered,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Definition for a tier.
    pub fn limits_for(&self, tier: PlanTier) -> &PlanDefinition {
        &self.definitions[tier as usize]
    }

    /// Resolve a raw plan identifier, failing fast on unknown values.
    pub fn resolve(&self, plan_id: &str) -> AppResult<&PlanDefinition> {
        let tier: PlanTier = plan_id.parse()?;
        Ok(self.limits_for(tier))
    }

    /// Tier to recommend when `tier` runs out of room. The top tier maps
    /// to itself.
    pub fn next_tier_for(&self, tier: PlanTier) -> PlanTier {
        tier.next()
    }

    /// Lowest tier that includes `feature`, if any.
    pub fn lowest_tier_with(&self, feature: Feature) -> Option<PlanTier> {
        self.definitions
            .iter()
            .find(|d| d.features.has(feature))
            .map(|d| d.tier)
    }

    /// Check that every limit is non-decreasing from one tier to the next.
    pub fn validate(&self) -> AppResult<()> {
        for pair in self.definitions.windows(2) {
            let (lower, higher) = (&pair[0], &pair[1]);
            for resource in ResourceType::ALL {
                if lower.limit_for(resource) > higher.limit_for(resource) {
                    return Err(AppError::configuration(format!(
                        "Plan '{}' has a lower {} limit than '{}'",
                        higher.tier, resource, lower.tier
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
