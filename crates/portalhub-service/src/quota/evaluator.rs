//! Pure quota classifier.
//!
//! Maps `(used, limit)` onto a [`QuotaLevel`] and an allow/deny decision.
//! Nothing is remembered between calls: every evaluation starts fresh.

use std::sync::Arc;

use portalhub_core::types::ResourceType;
use portalhub_entity::plan::PlanTier;
use portalhub_entity::quota::{QuotaDecision, QuotaLevel, ResourceUsageSnapshot, UpgradeRecommendation};

use super::grace::GracePeriodTracker;
use crate::plan::PlanCatalog;

/// Percentage at which `warning` starts.
pub const WARNING_PERCENT: u64 = 80;
/// Percentage at which `critical` starts.
pub const CRITICAL_PERCENT: u64 = 90;
/// Percentage at which `exceeded` starts.
pub const EXCEEDED_PERCENT: u64 = 100;

/// Classifies usage snapshots into quota decisions.
#[derive(Debug, Clone)]
pub struct QuotaEvaluator {
    catalog: Arc<PlanCatalog>,
    grace: GracePeriodTracker,
}

impl QuotaEvaluator {
    /// Create an evaluator recommending upgrades from `catalog`.
    pub fn new(catalog: Arc<PlanCatalog>) -> Self {
        Self {
            catalog,
            grace: GracePeriodTracker::new(),
        }
    }

    /// Level for a finite ceiling.
    ///
    /// Thresholds are compared with integer cross-multiplication, so a value
    /// never lands on the wrong side of a boundary through float rounding.
    /// A zero ceiling is `exceeded` as soon as anything is used.
    pub fn classify(used: u64, limit: u64) -> QuotaLevel {
        if limit == 0 {
            return if used == 0 {
                QuotaLevel::Normal
            } else {
                QuotaLevel::Exceeded
            };
        }

        let scaled = u128::from(used) * 100;
        let limit = u128::from(limit);

        if scaled >= u128::from(EXCEEDED_PERCENT) * limit {
            QuotaLevel::Exceeded
        } else if scaled >= u128::from(CRITICAL_PERCENT) * limit {
            QuotaLevel::Critical
        } else if scaled >= u128::from(WARNING_PERCENT) * limit {
            QuotaLevel::Warning
        } else {
            QuotaLevel::Normal
        }
    }

    /// `100 * used / limit` for a finite ceiling, truncated to hundredths of
    /// a percent; a zero ceiling reads as 0% when unused and 100% otherwise.
    ///
    /// The quotient is taken in integers so the reported value never reaches
    /// a threshold that [`classify`](Self::classify) did not.
    pub fn percentage(used: u64, limit: u64) -> f64 {
        if limit == 0 {
            return if used == 0 { 0.0 } else { 100.0 };
        }
        let hundredths = u128::from(used) * 10_000 / u128::from(limit);
        hundredths as f64 / 100.0
    }

    /// Evaluate a live snapshot.
    pub fn evaluate(&self, snapshot: &ResourceUsageSnapshot) -> QuotaDecision {
        if snapshot.is_unlimited {
            return QuotaDecision {
                resource: snapshot.resource,
                plan: snapshot.plan,
                allowed: true,
                level: QuotaLevel::Normal,
                current: snapshot.used,
                limit: None,
                percentage: None,
                can_proceed: true,
                requires_upgrade: false,
                grace: None,
                recommendation: None,
            };
        }

        let (used, limit) = (snapshot.used, snapshot.limit);
        let level = Self::classify(used, limit);
        let percentage = Self::percentage(used, limit);

        let (can_proceed, requires_upgrade, grace) = match level {
            QuotaLevel::Normal | QuotaLevel::Warning => (true, false, None),
            QuotaLevel::Critical => (true, true, None),
            QuotaLevel::Exceeded => {
                let grace = self.grace.evaluate_grace(used, limit);
                (grace.can_proceed, true, Some(grace))
            }
        };

        let recommendation = if requires_upgrade {
            self.recommend(snapshot.plan, snapshot.resource, percentage)
        } else {
            None
        };

        QuotaDecision {
            resource: snapshot.resource,
            plan: snapshot.plan,
            allowed: level < QuotaLevel::Exceeded,
            level,
            current: used,
            limit: Some(limit),
            percentage: Some(percentage),
            can_proceed,
            requires_upgrade,
            grace,
            recommendation,
        }
    }

    fn recommend(
        &self,
        plan: PlanTier,
        resource: ResourceType,
        percentage: f64,
    ) -> Option<UpgradeRecommendation> {
        let target = self.catalog.next_tier_for(plan);
        if target == plan {
            return None;
        }

        let target_limits = self.catalog.limits_for(target).limits;
        let target_limit = (!target_limits.is_unlimited(resource))
            .then(|| target_limits.limit_for(resource));

        let offer = match target_limit {
            Some(limit) => format!("up to {}", describe_amount(resource, limit)),
            None => "unlimited".to_string(),
        };

        Some(UpgradeRecommendation {
            target_plan: target,
            target_limit,
            message: format!(
                "You have used {:.0}% of the {} included in the {} plan. \
                 Upgrade to {} for {} {}.",
                percentage,
                describe_resource(resource),
                plan.display_name(),
                target.display_name(),
                offer,
                describe_resource(resource),
            ),
        })
    }
}

fn describe_resource(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Portals => "portals",
        ResourceType::Storage => "storage",
        ResourceType::TeamMembers => "team members",
        ResourceType::CustomDomains => "custom domains",
    }
}

fn describe_amount(resource: ResourceType, amount: u64) -> String {
    const GIB: u64 = 1024 * 1024 * 1024;
    match resource {
        ResourceType::Storage if amount >= GIB => format!("{} GB", amount / GIB),
        ResourceType::Storage => format!("{amount} bytes"),
        _ => amount.to_string(),
    }
}
