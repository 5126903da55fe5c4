//! Quota checks exposed to request handlers.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use portalhub_core::result::AppResult;
use portalhub_core::types::{ResourceType, UserId};
use portalhub_entity::plan::Feature;
use portalhub_entity::quota::{
    FeatureDecision, QuotaDecision, QuotaLevel, ResourceStatus, UsageOverview,
};

use super::aggregator::UsageAggregator;
use super::evaluator::QuotaEvaluator;
use crate::plan::PlanCatalog;

/// Answers "may this user create one more X?" and related questions.
#[derive(Debug, Clone)]
pub struct QuotaService {
    /// Live usage.
    aggregator: Arc<UsageAggregator>,
    /// Classifier.
    evaluator: QuotaEvaluator,
    /// Plan limits and features.
    catalog: Arc<PlanCatalog>,
}

impl QuotaService {
    /// Creates a new quota service.
    pub fn new(aggregator: Arc<UsageAggregator>, catalog: Arc<PlanCatalog>) -> Self {
        Self {
            aggregator,
            evaluator: QuotaEvaluator::new(Arc::clone(&catalog)),
            catalog,
        }
    }

    /// Evaluate one resource against the user's plan.
    ///
    /// Fails with an aggregation error when usage cannot be measured; the
    /// caller must then refuse the action.
    pub async fn check_quota(
        &self,
        user_id: UserId,
        resource: ResourceType,
    ) -> AppResult<QuotaDecision> {
        let snapshot = self.aggregator.current_usage(user_id, resource).await?;
        let decision = self.evaluator.evaluate(&snapshot);
        log_decision(user_id, &decision);
        Ok(decision)
    }

    /// Evaluate every resource for a dashboard.
    ///
    /// The plan is resolved once. A resource whose usage cannot be read is
    /// reported as unknown instead of failing the whole overview.
    pub async fn usage_overview(&self, user_id: UserId) -> AppResult<UsageOverview> {
        let plan = self.aggregator.plan_for(user_id).await?;

        let checks = ResourceType::ALL.map(|resource| {
            let plan = &plan;
            async move {
                match self
                    .aggregator
                    .measure_against(user_id, resource, plan)
                    .await
                {
                    Ok(snapshot) => ResourceStatus::Known {
                        decision: self.evaluator.evaluate(&snapshot),
                    },
                    Err(e) => {
                        warn!(
                            user_id = %user_id,
                            resource = %resource,
                            error = %e,
                            "Usage unavailable for overview"
                        );
                        ResourceStatus::Unknown {
                            resource,
                            reason: e.message,
                        }
                    }
                }
            }
        });

        let resources = join_all(checks).await;
        Ok(UsageOverview { user_id, resources })
    }

    /// Whether the user's plan includes `feature`.
    pub async fn check_feature(
        &self,
        user_id: UserId,
        feature: Feature,
    ) -> AppResult<FeatureDecision> {
        let plan = self.aggregator.plan_for(user_id).await?;
        let enabled = plan.features.has(feature);

        debug!(user_id = %user_id, feature = %feature, plan = %plan.tier, enabled, "Feature checked");

        Ok(FeatureDecision {
            feature,
            plan: plan.tier,
            enabled,
            required_plan: if enabled {
                None
            } else {
                self.catalog.lowest_tier_with(feature)
            },
        })
    }
}

fn log_decision(user_id: UserId, decision: &QuotaDecision) {
    match decision.level {
        QuotaLevel::Normal | QuotaLevel::Warning => debug!(
            user_id = %user_id,
            resource = %decision.resource,
            level = %decision.level,
            current = decision.current,
            "Quota checked"
        ),
        QuotaLevel::Critical | QuotaLevel::Exceeded => info!(
            user_id = %user_id,
            resource = %decision.resource,
            plan = %decision.plan,
            level = %decision.level,
            current = decision.current,
            limit = ?decision.limit,
            can_proceed = decision.can_proceed,
            "Quota near or over limit"
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use async_trait::async_trait;

    use portalhub_core::error::{AppError, ErrorKind};
    use portalhub_core::traits::{PlanAssignments, UsageSource};
    use portalhub_core::types::{BillingMonth, MonthlyUsage};
    use portalhub_entity::plan::PlanTier;

    use super::*;

    #[derive(Debug)]
    struct StaticSource {
        counts: HashMap<ResourceType, u64>,
        broken: Option<ResourceType>,
    }

    #[async_trait]
    impl UsageSource for StaticSource {
        async fn measure(&self, _user_id: UserId, resource: ResourceType) -> AppResult<u64> {
            if self.broken == Some(resource) {
                return Err(AppError::database("relation \"files\" is locked"));
            }
            Ok(self.counts.get(&resource).copied().unwrap_or(0))
        }

        async fn monthly_usage(&self, _user_id: UserId, _month: BillingMonth) -> AppResult<MonthlyUsage> {
            Ok(MonthlyUsage::default())
        }
    }

    #[derive(Debug)]
    struct OnePlan(String);

    #[async_trait]
    impl PlanAssignments for OnePlan {
        async fn plan_for_user(&self, _user_id: UserId) -> AppResult<String> {
            Ok(self.0.clone())
        }

        async fn active_users(&self) -> AppResult<Vec<UserId>> {
            Ok(Vec::new())
        }
    }

    fn service(plan: &str, counts: &[(ResourceType, u64)], broken: Option<ResourceType>) -> QuotaService {
        let catalog = Arc::new(PlanCatalog::standard());
        let aggregator = UsageAggregator::new(
            Arc::new(StaticSource {
                counts: counts.iter().copied().collect(),
                broken,
            }),
            Arc::new(OnePlan(plan.to_string())),
            Arc::clone(&catalog),
            Duration::from_secs(1),
        );
        QuotaService::new(Arc::new(aggregator), catalog)
    }

    #[tokio::test]
    async fn test_check_quota_classifies_live_usage() {
        let svc = service("pro", &[(ResourceType::Portals, 9)], None);
        let decision = svc.check_quota(UserId::new(), ResourceType::Portals).await.unwrap();
        assert_eq!(decision.level, QuotaLevel::Critical);
        assert_eq!(decision.plan, PlanTier::Pro);
    }

    #[tokio::test]
    async fn test_check_quota_denies_when_usage_unreadable() {
        let svc = service("pro", &[], Some(ResourceType::Storage));
        let err = svc.check_quota(UserId::new(), ResourceType::Storage).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Aggregation);
    }

    #[tokio::test]
    async fn test_overview_marks_unreadable_resource_unknown() {
        let svc = service("free", &[(ResourceType::Portals, 1)], Some(ResourceType::Storage));
        let overview = svc.usage_overview(UserId::new()).await.unwrap();

        assert_eq!(overview.resources.len(), ResourceType::ALL.len());
        for status in &overview.resources {
            match status {
                ResourceStatus::Known { decision } => {
                    assert_ne!(decision.resource, ResourceType::Storage);
                    if decision.resource == ResourceType::Portals {
                        assert_eq!(decision.level, QuotaLevel::Exceeded);
                    }
                }
                ResourceStatus::Unknown { resource, .. } => {
                    assert_eq!(*resource, ResourceType::Storage);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_overview_fails_on_unknown_plan() {
        let svc = service("gold", &[], None);
        let err = svc.usage_overview(UserId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_check_feature_names_required_plan() {
        let svc = service("pro", &[], None);

        let branding = svc.check_feature(UserId::new(), Feature::CustomBranding).await.unwrap();
        assert!(branding.enabled);
        assert!(branding.required_plan.is_none());

        let sso = svc.check_feature(UserId::new(), Feature::Sso).await.unwrap();
        assert!(!sso.enabled);
        assert_eq!(sso.required_plan, Some(PlanTier::Enterprise));
    }
}
