//! Live usage aggregation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use portalhub_core::error::{AppError, ErrorKind};
use portalhub_core::result::AppResult;
use portalhub_core::traits::{PlanAssignments, UsageSource};
use portalhub_core::types::{BillingMonth, MonthlyUsage, ResourceType, UserId};
use portalhub_entity::plan::{PlanDefinition, is_unlimited};
use portalhub_entity::quota::ResourceUsageSnapshot;

use crate::plan::PlanCatalog;

/// Measures what a user currently consumes.
///
/// Every call goes to the usage source; nothing is cached between checks.
/// A source that fails or does not answer within the configured timeout
/// yields an aggregation error. Zero is never substituted for an unknown
/// count.
#[derive(Debug, Clone)]
pub struct UsageAggregator {
    source: Arc<dyn UsageSource>,
    plans: Arc<dyn PlanAssignments>,
    catalog: Arc<PlanCatalog>,
    timeout: Duration,
}

impl UsageAggregator {
    pub fn new(
        source: Arc<dyn UsageSource>,
        plans: Arc<dyn PlanAssignments>,
        catalog: Arc<PlanCatalog>,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            plans,
            catalog,
            timeout,
        }
    }

    /// Resolve the plan definition a user is subscribed to.
    ///
    /// A missing user surfaces as not-found and an unknown plan identifier
    /// as a configuration error. A failing assignment store is an
    /// aggregation error like any other unreadable input.
    pub async fn plan_for(&self, user_id: UserId) -> AppResult<PlanDefinition> {
        let plan_id = self
            .bounded("plan assignment", self.plans.plan_for_user(user_id))
            .await?;
        self.catalog.resolve(&plan_id).copied()
    }

    /// Live snapshot of one resource for one user.
    pub async fn current_usage(
        &self,
        user_id: UserId,
        resource: ResourceType,
    ) -> AppResult<ResourceUsageSnapshot> {
        let plan = self.plan_for(user_id).await?;
        self.measure_against(user_id, resource, &plan).await
    }

    /// Snapshot of one resource against an already resolved plan.
    pub async fn measure_against(
        &self,
        user_id: UserId,
        resource: ResourceType,
        plan: &PlanDefinition,
    ) -> AppResult<ResourceUsageSnapshot> {
        let used = self
            .bounded(resource.as_str(), self.source.measure(user_id, resource))
            .await?;
        let limit = plan.limit_for(resource);

        Ok(ResourceUsageSnapshot {
            user_id,
            resource,
            plan: plan.tier,
            used,
            limit,
            is_unlimited: is_unlimited(limit),
        })
    }

    /// Activity for one user over `month`, used by the rollup job.
    pub async fn monthly_usage(
        &self,
        user_id: UserId,
        month: BillingMonth,
    ) -> AppResult<MonthlyUsage> {
        self.bounded("monthly usage", self.source.monthly_usage(user_id, month))
            .await
    }

    async fn bounded<T>(
        &self,
        what: &str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(into_aggregation(what, err)),
            Err(_) => {
                warn!(
                    source = what,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Usage source timed out"
                );
                Err(AppError::aggregation(format!(
                    "Timed out after {}ms reading {what}",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

/// Wrap a source failure as an aggregation error, keeping the kinds callers
/// act on differently.
fn into_aggregation(what: &str, err: AppError) -> AppError {
    match err.kind {
        ErrorKind::NotFound
        | ErrorKind::Configuration
        | ErrorKind::Validation
        | ErrorKind::Aggregation => err,
        _ => {
            warn!(source = what, error = %err, "Usage source failed");
            AppError::with_source(
                ErrorKind::Aggregation,
                format!("Failed to read {what}"),
                err,
            )
        }
    }
}
