//! Usage source trait: the persisted counts the quota engine measures.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{BillingMonth, MonthlyUsage, ResourceType, UserId};

/// Source of truth for resource consumption.
///
/// Implementations must return an error when the backing store is
/// unavailable. Returning zero on failure would let every quota check pass.
#[async_trait]
pub trait UsageSource: Send + Sync + std::fmt::Debug + 'static {
    /// Current consumption of `resource` by `user_id`: a row count for
    /// portals, team members and custom domains, a byte sum for storage.
    async fn measure(&self, user_id: UserId, resource: ResourceType) -> AppResult<u64>;

    /// Activity aggregated over one calendar month.
    async fn monthly_usage(&self, user_id: UserId, month: BillingMonth) -> AppResult<MonthlyUsage>;
}
