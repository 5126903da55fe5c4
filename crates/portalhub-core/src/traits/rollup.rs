//! Rollup persistence trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{BillingMonth, UsageRollupRecord, UserId};

/// Storage for monthly usage rollups.
#[async_trait]
pub trait RollupStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert or overwrite the row for `(record.user_id, record.month)`.
    async fn upsert(&self, record: &UsageRollupRecord) -> AppResult<()>;

    /// Fetch the rollup for a user and month, if one has been computed.
    async fn find(&self, user_id: UserId, month: BillingMonth) -> AppResult<Option<UsageRollupRecord>>;
}
