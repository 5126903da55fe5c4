//! Usage rollup repository.

use async_trait::async_trait;
use sqlx::PgPool;

use portalhub_core::error::{AppError, ErrorKind};
use portalhub_core::result::AppResult;
use portalhub_core::traits::RollupStore;
use portalhub_core::types::{BillingMonth, UsageRollupRecord, UserId};

/// Repository for `usage_rollups` rows.
#[derive(Debug, Clone)]
pub struct RollupRepository {
    pool: PgPool,
}

impl RollupRepository {
    /// Create a new rollup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RollupStore for RollupRepository {
    async fn upsert(&self, record: &UsageRollupRecord) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO usage_rollups \
                 (user_id, month, storage_bytes, portals_created, files_uploaded, bandwidth_bytes, computed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id, month) DO UPDATE SET \
                 storage_bytes = EXCLUDED.storage_bytes, \
                 portals_created = EXCLUDED.portals_created, \
                 files_uploaded = EXCLUDED.files_uploaded, \
                 bandwidth_bytes = EXCLUDED.bandwidth_bytes, \
                 computed_at = EXCLUDED.computed_at",
        )
        .bind(record.user_id)
        .bind(record.month)
        .bind(record.storage_bytes)
        .bind(record.portals_created)
        .bind(record.files_uploaded)
        .bind(record.bandwidth_bytes)
        .bind(record.computed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert usage rollup", e))?;
        Ok(())
    }

    async fn find(&self, user_id: UserId, month: BillingMonth) -> AppResult<Option<UsageRollupRecord>> {
        sqlx::query_as::<_, UsageRollupRecord>(
            "SELECT * FROM usage_rollups WHERE user_id = $1 AND month = $2",
        )
        .bind(user_id)
        .bind(month.first_day())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find usage rollup", e))
    }
}
