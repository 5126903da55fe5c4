//! Usage repository: counts and byte sums over the portal/file tables.

use async_trait::async_trait;
use sqlx::PgPool;

use portalhub_core::error::{AppError, ErrorKind};
use portalhub_core::result::AppResult;
use portalhub_core::traits::UsageSource;
use portalhub_core::types::{BillingMonth, MonthlyUsage, ResourceType, UserId};

use super::to_u64;

/// Stored bytes of every live file the user owns, either directly or
/// through one of their portals. The join keeps a file counted once even
/// when both ownership paths match.
const STORAGE_BYTES_SQL: &str = "SELECT COALESCE(SUM(f.size_bytes), 0)::BIGINT \
     FROM files f \
     LEFT JOIN portals p ON p.id = f.portal_id AND p.deleted_at IS NULL \
     WHERE f.deleted_at IS NULL AND (f.owner_id = $1 OR p.owner_id = $1)";

/// Repository for usage measurements.
#[derive(Debug, Clone)]
pub struct UsageRepository {
    pool: PgPool,
}

impl UsageRepository {
    /// Create a new usage repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn scalar(&self, sql: &str, user_id: UserId, what: &str) -> AppResult<u64> {
        let value: i64 = sqlx::query_scalar(sql)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to measure {what}"), e)
            })?;
        Ok(to_u64(value))
    }

    async fn scalar_in_month(
        &self,
        sql: &str,
        user_id: UserId,
        month: BillingMonth,
        what: &str,
    ) -> AppResult<u64> {
        let value: i64 = sqlx::query_scalar(sql)
            .bind(user_id)
            .bind(month.starts_at())
            .bind(month.ends_at())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to aggregate {what} for {month}"),
                    e,
                )
            })?;
        Ok(to_u64(value))
    }
}

#[async_trait]
impl UsageSource for UsageRepository {
    async fn measure(&self, user_id: UserId, resource: ResourceType) -> AppResult<u64> {
        match resource {
            ResourceType::Portals => {
                self.scalar(
                    "SELECT COUNT(*) FROM portals WHERE owner_id = $1 AND deleted_at IS NULL",
                    user_id,
                    "portals",
                )
                .await
            }
            ResourceType::Storage => self.scalar(STORAGE_BYTES_SQL, user_id, "storage").await,
            ResourceType::TeamMembers => {
                self.scalar(
                    "SELECT COUNT(*) FROM team_members WHERE owner_id = $1",
                    user_id,
                    "team members",
                )
                .await
            }
            ResourceType::CustomDomains => {
                self.scalar(
                    "SELECT COUNT(*) FROM custom_domains WHERE owner_id = $1",
                    user_id,
                    "custom domains",
                )
                .await
            }
        }
    }

    async fn monthly_usage(&self, user_id: UserId, month: BillingMonth) -> AppResult<MonthlyUsage> {
        let storage_bytes = self.scalar(STORAGE_BYTES_SQL, user_id, "storage").await?;

        let portals_created = self
            .scalar_in_month(
                "SELECT COUNT(*) FROM portals \
                 WHERE owner_id = $1 AND created_at >= $2 AND created_at < $3",
                user_id,
                month,
                "portals created",
            )
            .await?;

        let files_uploaded = self
            .scalar_in_month(
                "SELECT COUNT(*) FROM files f \
                 LEFT JOIN portals p ON p.id = f.portal_id \
                 WHERE (f.owner_id = $1 OR p.owner_id = $1) \
                   AND f.created_at >= $2 AND f.created_at < $3",
                user_id,
                month,
                "files uploaded",
            )
            .await?;

        let bandwidth_bytes = self
            .scalar_in_month(
                "SELECT COALESCE(SUM(bytes), 0)::BIGINT FROM bandwidth_events \
                 WHERE user_id = $1 AND occurred_at >= $2 AND occurred_at < $3",
                user_id,
                month,
                "bandwidth",
            )
            .await?;

        Ok(MonthlyUsage {
            storage_bytes,
            portals_created,
            files_uploaded,
            bandwidth_bytes,
        })
    }
}
