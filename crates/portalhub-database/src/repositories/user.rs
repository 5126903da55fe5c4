//! Plan assignment repository over the `users` table.

use async_trait::async_trait;
use sqlx::PgPool;

use portalhub_core::error::{AppError, ErrorKind};
use portalhub_core::result::AppResult;
use portalhub_core::traits::PlanAssignments;
use portalhub_core::types::UserId;

/// Repository resolving which plan each user is on.
#[derive(Debug, Clone)]
pub struct UserPlanRepository {
    pool: PgPool,
}

impl UserPlanRepository {
    /// Create a new user plan repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanAssignments for UserPlanRepository {
    async fn plan_for_user(&self, user_id: UserId) -> AppResult<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT plan FROM users WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up user plan", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    async fn active_users(&self) -> AppResult<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>(
            "SELECT id FROM users WHERE deleted_at IS NULL ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list active users", e))
    }
}
