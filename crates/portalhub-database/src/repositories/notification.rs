//! Notification repository: in-app delivery and re-send suppression marks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use portalhub_core::error::{AppError, ErrorKind};
use portalhub_core::result::AppResult;
use portalhub_core::traits::{NotificationLog, NotificationSender};
use portalhub_core::types::{AlertKind, NotificationId, StorageWarning, UserId};
use portalhub_entity::notification::NewNotification;

/// Repository for notifications and alert marks.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an inbox entry and return its id.
    pub async fn create(&self, entry: &NewNotification) -> AppResult<NotificationId> {
        sqlx::query_scalar::<_, NotificationId>(
            "INSERT INTO notifications (id, user_id, category, event_type, title, message, payload, priority) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING id",
        )
        .bind(NotificationId::new())
        .bind(entry.user_id)
        .bind(entry.category)
        .bind(entry.event_type)
        .bind(&entry.title)
        .bind(&entry.message)
        .bind(&entry.payload)
        .bind(entry.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create notification", e))
    }
}

#[async_trait]
impl NotificationSender for NotificationRepository {
    async fn send_storage_warning(&self, warning: &StorageWarning) -> AppResult<()> {
        let notification_id = self.create(&NewNotification::storage_warning(warning)).await?;
        tracing::info!(
            user_id = %warning.user_id,
            notification_id = %notification_id,
            percentage = warning.percentage,
            "Storage warning delivered"
        );
        Ok(())
    }
}

#[async_trait]
impl NotificationLog for NotificationRepository {
    async fn last_notified(&self, user_id: UserId, kind: AlertKind) -> AppResult<Option<DateTime<Utc>>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT last_sent_at FROM quota_alert_marks WHERE user_id = $1 AND kind = $2",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read alert mark", e))
    }

    async fn mark_notified(&self, user_id: UserId, kind: AlertKind, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO quota_alert_marks (user_id, kind, last_sent_at) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, kind) DO UPDATE SET last_sent_at = EXCLUDED.last_sent_at",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write alert mark", e))?;
        Ok(())
    }
}
