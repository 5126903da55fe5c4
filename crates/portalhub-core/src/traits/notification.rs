//! Notification delivery and suppression traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::{AlertKind, StorageWarning, UserId};

/// Delivers user-facing quota warnings (email, in-app, ...).
#[async_trait]
pub trait NotificationSender: Send + Sync + std::fmt::Debug + 'static {
    /// Send a "storage almost full" warning.
    async fn send_storage_warning(&self, warning: &StorageWarning) -> AppResult<()>;
}

/// Remembers when each alert kind was last sent to a user.
#[async_trait]
pub trait NotificationLog: Send + Sync + std::fmt::Debug + 'static {
    /// When `kind` was last sent to `user_id`, if ever.
    async fn last_notified(&self, user_id: UserId, kind: AlertKind) -> AppResult<Option<DateTime<Utc>>>;

    /// Record that `kind` was sent to `user_id` at `at`.
    async fn mark_notified(&self, user_id: UserId, kind: AlertKind, at: DateTime<Utc>) -> AppResult<()>;
}
