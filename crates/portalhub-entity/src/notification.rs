//! In-app inbox entries.

use serde::Serialize;

use portalhub_core::types::{StorageWarning, UserId};

/// A row about to be written to `notifications`.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub user_id: UserId,
    /// Inbox grouping; every entry raised here is `"quota"`.
    pub category: &'static str,
    pub event_type: &'static str,
    pub title: String,
    pub message: String,
    /// The originating event, kept for clients that render their own text.
    pub payload: Option<serde_json::Value>,
    pub priority: &'static str,
}

impl NewNotification {
    pub fn storage_warning(warning: &StorageWarning) -> Self {
        Self {
            user_id: warning.user_id,
            category: "quota",
            event_type: "storage_warning",
            title: "Your storage is almost full".to_string(),
            message: format!(
                "You are using {:.0}% of the storage included in your {} plan. \
                 Free up space or upgrade to keep uploading.",
                warning.percentage, warning.plan
            ),
            payload: serde_json::to_value(warning).ok(),
            priority: "high",
        }
    }
}
