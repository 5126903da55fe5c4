//! Threshold-driven quota notifications.

pub mod dispatcher;

pub use dispatcher::{DispatchOutcome, NotificationDispatcher, STORAGE_WARNING_PERCENT};
