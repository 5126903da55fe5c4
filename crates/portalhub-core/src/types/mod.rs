//! Core type definitions used across the PortalHub workspace.

pub mod id;
pub mod notification;
pub mod resource;
pub mod usage;

pub use id::*;
pub use notification::{AlertKind, StorageWarning};
pub use resource::ResourceType;
pub use usage::{BillingMonth, MonthlyUsage, UsageRollupRecord};
