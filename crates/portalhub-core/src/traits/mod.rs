//! Core traits defined in `portalhub-core` and implemented by other crates.
//!
//! The quota engine only talks to persistence, plan assignment and
//! notification delivery through these seams, so every collaborator can be
//! swapped for an in-memory fake in tests.

pub mod clock;
pub mod notification;
pub mod plan;
pub mod rollup;
pub mod usage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use notification::{NotificationLog, NotificationSender};
pub use plan::PlanAssignments;
pub use rollup::RollupStore;
pub use usage::UsageSource;
