//! Background work for the PortalHub quota engine.
//!
//! This crate provides:
//! - The usage rollup job, runnable on demand or on a schedule
//! - A cron scheduler that triggers the rollup daily

pub mod jobs;
pub mod scheduler;

pub use jobs::{RollupFailure, RollupReport, RollupStage, UsageRollupJob};
pub use scheduler::CronScheduler;
