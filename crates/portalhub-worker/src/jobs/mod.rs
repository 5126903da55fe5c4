//! Job implementations.

pub mod rollup;

pub use rollup::{RollupFailure, RollupReport, RollupStage, UsageRollupJob};
