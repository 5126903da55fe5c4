//! Quota evaluation values.
//!
//! Everything in this module is transient: computed per call, returned to
//! the caller, never persisted.

pub mod decision;
pub mod feature;
pub mod grace;
pub mod level;
pub mod overview;
pub mod snapshot;

pub use decision::{QuotaDecision, UpgradeRecommendation};
pub use feature::FeatureDecision;
pub use grace::GraceEvaluation;
pub use level::QuotaLevel;
pub use overview::{ResourceStatus, UsageOverview};
pub use snapshot::ResourceUsageSnapshot;
