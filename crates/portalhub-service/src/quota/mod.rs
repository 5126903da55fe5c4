//! Quota checks: aggregation, classification, grace, and the service that
//! ties them together for callers.

pub mod aggregator;
pub mod evaluator;
pub mod grace;
pub mod service;

pub use aggregator::UsageAggregator;
pub use evaluator::QuotaEvaluator;
pub use grace::GracePeriodTracker;
pub use service::QuotaService;
