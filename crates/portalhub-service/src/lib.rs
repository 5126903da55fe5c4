//! # portalhub-service
//!
//! Quota decision logic for PortalHub. Each service is built by constructor
//! injection: collaborators (usage source, plan assignments, notification
//! delivery, clock) are provided as `Arc<dyn Trait>` at construction time.
//!
//! Request path: [`QuotaService`] asks the [`UsageAggregator`] for a live
//! snapshot and hands it to the [`QuotaEvaluator`], which consults the
//! [`GracePeriodTracker`] once a ceiling is reached. The rollup worker uses
//! the same aggregator plus the [`NotificationDispatcher`].

pub mod notification;
pub mod plan;
pub mod quota;

pub use notification::{DispatchOutcome, NotificationDispatcher};
pub use plan::PlanCatalog;
pub use quota::{GracePeriodTracker, QuotaEvaluator, QuotaService, UsageAggregator};
