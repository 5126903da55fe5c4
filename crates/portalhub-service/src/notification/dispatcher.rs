//! Storage warning dispatch after a rollup.
//!
//! At most one storage warning is sent per user per UTC calendar day. The
//! last send is recorded through [`NotificationLog`], so the cadence holds
//! across process restarts and on-demand runs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use portalhub_core::result::AppResult;
use portalhub_core::traits::{Clock, NotificationLog, NotificationSender};
use portalhub_core::types::{AlertKind, StorageWarning, UsageRollupRecord};
use portalhub_entity::plan::{PlanDefinition, is_unlimited};

use crate::quota::QuotaEvaluator;

/// Storage percentage at which a warning goes out.
pub const STORAGE_WARNING_PERCENT: u64 = 90;

/// What the dispatcher did for one rollup record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchOutcome {
    /// Storage is below the warning threshold.
    BelowThreshold,
    /// The plan has no storage ceiling.
    Unlimited,
    /// A warning was already sent today.
    Suppressed {
        /// When the earlier warning went out.
        last_sent: DateTime<Utc>,
    },
    /// A warning was sent and recorded.
    Sent,
}

impl DispatchOutcome {
    pub fn was_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Decides whether a rollup should produce a storage warning.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    log: Arc<dyn NotificationLog>,
    sender: Arc<dyn NotificationSender>,
    clock: Arc<dyn Clock>,
}

impl NotificationDispatcher {
    pub fn new(
        log: Arc<dyn NotificationLog>,
        sender: Arc<dyn NotificationSender>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { log, sender, clock }
    }

    /// Send a storage warning for `record` if it is at or above the
    /// threshold and none was sent today.
    ///
    /// The mark is written only after a successful send: a failed send is
    /// retried on the next run, a failed mark may cause one duplicate.
    pub async fn dispatch(
        &self,
        record: &UsageRollupRecord,
        plan: &PlanDefinition,
    ) -> AppResult<DispatchOutcome> {
        let limit = plan.limits.storage_bytes;
        if is_unlimited(limit) {
            return Ok(DispatchOutcome::Unlimited);
        }

        let used = record.storage_used();
        if !at_warning_threshold(used, limit) {
            return Ok(DispatchOutcome::BelowThreshold);
        }

        let now = self.clock.now();
        let kind = AlertKind::StorageWarning;

        if let Some(last_sent) = self.log.last_notified(record.user_id, kind).await? {
            if last_sent.date_naive() == now.date_naive() {
                debug!(
                    user_id = %record.user_id,
                    last_sent = %last_sent,
                    "Storage warning already sent today"
                );
                return Ok(DispatchOutcome::Suppressed { last_sent });
            }
        }

        let warning = StorageWarning {
            user_id: record.user_id,
            plan: plan.tier.as_str().to_string(),
            month: record.billing_month(),
            used_bytes: used,
            limit_bytes: limit,
            percentage: QuotaEvaluator::percentage(used, limit),
        };

        self.sender.send_storage_warning(&warning).await?;
        self.log.mark_notified(record.user_id, kind, now).await?;

        info!(
            user_id = %record.user_id,
            plan = %plan.tier,
            percentage = warning.percentage,
            "Storage warning sent"
        );

        Ok(DispatchOutcome::Sent)
    }
}

fn at_warning_threshold(used: u64, limit: u64) -> bool {
    if limit == 0 {
        return used > 0;
    }
    u128::from(used) * 100 >= u128::from(STORAGE_WARNING_PERCENT) * u128::from(limit)
}
