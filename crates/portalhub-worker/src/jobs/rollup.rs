//! Monthly usage rollup job.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::Serialize;
use tokio::sync::Mutex;

use portalhub_core::error::AppError;
use portalhub_core::result::AppResult;
use portalhub_core::traits::{Clock, PlanAssignments, RollupStore};
use portalhub_core::types::{BillingMonth, UsageRollupRecord, UserId};
use portalhub_service::{NotificationDispatcher, UsageAggregator};

/// Step of the per-user pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupStage {
    /// Resolving the plan or reading usage.
    Aggregate,
    /// Writing the rollup record.
    Persist,
    /// Sending the storage warning.
    Notify,
}

impl fmt::Display for RollupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggregate => write!(f, "aggregate"),
            Self::Persist => write!(f, "persist"),
            Self::Notify => write!(f, "notify"),
        }
    }
}

/// A user the run could not fully process.
#[derive(Debug, Clone, Serialize)]
pub struct RollupFailure {
    pub user_id: UserId,
    pub stage: RollupStage,
    pub error: String,
}

/// Summary of one rollup run.
#[derive(Debug, Clone, Serialize)]
pub struct RollupReport {
    /// Month that was recomputed.
    pub month: BillingMonth,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Active users enumerated at the start of the run.
    pub total_users: usize,
    /// Users whose rollup was written and whose notification step completed.
    pub succeeded: usize,
    /// Storage warnings sent during the run.
    pub notifications_sent: usize,
    pub failures: Vec<RollupFailure>,
}

/// Recomputes the current month's usage for every active user, upserts the
/// rollup rows, and hands each row to the notification dispatcher.
///
/// A failure for one user is logged and recorded in the report; the run
/// moves on to the next user. Upserts are keyed by `(user, month)`, so
/// running twice in a month overwrites instead of duplicating.
pub struct UsageRollupJob {
    /// Usage and plan resolution
    aggregator: Arc<UsageAggregator>,
    /// Enumerates active users
    plans: Arc<dyn PlanAssignments>,
    /// Rollup persistence
    store: Arc<dyn RollupStore>,
    /// Storage warnings
    dispatcher: Arc<NotificationDispatcher>,
    /// Time source for the month and `computed_at`
    clock: Arc<dyn Clock>,
    /// Users processed at once
    concurrency: usize,
    /// Held for the duration of a run
    running: Mutex<()>,
}

impl fmt::Debug for UsageRollupJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsageRollupJob")
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl UsageRollupJob {
    /// Create a new rollup job
    pub fn new(
        aggregator: Arc<UsageAggregator>,
        plans: Arc<dyn PlanAssignments>,
        store: Arc<dyn RollupStore>,
        dispatcher: Arc<NotificationDispatcher>,
        clock: Arc<dyn Clock>,
        concurrency: usize,
    ) -> Self {
        Self {
            aggregator,
            plans,
            store,
            dispatcher,
            clock,
            concurrency: concurrency.max(1),
            running: Mutex::new(()),
        }
    }

    /// Run the rollup now.
    ///
    /// Fails with a conflict error if another run is still in progress, and
    /// with the source error if the user list cannot be read. Per-user
    /// failures never fail the run.
    pub async fn run(&self) -> AppResult<RollupReport> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| AppError::conflict("A usage rollup is already in progress"))?;

        let started_at = self.clock.now();
        let month = BillingMonth::containing(started_at);

        let users = self.plans.active_users().await.map_err(|e| {
            tracing::error!("Usage rollup for {} could not list users: {}", month, e);
            e
        })?;
        let total_users = users.len();

        tracing::info!(
            month = %month,
            users = total_users,
            concurrency = self.concurrency,
            "Usage rollup started"
        );

        let outcomes: Vec<Result<bool, RollupFailure>> = futures::stream::iter(users)
            .map(|user_id| self.process_user(user_id, month))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut succeeded = 0;
        let mut notifications_sent = 0;
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(sent) => {
                    succeeded += 1;
                    if sent {
                        notifications_sent += 1;
                    }
                }
                Err(failure) => failures.push(failure),
            }
        }

        let report = RollupReport {
            month,
            started_at,
            finished_at: self.clock.now(),
            total_users,
            succeeded,
            notifications_sent,
            failures,
        };

        tracing::info!(
            month = %month,
            users = report.total_users,
            succeeded = report.succeeded,
            failed = report.failures.len(),
            notifications_sent = report.notifications_sent,
            "Usage rollup finished"
        );

        Ok(report)
    }

    /// Aggregate, persist and notify for one user. Returns whether a
    /// warning was sent.
    async fn process_user(&self, user_id: UserId, month: BillingMonth) -> Result<bool, RollupFailure> {
        let fail = |stage: RollupStage, e: AppError| {
            tracing::warn!(
                user_id = %user_id,
                stage = %stage,
                error = %e,
                "Usage rollup skipped user"
            );
            RollupFailure {
                user_id,
                stage,
                error: e.to_string(),
            }
        };

        let plan = self
            .aggregator
            .plan_for(user_id)
            .await
            .map_err(|e| fail(RollupStage::Aggregate, e))?;

        let usage = self
            .aggregator
            .monthly_usage(user_id, month)
            .await
            .map_err(|e| fail(RollupStage::Aggregate, e))?;

        let record = UsageRollupRecord::new(user_id, month, usage, self.clock.now());
        self.store
            .upsert(&record)
            .await
            .map_err(|e| fail(RollupStage::Persist, e))?;

        let outcome = self
            .dispatcher
            .dispatch(&record, &plan)
            .await
            .map_err(|e| fail(RollupStage::Notify, e))?;

        tracing::debug!("Rolled up usage for user {} ({:?})", user_id, outcome);
        Ok(outcome.was_sent())
    }
}
