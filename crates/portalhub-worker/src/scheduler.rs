//! Cron scheduler for the daily usage rollup.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use portalhub_core::error::{AppError, ErrorKind};
use portalhub_core::result::AppResult;

use crate::jobs::{RollupReport, UsageRollupJob};

/// How a scheduled rollup tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Completed,
    /// The run finished but this many users failed.
    PartiallyFailed(usize),
    /// A previous run still held the guard.
    Skipped,
    Failed,
}

impl TickOutcome {
    fn of(result: &AppResult<RollupReport>) -> Self {
        match result {
            Ok(report) if report.failures.is_empty() => Self::Completed,
            Ok(report) => Self::PartiallyFailed(report.failures.len()),
            Err(e) if e.kind == ErrorKind::Conflict => Self::Skipped,
            Err(_) => Self::Failed,
        }
    }
}

fn log_tick(result: &AppResult<RollupReport>) {
    match (TickOutcome::of(result), result) {
        (TickOutcome::Completed, _) => {}
        (TickOutcome::PartiallyFailed(failed), _) => {
            tracing::warn!("Scheduled usage rollup finished with {} failed users", failed)
        }
        (TickOutcome::Skipped, _) => {
            tracing::warn!("Skipping scheduled usage rollup: previous run still in progress")
        }
        (TickOutcome::Failed, Err(e)) => tracing::error!("Scheduled usage rollup failed: {}", e),
        (TickOutcome::Failed, Ok(_)) => {}
    }
}

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler })
    }

    /// Run `job` on `schedule` (six-field cron, seconds first, UTC).
    ///
    /// A tick that lands while a previous run is still going is skipped
    /// with a warning.
    pub async fn register_usage_rollup(
        &self,
        job: Arc<UsageRollupJob>,
        schedule: &str,
    ) -> AppResult<()> {
        let cron = CronJob::new_async(schedule, move |_uuid, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                tracing::debug!("Triggering scheduled usage rollup");
                log_tick(&job.run().await);
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid usage rollup schedule '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler.add(cron).await.map_err(|e| {
            AppError::internal(format!("Failed to add usage_rollup schedule: {}", e))
        })?;

        tracing::info!("Registered: usage_rollup ({})", schedule);
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&self) -> AppResult<()> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
