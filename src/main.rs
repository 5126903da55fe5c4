//! PortalHub quota server
//!
//! Main entry point that wires all crates together, schedules the daily
//! usage rollup and starts the HTTP API.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use portalhub_core::config::AppConfig;
use portalhub_core::error::AppError;
use portalhub_core::traits::{Clock, PlanAssignments, SystemClock};
use portalhub_database::repositories::{
    NotificationRepository, RollupRepository, UsageRepository, UserPlanRepository,
};
use portalhub_service::{NotificationDispatcher, PlanCatalog, QuotaService, UsageAggregator};
use portalhub_worker::{CronScheduler, UsageRollupJob};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `PORTALHUB__*` variables
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PORTALHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PortalHub quota engine v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let aggregation_timeout = config.quota.aggregation_timeout();
    let db = portalhub_database::DatabasePool::connect(&config.database, aggregation_timeout).await?;

    if config.database.run_migrations {
        db.migrate().await?;
    }

    // ── Step 2: Plan catalog ─────────────────────────────────────
    let catalog = Arc::new(PlanCatalog::standard());
    catalog.validate()?;

    // ── Step 3: Repositories ─────────────────────────────────────
    let usage_repo = Arc::new(UsageRepository::new(db.pool().clone()));
    let plan_repo: Arc<dyn PlanAssignments> =
        Arc::new(UserPlanRepository::new(db.pool().clone()));
    let rollup_repo = Arc::new(RollupRepository::new(db.pool().clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db.pool().clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // ── Step 4: Services ─────────────────────────────────────────
    let aggregator = Arc::new(UsageAggregator::new(
        usage_repo,
        Arc::clone(&plan_repo),
        Arc::clone(&catalog),
        aggregation_timeout,
    ));
    let quota_service = Arc::new(QuotaService::new(
        Arc::clone(&aggregator),
        Arc::clone(&catalog),
    ));
    let dispatcher = Arc::new(NotificationDispatcher::new(
        notification_repo.clone(),
        notification_repo,
        Arc::clone(&clock),
    ));

    // ── Step 5: Rollup job + scheduler ───────────────────────────
    let rollup_job = Arc::new(UsageRollupJob::new(
        aggregator,
        plan_repo,
        rollup_repo,
        dispatcher,
        clock,
        config.worker.concurrency,
    ));

    let scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new().await?;
        scheduler
            .register_usage_rollup(Arc::clone(&rollup_job), &config.worker.rollup_schedule)
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Usage rollup scheduling disabled");
        None
    };

    let startup_run = if config.worker.run_on_startup {
        let job = Arc::clone(&rollup_job);
        Some(tokio::spawn(async move {
            if let Err(e) = job.run().await {
                tracing::error!("Startup usage rollup failed: {}", e);
            }
        }))
    } else {
        None
    };

    // ── Step 6: HTTP server ──────────────────────────────────────
    let state = portalhub_api::AppState {
        config: Arc::new(config.clone()),
        quota_service,
        rollup_job,
    };

    portalhub_api::serve(state, &config.server, async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    })
    .await?;

    // ── Step 7: Wait for background tasks ────────────────────────
    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    if let Some(handle) = startup_run {
        let grace = config.server.shutdown_grace();
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Startup usage rollup still running at shutdown");
        }
    }

    db.close().await;
    tracing::info!("PortalHub quota engine shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
