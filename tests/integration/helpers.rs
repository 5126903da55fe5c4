//! Shared test helpers for integration tests.
//!
//! Every collaborator trait is backed by one in-memory [`World`], so tests
//! drive the real services, worker and router without a database.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use portalhub_core::config::AppConfig;
use portalhub_core::error::AppError;
use portalhub_core::result::AppResult;
use portalhub_core::traits::{
    Clock, FixedClock, NotificationLog, NotificationSender, PlanAssignments, RollupStore,
    UsageSource,
};
use portalhub_core::types::{
    AlertKind, BillingMonth, MonthlyUsage, ResourceType, StorageWarning, UsageRollupRecord,
    UserId,
};
use portalhub_service::{NotificationDispatcher, PlanCatalog, QuotaService, UsageAggregator};
use portalhub_worker::UsageRollupJob;

pub const GIB: u64 = 1024 * 1024 * 1024;

/// In-memory stand-in for the database and the notification channel.
#[derive(Debug, Default)]
pub struct World {
    users: Mutex<Vec<(UserId, String)>>,
    usage: Mutex<HashMap<(UserId, ResourceType), u64>>,
    broken: Mutex<HashSet<UserId>>,
    rollups: Mutex<HashMap<(UserId, BillingMonth), UsageRollupRecord>>,
    upserts: Mutex<usize>,
    marks: Mutex<HashMap<(UserId, AlertKind), DateTime<Utc>>>,
    sent: Mutex<Vec<StorageWarning>>,
}

impl World {
    pub fn add_user(&self, plan: &str) -> UserId {
        let user_id = UserId::new();
        self.users.lock().unwrap().push((user_id, plan.to_string()));
        user_id
    }

    pub fn set_usage(&self, user_id: UserId, resource: ResourceType, value: u64) {
        self.usage.lock().unwrap().insert((user_id, resource), value);
    }

    pub fn break_user(&self, user_id: UserId) {
        self.broken.lock().unwrap().insert(user_id);
    }

    pub fn rollup(&self, user_id: UserId, month: BillingMonth) -> Option<UsageRollupRecord> {
        self.rollups.lock().unwrap().get(&(user_id, month)).cloned()
    }

    pub fn rollup_count(&self) -> usize {
        self.rollups.lock().unwrap().len()
    }

    pub fn upsert_count(&self) -> usize {
        *self.upserts.lock().unwrap()
    }

    pub fn sent_warnings(&self) -> Vec<StorageWarning> {
        self.sent.lock().unwrap().clone()
    }

    fn check(&self, user_id: UserId) -> AppResult<()> {
        if self.broken.lock().unwrap().contains(&user_id) {
            return Err(AppError::database("could not connect to server"));
        }
        Ok(())
    }

    fn usage_of(&self, user_id: UserId, resource: ResourceType) -> u64 {
        self.usage
            .lock()
            .unwrap()
            .get(&(user_id, resource))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl UsageSource for World {
    async fn measure(&self, user_id: UserId, resource: ResourceType) -> AppResult<u64> {
        self.check(user_id)?;
        Ok(self.usage_of(user_id, resource))
    }

    async fn monthly_usage(&self, user_id: UserId, _month: BillingMonth) -> AppResult<MonthlyUsage> {
        self.check(user_id)?;
        Ok(MonthlyUsage {
            storage_bytes: self.usage_of(user_id, ResourceType::Storage),
            portals_created: self.usage_of(user_id, ResourceType::Portals),
            files_uploaded: 0,
            bandwidth_bytes: 0,
        })
    }
}

#[async_trait]
impl PlanAssignments for World {
    async fn plan_for_user(&self, user_id: UserId) -> AppResult<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| *id == user_id)
            .map(|(_, plan)| plan.clone())
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    async fn active_users(&self) -> AppResult<Vec<UserId>> {
        Ok(self.users.lock().unwrap().iter().map(|(id, _)| *id).collect())
    }
}

#[async_trait]
impl RollupStore for World {
    async fn upsert(&self, record: &UsageRollupRecord) -> AppResult<()> {
        *self.upserts.lock().unwrap() += 1;
        self.rollups
            .lock()
            .unwrap()
            .insert((record.user_id, record.billing_month()), record.clone());
        Ok(())
    }

    async fn find(&self, user_id: UserId, month: BillingMonth) -> AppResult<Option<UsageRollupRecord>> {
        Ok(self.rollup(user_id, month))
    }
}

#[async_trait]
impl NotificationSender for World {
    async fn send_storage_warning(&self, warning: &StorageWarning) -> AppResult<()> {
        self.sent.lock().unwrap().push(warning.clone());
        Ok(())
    }
}

#[async_trait]
impl NotificationLog for World {
    async fn last_notified(&self, user_id: UserId, kind: AlertKind) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self.marks.lock().unwrap().get(&(user_id, kind)).copied())
    }

    async fn mark_notified(&self, user_id: UserId, kind: AlertKind, at: DateTime<Utc>) -> AppResult<()> {
        self.marks.lock().unwrap().insert((user_id, kind), at);
        Ok(())
    }
}

/// Response captured from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    pub world: Arc<World>,
    pub clock: Arc<FixedClock>,
    pub quota_service: Arc<QuotaService>,
    pub rollup_job: Arc<UsageRollupJob>,
    pub router: Router,
}

impl TestApp {
    /// Wire the full engine over a fresh in-memory world.
    pub fn new() -> Self {
        let world = Arc::new(World::default());
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 3, 14, 2, 0, 0).unwrap(),
        ));
        let catalog = Arc::new(PlanCatalog::standard());

        let aggregator = Arc::new(UsageAggregator::new(
            world.clone(),
            world.clone(),
            Arc::clone(&catalog),
            Duration::from_secs(2),
        ));
        let quota_service = Arc::new(QuotaService::new(Arc::clone(&aggregator), catalog));
        let dispatcher = Arc::new(NotificationDispatcher::new(
            world.clone(),
            world.clone(),
            clock.clone() as Arc<dyn Clock>,
        ));
        let rollup_job = Arc::new(UsageRollupJob::new(
            aggregator,
            world.clone(),
            world.clone(),
            dispatcher,
            clock.clone(),
            8,
        ));

        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "database": { "url": "postgres://localhost/unused" }
        }))
        .expect("minimal config parses");

        let state = portalhub_api::AppState {
            config: Arc::new(config),
            quota_service: Arc::clone(&quota_service),
            rollup_job: Arc::clone(&rollup_job),
        };

        Self {
            world,
            clock,
            quota_service,
            rollup_job,
            router: portalhub_api::build_app(state),
        }
    }

    /// Send a request through the router and decode the JSON body.
    pub async fn request(&self, method: &str, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
