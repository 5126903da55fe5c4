//! Usage rollup runs over the in-memory world.

mod helpers;

use helpers::{GIB, TestApp};

use portalhub_core::types::{BillingMonth, ResourceType};
use portalhub_worker::RollupStage;

#[tokio::test]
async fn test_failing_user_is_skipped_and_the_rest_are_rolled_up() {
    let app = TestApp::new();
    let users: Vec<_> = (0..100).map(|_| app.world.add_user("free")).collect();
    app.world.break_user(users[37]);

    let report = app.rollup_job.run().await.unwrap();

    assert_eq!(report.total_users, 100);
    assert_eq!(report.succeeded, 99);
    assert_eq!(app.world.upsert_count(), 99);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].user_id, users[37]);
    assert_eq!(report.failures[0].stage, RollupStage::Aggregate);

    let month = BillingMonth::from_ym(2026, 3).unwrap();
    assert!(app.world.rollup(users[37], month).is_none());
    assert!(app.world.rollup(users[36], month).is_some());
}

#[tokio::test]
async fn test_same_month_rerun_overwrites_rows() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");
    app.world.set_usage(user, ResourceType::Storage, 10 * GIB);

    app.rollup_job.run().await.unwrap();
    app.world.set_usage(user, ResourceType::Storage, 12 * GIB);
    app.rollup_job.run().await.unwrap();

    let month = BillingMonth::from_ym(2026, 3).unwrap();
    assert_eq!(app.world.rollup_count(), 1);
    assert_eq!(app.world.rollup(user, month).unwrap().storage_used(), 12 * GIB);
}

#[tokio::test]
async fn test_storage_warning_is_sent_once_per_day() {
    let app = TestApp::new();
    let near_full = app.world.add_user("pro");
    let comfortable = app.world.add_user("pro");
    let unlimited = app.world.add_user("enterprise");
    app.world.set_usage(near_full, ResourceType::Storage, 46 * GIB);
    app.world.set_usage(comfortable, ResourceType::Storage, 20 * GIB);
    app.world.set_usage(unlimited, ResourceType::Storage, 5_000 * GIB);

    let first = app.rollup_job.run().await.unwrap();
    let again = app.rollup_job.run().await.unwrap();

    assert_eq!(first.notifications_sent, 1);
    assert_eq!(again.notifications_sent, 0);

    let sent = app.world.sent_warnings();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].user_id, near_full);
    assert_eq!(sent[0].percentage, 92.0);

    app.clock.advance(chrono::Duration::days(1));
    let next_day = app.rollup_job.run().await.unwrap();
    assert_eq!(next_day.notifications_sent, 1);
    assert_eq!(app.world.sent_warnings().len(), 2);
}

#[tokio::test]
async fn test_rollup_month_follows_the_clock() {
    let app = TestApp::new();
    let user = app.world.add_user("free");

    app.clock.advance(chrono::Duration::days(20));
    let report = app.rollup_job.run().await.unwrap();

    let april = BillingMonth::from_ym(2026, 4).unwrap();
    assert_eq!(report.month, april);
    assert!(app.world.rollup(user, april).is_some());
}

#[tokio::test]
async fn test_empty_user_list_is_a_clean_run() {
    let app = TestApp::new();
    let report = app.rollup_job.run().await.unwrap();
    assert_eq!(report.total_users, 0);
    assert_eq!(report.succeeded, 0);
    assert!(report.failures.is_empty());
}
