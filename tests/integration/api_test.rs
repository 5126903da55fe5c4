//! HTTP API tests driven through the router with `oneshot`.

mod helpers;

use axum::http::StatusCode;

use helpers::{GIB, TestApp};

use portalhub_core::types::{ResourceType, UserId};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_exceeded_quota_is_a_normal_response() {
    let app = TestApp::new();
    let user = app.world.add_user("free");
    app.world.set_usage(user, ResourceType::Portals, 2);

    let response = app
        .request("GET", &format!("/api/users/{user}/quota/portals"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["level"], "exceeded");
    assert_eq!(data["can_proceed"], false);
    assert_eq!(data["requires_upgrade"], true);
    assert_eq!(data["recommendation"]["target_plan"], "pro");
}

#[tokio::test]
async fn test_unreadable_usage_is_service_unavailable() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");
    app.world.break_user(user);

    let response = app
        .request("GET", &format!("/api/users/{user}/quota/storage"))
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "USAGE_UNAVAILABLE");
}

#[tokio::test]
async fn test_bad_path_values_are_rejected() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");

    let response = app
        .request("GET", &format!("/api/users/{user}/quota/bandwidth"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/users/not-a-uuid/quota/portals").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", &format!("/api/users/{}/quota/portals", UserId::new()))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_plan_is_a_server_error() {
    let app = TestApp::new();
    let user = app.world.add_user("legacy_gold");

    let response = app
        .request("GET", &format!("/api/users/{user}/quota/portals"))
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn test_overview_lists_every_resource() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");
    app.world.set_usage(user, ResourceType::Storage, 46 * GIB);

    let response = app.request("GET", &format!("/api/users/{user}/quota")).await;

    assert_eq!(response.status, StatusCode::OK);
    let resources = response.body["data"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 4);
    assert!(resources.iter().all(|r| r["status"] == "known"));
}

#[tokio::test]
async fn test_feature_gate() {
    let app = TestApp::new();
    let user = app.world.add_user("team");

    let response = app
        .request("GET", &format!("/api/users/{user}/features/white_label"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["enabled"], true);

    let response = app
        .request("GET", &format!("/api/users/{user}/features/sso"))
        .await;
    assert_eq!(response.body["data"]["enabled"], false);
    assert_eq!(response.body["data"]["required_plan"], "enterprise");
}

#[tokio::test]
async fn test_manual_rollup_returns_report() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");
    app.world.set_usage(user, ResourceType::Storage, 46 * GIB);

    let response = app.request("POST", "/api/admin/rollups/run").await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["month"], "2026-03-01");
    assert_eq!(data["total_users"], 1);
    assert_eq!(data["succeeded"], 1);
    assert_eq!(data["notifications_sent"], 1);
    assert_eq!(app.world.upsert_count(), 1);
}
