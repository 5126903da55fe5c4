//! End-to-end quota checks over the in-memory world.

mod helpers;

use helpers::{GIB, TestApp};

use portalhub_core::error::ErrorKind;
use portalhub_core::types::{ResourceType, UserId};
use portalhub_entity::plan::{Feature, PlanTier};
use portalhub_entity::quota::{QuotaLevel, ResourceStatus};

#[tokio::test]
async fn test_free_user_at_portal_limit_proceeds_on_grace() {
    let app = TestApp::new();
    let user = app.world.add_user("free");
    app.world.set_usage(user, ResourceType::Portals, 1);

    let decision = app
        .quota_service
        .check_quota(user, ResourceType::Portals)
        .await
        .unwrap();

    assert_eq!(decision.percentage, Some(100.0));
    assert_eq!(decision.level, QuotaLevel::Exceeded);
    assert!(decision.requires_upgrade);
    assert!(decision.can_proceed);

    let grace = decision.grace.unwrap();
    assert_eq!((grace.grace_total, grace.grace_used, grace.grace_remaining), (1, 0, 1));

    let recommendation = decision.recommendation.unwrap();
    assert_eq!(recommendation.target_plan, PlanTier::Pro);
    assert_eq!(recommendation.target_limit, Some(10));
}

#[tokio::test]
async fn test_free_user_past_grace_is_blocked() {
    let app = TestApp::new();
    let user = app.world.add_user("free");
    app.world.set_usage(user, ResourceType::Portals, 2);

    let decision = app
        .quota_service
        .check_quota(user, ResourceType::Portals)
        .await
        .unwrap();

    let grace = decision.grace.unwrap();
    assert_eq!(grace.grace_used, 1);
    assert_eq!(grace.grace_remaining, 0);
    assert!(!decision.can_proceed);
}

#[tokio::test]
async fn test_pro_storage_at_ninety_two_percent_is_critical() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");
    app.world.set_usage(user, ResourceType::Storage, 46 * GIB);

    let decision = app
        .quota_service
        .check_quota(user, ResourceType::Storage)
        .await
        .unwrap();

    assert_eq!(decision.percentage, Some(92.0));
    assert_eq!(decision.level, QuotaLevel::Critical);
    assert!(decision.requires_upgrade);
    assert!(decision.can_proceed);
    assert!(decision.grace.is_none());
    assert_eq!(decision.recommendation.unwrap().target_plan, PlanTier::Team);
}

#[tokio::test]
async fn test_enterprise_portals_are_unlimited() {
    let app = TestApp::new();
    let user = app.world.add_user("enterprise");
    app.world.set_usage(user, ResourceType::Portals, 500_000);

    let decision = app
        .quota_service
        .check_quota(user, ResourceType::Portals)
        .await
        .unwrap();

    assert_eq!(decision.level, QuotaLevel::Normal);
    assert!(decision.percentage.is_none());
    assert!(decision.is_unlimited());
    assert!(decision.can_proceed);
}

#[tokio::test]
async fn test_free_custom_domain_with_zero_limit() {
    let app = TestApp::new();
    let user = app.world.add_user("free");

    let idle = app
        .quota_service
        .check_quota(user, ResourceType::CustomDomains)
        .await
        .unwrap();
    assert_eq!(idle.level, QuotaLevel::Normal);

    app.world.set_usage(user, ResourceType::CustomDomains, 1);
    let used = app
        .quota_service
        .check_quota(user, ResourceType::CustomDomains)
        .await
        .unwrap();
    assert_eq!(used.level, QuotaLevel::Exceeded);
    assert!(!used.can_proceed);
}

#[tokio::test]
async fn test_usage_failure_denies_instead_of_reading_zero() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");
    app.world.break_user(user);

    let err = app
        .quota_service
        .check_quota(user, ResourceType::Portals)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Aggregation);
}

#[tokio::test]
async fn test_unknown_plan_fails_fast() {
    let app = TestApp::new();
    let user = app.world.add_user("starter");

    let err = app
        .quota_service
        .check_quota(user, ResourceType::Portals)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Configuration);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new();
    let err = app
        .quota_service
        .check_quota(UserId::new(), ResourceType::Portals)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_overview_covers_every_resource() {
    let app = TestApp::new();
    let user = app.world.add_user("team");
    app.world.set_usage(user, ResourceType::TeamMembers, 21);

    let overview = app.quota_service.usage_overview(user).await.unwrap();
    assert_eq!(overview.resources.len(), 4);

    let team_members = overview
        .resources
        .iter()
        .find_map(|status| match status {
            ResourceStatus::Known { decision } if decision.resource == ResourceType::TeamMembers => {
                Some(decision.clone())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(team_members.level, QuotaLevel::Warning);
}

#[tokio::test]
async fn test_white_label_requires_team() {
    let app = TestApp::new();
    let user = app.world.add_user("pro");

    let decision = app
        .quota_service
        .check_feature(user, Feature::WhiteLabel)
        .await
        .unwrap();
    assert!(!decision.enabled);
    assert_eq!(decision.required_plan, Some(PlanTier::Team));
}
