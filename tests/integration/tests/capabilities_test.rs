//! Capability resolution tests
//!
//! Capabilities derive from the account role plus subscription state and,
//! for children, the parent-configured permission record.

use chrono::Utc;
use famlink_core::entities::ChildPermissions;
use famlink_core::DomainError;
use famlink_service::dto::{CreateInvitationRequest, RedeemAccessPassRequest};
use famlink_service::{
    AccessPassService, InvitationService, LinkingService, PermissionService, ServiceError,
};
use integration_tests::{admin, child, identity_for, parent, third_party, TestEnv};

#[tokio::test]
async fn test_free_parent_manages_but_cannot_export() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    env.backend.insert_profile(p1.clone());

    let response = PermissionService::new(&env.ctx)
        .capabilities(&p1.id)
        .await
        .unwrap();
    let caps = response.capabilities;
    assert!(caps.can_manage_documents);
    assert!(caps.can_manage_children);
    assert!(!caps.can_view_audit_log);
    assert!(!caps.can_export_court_records);
    assert!(!caps.can_access_admin);
    assert!(!caps.is_view_only);
}

#[tokio::test]
async fn test_admin_flag_surfaces_in_capabilities() {
    let env = TestEnv::new();
    let root = admin("root");
    env.backend.insert_profile(root.clone());

    let response = PermissionService::new(&env.ctx)
        .capabilities(&root.id)
        .await
        .unwrap();
    assert!(response.capabilities.can_access_admin);
}

#[tokio::test]
async fn test_redeemed_pass_unlocks_premium_surfaces() {
    let env = TestEnv::new();
    let root = admin("root");
    let p1 = parent("p1");
    env.backend.insert_profile(root.clone());
    env.backend.insert_profile(p1.clone());

    let created = AccessPassService::new(&env.ctx)
        .create_pass(
            &root.id,
            famlink_service::dto::CreateAccessPassRequest {
                label: "beta".to_string(),
                audience: "beta".to_string(),
                grant_reason: "early access".to_string(),
                grant_tier: famlink_core::SubscriptionTier::Premium,
                max_redemptions: 5,
                expires_at: None,
            },
        )
        .await
        .unwrap();
    AccessPassService::new(&env.ctx)
        .redeem(
            &p1.id,
            RedeemAccessPassRequest {
                code: created.code,
            },
        )
        .await
        .unwrap();

    let response = PermissionService::new(&env.ctx)
        .capabilities(&p1.id)
        .await
        .unwrap();
    assert!(response.capabilities.can_view_audit_log);
    assert!(response.capabilities.can_export_court_records);
}

#[tokio::test]
async fn test_fresh_co_parent_link_unlocks_premium_via_trial() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let p2 = parent("p2");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p2.clone());

    let created = InvitationService::new(&env.ctx)
        .create_invitation(
            &p1.id,
            CreateInvitationRequest {
                invitee_email: "p2@example.com".to_string(),
                kind: famlink_core::InvitationKind::CoParent,
            },
        )
        .await
        .unwrap();
    let token = created.share_link.rsplit('/').next().unwrap();
    LinkingService::new(&env.ctx)
        .accept_invitation(token, &identity_for(&p2))
        .await
        .unwrap();

    // Both sides of the link are trialing premium.
    for id in [&p1.id, &p2.id] {
        let response = PermissionService::new(&env.ctx)
            .capabilities(id)
            .await
            .unwrap();
        assert!(response.capabilities.can_view_audit_log);
    }
}

#[tokio::test]
async fn test_child_defaults_hide_schedule_and_never_manage() {
    let env = TestEnv::new();
    let kid = child("kid");
    env.backend.insert_profile(kid.clone());

    let response = PermissionService::new(&env.ctx)
        .capabilities(&kid.id)
        .await
        .unwrap();
    let caps = response.capabilities;
    assert!(caps.can_send_messages);
    assert!(caps.can_view_journal);
    assert!(!caps.can_view_calendar);
    assert!(!caps.can_manage_documents);
    assert!(!caps.can_manage_children);
    assert!(!caps.can_view_audit_log);
    assert!(caps.is_view_only);
}

#[tokio::test]
async fn test_parent_configured_toggles_flow_through() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let kid = child("kid");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(kid.clone());

    let mut record = ChildPermissions::default_for(kid.id.clone());
    record.can_send_messages = false;
    record.can_view_schedule_details = true;
    record.updated_at = Utc::now();

    PermissionService::new(&env.ctx)
        .set_child_permissions(&p1.id, record)
        .await
        .unwrap();

    let response = PermissionService::new(&env.ctx)
        .capabilities(&kid.id)
        .await
        .unwrap();
    assert!(!response.capabilities.can_send_messages);
    assert!(response.capabilities.can_view_calendar);
    // Toggles never escalate past view-only.
    assert!(!response.capabilities.can_manage_children);
}

#[tokio::test]
async fn test_only_parents_configure_child_permissions() {
    let env = TestEnv::new();
    let aunt = third_party("aunt");
    let kid = child("kid");
    env.backend.insert_profile(aunt.clone());
    env.backend.insert_profile(kid.clone());

    let err = PermissionService::new(&env.ctx)
        .set_child_permissions(&aunt.id, ChildPermissions::default_for(kid.id.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::NotAParent)));
}

#[tokio::test]
async fn test_permission_records_only_target_children() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let p2 = parent("p2");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p2.clone());

    let err = PermissionService::new(&env.ctx)
        .set_child_permissions(&p1.id, ChildPermissions::default_for(p2.id.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_third_party_member_is_view_only() {
    let env = TestEnv::new();
    let aunt = third_party("aunt");
    env.backend.insert_profile(aunt.clone());

    let response = PermissionService::new(&env.ctx)
        .capabilities(&aunt.id)
        .await
        .unwrap();
    let caps = response.capabilities;
    assert!(caps.can_send_messages);
    assert!(caps.can_view_calendar);
    assert!(caps.can_view_journal);
    assert!(!caps.can_manage_documents);
    assert!(!caps.can_view_audit_log);
    assert!(!caps.can_access_admin);
    assert!(caps.is_view_only);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let env = TestEnv::new();

    let err = PermissionService::new(&env.ctx)
        .capabilities(&famlink_core::ProfileId::from("ghost"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ProfileNotFound(_))
    ));
    assert_eq!(err.status_code(), 404);
}
