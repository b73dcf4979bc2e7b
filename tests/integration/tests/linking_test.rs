//! Invitation acceptance tests
//!
//! Cover the co-parent link (mutual pointers, single use, trial grant) and
//! the third-party join (anchor resolution, email binding, membership
//! uniqueness) against the in-memory backend.

use chrono::{Duration, Utc};
use famlink_core::entities::{
    Invitation, InvitationKind, InvitationStatus, Profile, SubscriptionStatus,
};
use famlink_core::DomainError;
use famlink_service::dto::CreateInvitationRequest;
use famlink_service::{InvitationService, LinkingService, ServiceError};
use integration_tests::{child, identity_for, parent, TestEnv};

fn token_from(share_link: &str) -> &str {
    share_link.rsplit('/').next().unwrap()
}

/// Seed an inviter, issue an invitation through the service, return the token
async fn issue(env: &TestEnv, inviter: &Profile, email: &str, kind: InvitationKind) -> String {
    let response = InvitationService::new(&env.ctx)
        .create_invitation(
            &inviter.id,
            CreateInvitationRequest {
                invitee_email: email.to_string(),
                kind,
            },
        )
        .await
        .unwrap();
    token_from(&response.share_link).to_string()
}

fn linked_parents(env: &TestEnv) -> (Profile, Profile) {
    let mut p1 = parent("p1");
    let mut p2 = parent("p2");
    p1.co_parent_id = Some(p2.id.clone());
    p2.co_parent_id = Some(p1.id.clone());
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p2.clone());
    (p1, p2)
}

// ============================================================================
// Co-parent linking
// ============================================================================

#[tokio::test]
async fn test_co_parent_accept_links_both_profiles() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let p2 = parent("p2");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p2.clone());

    let token = issue(&env, &p1, "p2@example.com", InvitationKind::CoParent).await;

    let response = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&p2))
        .await
        .unwrap();

    assert_eq!(response.kind, InvitationKind::CoParent);
    assert_eq!(response.co_parent_id, Some(p1.id.clone()));
    assert_eq!(response.primary_parent_id, None);

    // Both pointers set, never just one.
    let p1_after = env.backend.profile("p1").unwrap();
    let p2_after = env.backend.profile("p2").unwrap();
    assert_eq!(p1_after.co_parent_id, Some(p2.id.clone()));
    assert_eq!(p2_after.co_parent_id, Some(p1.id.clone()));

    assert_eq!(
        env.backend.invitation(&token).unwrap().status,
        InvitationStatus::Accepted
    );

    // Linking starts the premium trial on both sides.
    assert_eq!(p1_after.subscription_status, SubscriptionStatus::Trialing);
    assert_eq!(p2_after.subscription_status, SubscriptionStatus::Trialing);
    assert!(p1_after.trial_ends_at.is_some());

    // The inviter is told their partner joined.
    assert_eq!(env.notifier.targets(), vec![p1.id]);
}

#[tokio::test]
async fn test_second_accept_of_same_token_is_rejected() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let p2 = parent("p2");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p2.clone());

    let token = issue(&env, &p1, "p2@example.com", InvitationKind::CoParent).await;

    let linking = LinkingService::new(&env.ctx);
    linking
        .accept_invitation(&token, &identity_for(&p2))
        .await
        .unwrap();

    let err = linking
        .accept_invitation(&token, &identity_for(&p2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyAccepted)
    ));

    // The graph is untouched by the replay.
    assert_eq!(
        env.backend.profile("p1").unwrap().co_parent_id,
        Some(p2.id.clone())
    );
}

#[tokio::test]
async fn test_accept_past_deadline_persists_expiry() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let p2 = parent("p2");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p2.clone());

    // Storage still says pending; the clock has moved on.
    let mut invitation = Invitation::new(
        p1.id.clone(),
        famlink_core::EmailAddress::new("p2@example.com"),
        InvitationKind::CoParent,
    );
    invitation.expires_at = Utc::now() - Duration::hours(1);
    let token = invitation.token.clone();
    env.backend.insert_invitation(invitation);

    let err = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&p2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvitationExpired)
    ));

    // The lazy expiry got written back.
    assert_eq!(
        env.backend.invitation(&token).unwrap().status,
        InvitationStatus::Expired
    );
    assert!(env.backend.profile("p2").unwrap().co_parent_id.is_none());
}

#[tokio::test]
async fn test_revoked_token_cannot_be_accepted() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let p2 = parent("p2");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p2.clone());

    let mut invitation = Invitation::new(
        p1.id.clone(),
        famlink_core::EmailAddress::new("p2@example.com"),
        InvitationKind::CoParent,
    );
    invitation.status = InvitationStatus::Revoked;
    let token = invitation.token.clone();
    env.backend.insert_invitation(invitation);

    let err = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&p2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvitationRevoked)
    ));
}

#[tokio::test]
async fn test_already_linked_accepter_is_rejected_and_token_stays_live() {
    let env = TestEnv::new();
    let (_, p2) = linked_parents(&env);
    let p3 = parent("p3");
    env.backend.insert_profile(p3.clone());

    let token = issue(&env, &p3, "p2@example.com", InvitationKind::CoParent).await;

    let err = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&p2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyLinked)
    ));

    // The token was not consumed by the failed attempt.
    assert_eq!(
        env.backend.invitation(&token).unwrap().status,
        InvitationStatus::Pending
    );
    assert_eq!(env.backend.profile("p2").unwrap().co_parent_id, Some(
        famlink_core::ProfileId::from("p1")
    ));
}

#[tokio::test]
async fn test_inviter_cannot_accept_own_token() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    env.backend.insert_profile(p1.clone());

    let token = issue(&env, &p1, "other@example.com", InvitationKind::CoParent).await;

    let err = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&p1))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_child_accepter_cannot_form_co_parent_link() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let kid = child("kid");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(kid.clone());

    let token = issue(&env, &p1, "kid@example.com", InvitationKind::CoParent).await;

    let err = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&kid))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::NotAParent)));
}

// ============================================================================
// Third-party joins
// ============================================================================

#[tokio::test]
async fn test_third_party_join_anchors_on_smaller_parent_id() {
    let env = TestEnv::new();
    let (p1, p2) = linked_parents(&env);
    let aunt = parent("aunt");
    env.backend.insert_profile(aunt.clone());

    // p2 invites, but the family anchor is p1 (the smaller id).
    let token = issue(&env, &p2, "aunt@example.com", InvitationKind::ThirdParty).await;

    let response = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&aunt))
        .await
        .unwrap();

    assert_eq!(response.kind, InvitationKind::ThirdParty);
    assert_eq!(response.primary_parent_id, Some(p1.id.clone()));
    assert_eq!(response.co_parent_id, None);

    let memberships = env.backend.memberships();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].member_id, aunt.id);
    assert_eq!(memberships[0].primary_parent_id, p1.id);
    assert_eq!(memberships[0].invited_by, p2.id);

    // Both co-parents hear about the new member.
    let targets = env.notifier.targets();
    assert!(targets.contains(&p1.id));
    assert!(targets.contains(&p2.id));
}

#[tokio::test]
async fn test_anchor_is_the_same_whichever_parent_invites() {
    // Invite from p1 in one world, from p2 in another: same anchor.
    let mut anchors = Vec::new();
    for inviter_id in ["p1", "p2"] {
        let env = TestEnv::new();
        let (_, _) = linked_parents(&env);
        let aunt = parent("aunt");
        env.backend.insert_profile(aunt.clone());

        let inviter = env.backend.profile(inviter_id).unwrap();
        let token = issue(&env, &inviter, "aunt@example.com", InvitationKind::ThirdParty).await;
        let response = LinkingService::new(&env.ctx)
            .accept_invitation(&token, &identity_for(&aunt))
            .await
            .unwrap();
        anchors.push(response.primary_parent_id.unwrap());
    }
    assert_eq!(anchors[0], anchors[1]);
}

#[tokio::test]
async fn test_third_party_token_is_bound_to_the_invited_email() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let intruder = parent("intruder");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(intruder.clone());

    let token = issue(&env, &p1, "aunt@example.com", InvitationKind::ThirdParty).await;

    // Holding the token is not enough: the signed-in email must match.
    let err = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&intruder))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::EmailMismatch)
    ));

    assert!(env.backend.memberships().is_empty());
    assert_eq!(
        env.backend.invitation(&token).unwrap().status,
        InvitationStatus::Pending
    );
}

#[tokio::test]
async fn test_member_of_one_family_cannot_join_another() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let p9 = parent("p9");
    let aunt = parent("aunt");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(p9.clone());
    env.backend.insert_profile(aunt.clone());

    let linking = LinkingService::new(&env.ctx);

    let first = issue(&env, &p1, "aunt@example.com", InvitationKind::ThirdParty).await;
    linking
        .accept_invitation(&first, &identity_for(&aunt))
        .await
        .unwrap();

    let second = issue(&env, &p9, "aunt@example.com", InvitationKind::ThirdParty).await;
    let err = linking
        .accept_invitation(&second, &identity_for(&aunt))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::AlreadyFamilyMember)
    ));
    assert_eq!(env.backend.memberships().len(), 1);
}

#[tokio::test]
async fn test_child_accounts_cannot_accept_third_party_invitations() {
    let env = TestEnv::new();
    let p1 = parent("p1");
    let kid = child("kid");
    env.backend.insert_profile(p1.clone());
    env.backend.insert_profile(kid.clone());

    let token = issue(&env, &p1, "kid@example.com", InvitationKind::ThirdParty).await;

    let err = LinkingService::new(&env.ctx)
        .accept_invitation(&token, &identity_for(&kid))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(env.backend.memberships().is_empty());
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let env = TestEnv::new();
    let p2 = parent("p2");
    env.backend.insert_profile(p2.clone());

    let err = LinkingService::new(&env.ctx)
        .accept_invitation("no-such-token", &identity_for(&p2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvitationNotFound)
    ));
}
