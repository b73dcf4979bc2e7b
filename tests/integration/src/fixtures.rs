//! In-memory backend and test data builders
//!
//! One `Mutex` guards the whole store, so the cross-entity transitions
//! (invitation claim plus graph mutation, conditional redemption) are as
//! atomic here as they are inside a database transaction.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use famlink_core::entities::{
    AccessPass, ChildPermissions, FamilyMembership, Invitation, InvitationKind, InvitationStatus,
    MembershipStatus, Profile, SubscriptionStatus, SubscriptionTier,
};
use famlink_core::error::DomainError;
use famlink_core::traits::{
    AccessPassRepository, DeliveryError, FamilyGraphRepository, InvitationRepository,
    InviteDelivery, MembershipRepository, NotificationEvent, Notifier, ProfileRepository,
    RepoResult,
};
use famlink_core::value_objects::{EmailAddress, ProfileId};

/// Build an unlinked parent profile
pub fn parent(id: &str) -> Profile {
    Profile::new_parent(
        ProfileId::from(id),
        format!("auth-{id}"),
        EmailAddress::new(format!("{id}@example.com")),
        format!("Parent {id}"),
    )
}

/// Build a parent profile with admin rights
pub fn admin(id: &str) -> Profile {
    let mut p = parent(id);
    p.is_admin = true;
    p
}

/// Build a child profile
pub fn child(id: &str) -> Profile {
    let mut p = parent(id);
    p.role = famlink_core::AccountRole::Child;
    p
}

/// Build a third-party family member profile
pub fn third_party(id: &str) -> Profile {
    let mut p = parent(id);
    p.role = famlink_core::AccountRole::ThirdParty;
    p
}

#[derive(Default)]
struct Store {
    profiles: HashMap<ProfileId, Profile>,
    invitations: Vec<Invitation>,
    memberships: Vec<FamilyMembership>,
    passes: Vec<AccessPass>,
    child_permissions: HashMap<ProfileId, ChildPermissions>,
}

/// Shared in-memory backend implementing every repository trait
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile
    pub fn insert_profile(&self, profile: Profile) {
        let mut store = self.store.lock().unwrap();
        store.profiles.insert(profile.id.clone(), profile);
    }

    /// Seed an invitation as-is, bypassing the duplicate check
    pub fn insert_invitation(&self, invitation: Invitation) {
        self.store.lock().unwrap().invitations.push(invitation);
    }

    /// Force an invitation into a given status
    pub fn set_invitation_status(&self, token: &str, status: InvitationStatus) {
        let mut store = self.store.lock().unwrap();
        if let Some(invitation) = store.invitations.iter_mut().find(|i| i.token == token) {
            invitation.status = status;
        }
    }

    /// Read a profile back out
    pub fn profile(&self, id: &str) -> Option<Profile> {
        self.store
            .lock()
            .unwrap()
            .profiles
            .get(&ProfileId::from(id))
            .cloned()
    }

    /// Read an invitation back out by token
    pub fn invitation(&self, token: &str) -> Option<Invitation> {
        self.store
            .lock()
            .unwrap()
            .invitations
            .iter()
            .find(|i| i.token == token)
            .cloned()
    }

    /// Read the stored memberships
    pub fn memberships(&self) -> Vec<FamilyMembership> {
        self.store.lock().unwrap().memberships.clone()
    }

    /// Read a pass back out
    pub fn pass(&self, id: Uuid) -> Option<AccessPass> {
        self.store
            .lock()
            .unwrap()
            .passes
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryBackend {
    async fn find_by_id(&self, id: &ProfileId) -> RepoResult<Option<Profile>> {
        Ok(self.store.lock().unwrap().profiles.get(id).cloned())
    }

    async fn find_by_auth_user_id(&self, auth_user_id: &str) -> RepoResult<Option<Profile>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .profiles
            .values()
            .find(|p| p.auth_user_id == auth_user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> RepoResult<Option<Profile>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .profiles
            .values()
            .find(|p| p.email == *email)
            .cloned())
    }

    async fn create(&self, profile: &Profile) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if store.profiles.contains_key(&profile.id) {
            return Err(DomainError::Validation("profile already exists".into()));
        }
        store.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if !store.profiles.contains_key(&profile.id) {
            return Err(DomainError::ProfileNotFound(profile.id.clone()));
        }
        store.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn start_trial(&self, id: &ProfileId, ends_at: DateTime<Utc>) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(profile) = store.profiles.get_mut(id) {
            // Matches the conditional update: an active subscription is
            // never downgraded, an existing trial is never shortened.
            if profile.subscription_status != SubscriptionStatus::Active {
                profile.subscription_status = SubscriptionStatus::Trialing;
                profile.trial_ends_at = Some(match profile.trial_ends_at {
                    Some(current) if current > ends_at => current,
                    _ => ends_at,
                });
            }
        }
        Ok(())
    }

    async fn apply_access_grant(
        &self,
        id: &ProfileId,
        tier: SubscriptionTier,
        _reason: &str,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let profile = store
            .profiles
            .get_mut(id)
            .ok_or_else(|| DomainError::ProfileNotFound(id.clone()))?;
        profile.subscription_tier = tier;
        profile.subscription_status = SubscriptionStatus::Active;
        Ok(())
    }

    async fn get_child_permissions(
        &self,
        child_id: &ProfileId,
    ) -> RepoResult<Option<ChildPermissions>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .child_permissions
            .get(child_id)
            .cloned())
    }

    async fn upsert_child_permissions(&self, permissions: &ChildPermissions) -> RepoResult<()> {
        self.store
            .lock()
            .unwrap()
            .child_permissions
            .insert(permissions.child_id.clone(), permissions.clone());
        Ok(())
    }
}

#[async_trait]
impl InvitationRepository for InMemoryBackend {
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<Invitation>> {
        Ok(self.invitation(token))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invitation>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .invitations
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn find_pending(
        &self,
        inviter_id: &ProfileId,
        invitee_email: &EmailAddress,
        kind: InvitationKind,
    ) -> RepoResult<Option<Invitation>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .invitations
            .iter()
            .find(|i| {
                i.inviter_id == *inviter_id
                    && i.invitee_email == *invitee_email
                    && i.kind == kind
                    && i.status == InvitationStatus::Pending
            })
            .cloned())
    }

    async fn find_by_inviter(&self, inviter_id: &ProfileId) -> RepoResult<Vec<Invitation>> {
        let mut invitations: Vec<Invitation> = self
            .store
            .lock()
            .unwrap()
            .invitations
            .iter()
            .filter(|i| i.inviter_id == *inviter_id)
            .cloned()
            .collect();
        invitations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invitations)
    }

    async fn create(&self, invitation: &Invitation) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let duplicate = store.invitations.iter().any(|i| {
            i.inviter_id == invitation.inviter_id
                && i.invitee_email == invitation.invitee_email
                && i.kind == invitation.kind
                && i.status == InvitationStatus::Pending
        });
        if duplicate {
            return Err(DomainError::DuplicateInvitation);
        }
        store.invitations.push(invitation.clone());
        Ok(())
    }

    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        let mut store = self.store.lock().unwrap();
        if let Some(invitation) = store
            .invitations
            .iter_mut()
            .find(|i| i.id == id && i.status == InvitationStatus::Pending)
        {
            invitation.status = InvitationStatus::Revoked;
            return Ok(true);
        }
        Ok(false)
    }

    async fn mark_expired(&self, id: Uuid) -> RepoResult<()> {
        let now = Utc::now();
        let mut store = self.store.lock().unwrap();
        if let Some(invitation) = store.invitations.iter_mut().find(|i| {
            i.id == id && i.status == InvitationStatus::Pending && i.expires_at < now
        }) {
            invitation.status = InvitationStatus::Expired;
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryBackend {
    async fn find_active_by_member(
        &self,
        member_id: &ProfileId,
    ) -> RepoResult<Option<FamilyMembership>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .memberships
            .iter()
            .find(|m| m.member_id == *member_id && m.is_active())
            .cloned())
    }

    async fn find_by_primary_parent(
        &self,
        primary_parent_id: &ProfileId,
    ) -> RepoResult<Vec<FamilyMembership>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .memberships
            .iter()
            .filter(|m| m.primary_parent_id == *primary_parent_id && m.is_active())
            .cloned()
            .collect())
    }

    async fn revoke(&self, id: Uuid) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let membership = store
            .memberships
            .iter_mut()
            .find(|m| m.id == id && m.is_active())
            .ok_or(DomainError::MembershipNotFound)?;
        membership.status = MembershipStatus::Revoked;
        Ok(())
    }
}

#[async_trait]
impl FamilyGraphRepository for InMemoryBackend {
    async fn link_co_parents(
        &self,
        token: &str,
        accepter_id: &ProfileId,
        inviter_id: &ProfileId,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();

        // All checks before any mutation: transaction semantics.
        let claimable = store
            .invitations
            .iter()
            .any(|i| i.token == token && i.status == InvitationStatus::Pending);
        if !claimable {
            return Err(DomainError::AlreadyAccepted);
        }
        for id in [accepter_id, inviter_id] {
            let profile = store
                .profiles
                .get(id)
                .ok_or_else(|| DomainError::ProfileNotFound((*id).clone()))?;
            if profile.co_parent_id.is_some() {
                return Err(DomainError::AlreadyLinked);
            }
        }

        if let Some(invitation) = store.invitations.iter_mut().find(|i| i.token == token) {
            invitation.status = InvitationStatus::Accepted;
        }
        store
            .profiles
            .get_mut(accepter_id)
            .expect("checked above")
            .co_parent_id = Some(inviter_id.clone());
        store
            .profiles
            .get_mut(inviter_id)
            .expect("checked above")
            .co_parent_id = Some(accepter_id.clone());
        Ok(())
    }

    async fn attach_third_party(
        &self,
        token: &str,
        membership: &FamilyMembership,
    ) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();

        let claimable = store
            .invitations
            .iter()
            .any(|i| i.token == token && i.status == InvitationStatus::Pending);
        if !claimable {
            return Err(DomainError::AlreadyAccepted);
        }
        let already_member = store
            .memberships
            .iter()
            .any(|m| m.member_id == membership.member_id && m.is_active());
        if already_member {
            return Err(DomainError::AlreadyFamilyMember);
        }

        if let Some(invitation) = store.invitations.iter_mut().find(|i| i.token == token) {
            invitation.status = InvitationStatus::Accepted;
        }
        store.memberships.push(membership.clone());
        Ok(())
    }
}

#[async_trait]
impl AccessPassRepository for InMemoryBackend {
    async fn find_by_code_hash(&self, code_hash: &str) -> RepoResult<Option<AccessPass>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .passes
            .iter()
            .find(|p| p.code_hash == code_hash)
            .cloned())
    }

    async fn create(&self, pass: &AccessPass) -> RepoResult<()> {
        self.store.lock().unwrap().passes.push(pass.clone());
        Ok(())
    }

    async fn try_redeem(&self, id: Uuid, now: DateTime<Utc>) -> RepoResult<bool> {
        let mut store = self.store.lock().unwrap();
        if let Some(pass) = store.passes.iter_mut().find(|p| p.id == id) {
            let expired = pass.expires_at.is_some_and(|at| at <= now);
            if pass.active && !expired && pass.redeemed_count < pass.max_redemptions {
                pass.redeemed_count += 1;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn deactivate(&self, id: Uuid) -> RepoResult<()> {
        let mut store = self.store.lock().unwrap();
        let pass = store
            .passes
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::AccessPassNotFound)?;
        pass.active = false;
        Ok(())
    }
}

// ============================================================================
// Delivery fixtures
// ============================================================================

/// Records every delivered invitation email
#[derive(Clone, Default)]
pub struct RecordingDelivery {
    pub sent: Arc<Mutex<Vec<(EmailAddress, String)>>>,
}

impl RecordingDelivery {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl InviteDelivery for RecordingDelivery {
    async fn send_invitation(
        &self,
        recipient: &EmailAddress,
        _inviter_name: &str,
        token: &str,
    ) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.clone(), token.to_string()));
        Ok(())
    }
}

/// Delivery port that always fails, for best-effort semantics tests
#[derive(Clone, Default)]
pub struct FailingDelivery;

#[async_trait]
impl InviteDelivery for FailingDelivery {
    async fn send_invitation(
        &self,
        _recipient: &EmailAddress,
        _inviter_name: &str,
        _token: &str,
    ) -> Result<(), DeliveryError> {
        Err(DeliveryError("smtp unreachable".to_string()))
    }
}

/// Records every dispatched notification
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub events: Arc<Mutex<Vec<(ProfileId, NotificationEvent)>>>,
}

impl RecordingNotifier {
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn targets(&self) -> Vec<ProfileId> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(target, _)| target.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        target: &ProfileId,
        event: NotificationEvent,
    ) -> Result<(), DeliveryError> {
        self.events.lock().unwrap().push((target.clone(), event));
        Ok(())
    }
}
