//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Conditional updates (claim a pending
//! invitation, increment a redemption counter under its cap) are part of
//! the contract here because the race safety of the whole subsystem
//! depends on them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    AccessPass, ChildPermissions, FamilyMembership, Invitation, InvitationKind, Profile,
    SubscriptionTier,
};
use crate::error::DomainError;
use crate::value_objects::{EmailAddress, ProfileId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by ID
    async fn find_by_id(&self, id: &ProfileId) -> RepoResult<Option<Profile>>;

    /// Find profile by the identity provider's user id
    async fn find_by_auth_user_id(&self, auth_user_id: &str) -> RepoResult<Option<Profile>>;

    /// Find profile by normalized email (case-insensitive lookup)
    async fn find_by_email(&self, email: &EmailAddress) -> RepoResult<Option<Profile>>;

    /// Create a new profile
    async fn create(&self, profile: &Profile) -> RepoResult<()>;

    /// Update an existing profile
    async fn update(&self, profile: &Profile) -> RepoResult<()>;

    /// Start a trial entitlement unless a paid subscription is already active
    async fn start_trial(&self, id: &ProfileId, ends_at: DateTime<Utc>) -> RepoResult<()>;

    /// Apply an access-pass grant: tier and the recorded grant reason
    async fn apply_access_grant(
        &self,
        id: &ProfileId,
        tier: SubscriptionTier,
        reason: &str,
    ) -> RepoResult<()>;

    /// Get the parent-configured permission record for a child profile
    async fn get_child_permissions(
        &self,
        child_id: &ProfileId,
    ) -> RepoResult<Option<ChildPermissions>>;

    /// Create or replace a child's permission record
    async fn upsert_child_permissions(&self, permissions: &ChildPermissions) -> RepoResult<()>;
}

// ============================================================================
// Invitation Repository
// ============================================================================

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Find invitation by its token
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<Invitation>>;

    /// Find invitation by row id
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invitation>>;

    /// Find a pending invitation for the (inviter, email, kind) tuple
    ///
    /// Expired rows may still be `pending` in storage; callers must apply
    /// the lazy expiry check before treating the result as live.
    async fn find_pending(
        &self,
        inviter_id: &ProfileId,
        invitee_email: &EmailAddress,
        kind: InvitationKind,
    ) -> RepoResult<Option<Invitation>>;

    /// List invitations created by a profile, newest first
    async fn find_by_inviter(&self, inviter_id: &ProfileId) -> RepoResult<Vec<Invitation>>;

    /// Create a new invitation
    async fn create(&self, invitation: &Invitation) -> RepoResult<()>;

    /// Revoke a pending invitation: pending -> revoked, conditional
    ///
    /// Returns false when the row was no longer pending.
    async fn revoke(&self, id: Uuid) -> RepoResult<bool>;

    /// Persist the lazy expiry of a pending invitation past its deadline
    async fn mark_expired(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find the active membership for a member profile
    async fn find_active_by_member(
        &self,
        member_id: &ProfileId,
    ) -> RepoResult<Option<FamilyMembership>>;

    /// List active memberships anchored at a primary parent
    async fn find_by_primary_parent(
        &self,
        primary_parent_id: &ProfileId,
    ) -> RepoResult<Vec<FamilyMembership>>;

    /// Revoke a membership: active -> revoked
    async fn revoke(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Family Graph Repository
// ============================================================================

/// Atomic state transitions for the family graph
///
/// Each method claims the invitation (conditional `pending -> accepted`)
/// and mutates the graph in a single transaction. A partial link - one
/// profile pointing at the other but not vice versa - must be impossible.
#[async_trait]
pub trait FamilyGraphRepository: Send + Sync {
    /// Link two parent profiles as co-parents and consume the invitation
    ///
    /// Fails with `AlreadyAccepted` when the token was claimed concurrently,
    /// and `AlreadyLinked` when either profile already has a co-parent.
    async fn link_co_parents(
        &self,
        token: &str,
        accepter_id: &ProfileId,
        inviter_id: &ProfileId,
    ) -> RepoResult<()>;

    /// Insert a third-party membership and consume the invitation
    async fn attach_third_party(
        &self,
        token: &str,
        membership: &FamilyMembership,
    ) -> RepoResult<()>;
}

// ============================================================================
// Access Pass Repository
// ============================================================================

#[async_trait]
pub trait AccessPassRepository: Send + Sync {
    /// Find a pass by the hash of its code
    async fn find_by_code_hash(&self, code_hash: &str) -> RepoResult<Option<AccessPass>>;

    /// Create a new pass
    async fn create(&self, pass: &AccessPass) -> RepoResult<()>;

    /// Atomically claim one redemption
    ///
    /// The increment and the cap/active/expiry checks are a single
    /// conditional update; two concurrent redemptions of a pass with one
    /// slot left must yield exactly one `true`.
    async fn try_redeem(&self, id: Uuid, now: DateTime<Utc>) -> RepoResult<bool>;

    /// Deactivate a pass
    async fn deactivate(&self, id: Uuid) -> RepoResult<()>;
}
