//! Invitation service
//!
//! Issues, resends, revokes, and resolves invitation tokens. Acceptance is
//! delegated to the linking service, which owns the atomic graph mutation.

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use famlink_common::VerifiedIdentity;
use famlink_core::entities::{AccountRole, Invitation, InvitationKind, InvitationResolution};
use famlink_core::error::DomainError;
use famlink_core::value_objects::{EmailAddress, ProfileId};

use crate::dto::{CreateInvitationRequest, InvitationResponse, ResolveInvitationResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Invitation service
pub struct InvitationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvitationService<'a> {
    /// Create a new InvitationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a new invitation from a parent profile
    #[instrument(skip(self, request))]
    pub async fn create_invitation(
        &self,
        inviter_id: &ProfileId,
        request: CreateInvitationRequest,
    ) -> ServiceResult<InvitationResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let inviter = self
            .ctx
            .profile_repo()
            .find_by_id(inviter_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(inviter_id.clone()))?;

        if inviter.role != AccountRole::Parent {
            return Err(DomainError::NotAParent.into());
        }

        let invitee_email = EmailAddress::new(&request.invitee_email);
        if invitee_email == inviter.email {
            return Err(ServiceError::validation(
                "Cannot send an invitation to your own email",
            ));
        }

        // A linked parent has no co-parent slot left to offer.
        if request.kind == InvitationKind::CoParent && inviter.is_linked() {
            return Err(DomainError::AlreadyLinked.into());
        }

        // One live invitation per (inviter, email, kind). An expired row that
        // storage still shows as pending does not count; it gets flipped
        // here so the unique index frees the slot.
        if let Some(existing) = self
            .ctx
            .invitation_repo()
            .find_pending(&inviter.id, &invitee_email, request.kind)
            .await?
        {
            if existing.is_expired(Utc::now()) {
                self.ctx.invitation_repo().mark_expired(existing.id).await?;
            } else {
                return Err(DomainError::DuplicateInvitation.into());
            }
        }

        let invitation = Invitation::new(inviter.id.clone(), invitee_email, request.kind);
        self.ctx.invitation_repo().create(&invitation).await?;

        info!(
            invitation_id = %invitation.id,
            inviter_id = %inviter.id,
            kind = invitation.kind.as_str(),
            "Invitation created"
        );

        self.deliver(&invitation, &inviter.display_name).await;

        let share_link = self.ctx.invite_config().share_link(&invitation.token);
        Ok(InvitationResponse::from_invitation(&invitation, share_link))
    }

    /// Re-send the email for a pending invitation
    #[instrument(skip(self))]
    pub async fn resend_invitation(
        &self,
        inviter_id: &ProfileId,
        invitation_id: Uuid,
    ) -> ServiceResult<InvitationResponse> {
        let invitation = self.owned_invitation(inviter_id, invitation_id).await?;

        match invitation.resolve(Utc::now(), None) {
            InvitationResolution::Valid { .. } => {}
            InvitationResolution::Expired => {
                self.ctx
                    .invitation_repo()
                    .mark_expired(invitation.id)
                    .await?;
                return Err(DomainError::InvitationExpired.into());
            }
            InvitationResolution::AlreadyAccepted => {
                return Err(DomainError::AlreadyAccepted.into());
            }
            _ => return Err(DomainError::InvitationRevoked.into()),
        }

        let inviter = self
            .ctx
            .profile_repo()
            .find_by_id(inviter_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(inviter_id.clone()))?;

        self.deliver(&invitation, &inviter.display_name).await;

        let share_link = self.ctx.invite_config().share_link(&invitation.token);
        Ok(InvitationResponse::from_invitation(&invitation, share_link))
    }

    /// Revoke a pending invitation
    #[instrument(skip(self))]
    pub async fn revoke_invitation(
        &self,
        inviter_id: &ProfileId,
        invitation_id: Uuid,
    ) -> ServiceResult<()> {
        let invitation = self.owned_invitation(inviter_id, invitation_id).await?;

        let revoked = self.ctx.invitation_repo().revoke(invitation.id).await?;
        if !revoked {
            return Err(ServiceError::conflict("Invitation is no longer pending"));
        }

        info!(invitation_id = %invitation.id, "Invitation revoked");
        Ok(())
    }

    /// List invitations created by a profile, newest first
    #[instrument(skip(self))]
    pub async fn list_invitations(
        &self,
        inviter_id: &ProfileId,
    ) -> ServiceResult<Vec<InvitationResponse>> {
        let invitations = self
            .ctx
            .invitation_repo()
            .find_by_inviter(inviter_id)
            .await?;

        Ok(invitations
            .iter()
            .map(|inv| {
                let share_link = self.ctx.invite_config().share_link(&inv.token);
                InvitationResponse::from_invitation(inv, share_link)
            })
            .collect())
    }

    /// Resolve a token for display before the caller commits to accept
    ///
    /// Unknown tokens resolve to `invalid` rather than a 404: the token is a
    /// credential, and the resolver must not confirm which tokens exist.
    #[instrument(skip(self, token, identity))]
    pub async fn resolve_invitation(
        &self,
        token: &str,
        identity: Option<&VerifiedIdentity>,
    ) -> ServiceResult<ResolveInvitationResponse> {
        let Some(invitation) = self.ctx.invitation_repo().find_by_token(token).await? else {
            return Ok(ResolveInvitationResponse::terminal("invalid"));
        };

        let verified_email = identity.map(|i| &i.email);
        match invitation.resolve(Utc::now(), verified_email) {
            InvitationResolution::Valid { inviter_id, kind, .. } => {
                let inviter_name = self
                    .ctx
                    .profile_repo()
                    .find_by_id(&inviter_id)
                    .await?
                    .map(|p| p.display_name)
                    .unwrap_or_default();
                Ok(ResolveInvitationResponse::valid(kind, inviter_name))
            }
            InvitationResolution::Expired => {
                // Lazy expiry: persist the flip now that it has been observed.
                if let Err(e) = self.ctx.invitation_repo().mark_expired(invitation.id).await {
                    warn!(invitation_id = %invitation.id, error = %e, "Failed to persist expiry");
                }
                Ok(ResolveInvitationResponse::terminal("expired"))
            }
            InvitationResolution::AlreadyAccepted => {
                Ok(ResolveInvitationResponse::terminal("already_accepted"))
            }
            InvitationResolution::EmailMismatch => {
                Ok(ResolveInvitationResponse::terminal("email_mismatch"))
            }
            InvitationResolution::Invalid => Ok(ResolveInvitationResponse::terminal("invalid")),
        }
    }

    /// Load an invitation and check the caller created it
    async fn owned_invitation(
        &self,
        inviter_id: &ProfileId,
        invitation_id: Uuid,
    ) -> ServiceResult<Invitation> {
        let invitation = self
            .ctx
            .invitation_repo()
            .find_by_id(invitation_id)
            .await?
            .ok_or(DomainError::InvitationNotFound)?;

        if invitation.inviter_id != *inviter_id {
            // Do not leak whether the invitation exists.
            return Err(DomainError::InvitationNotFound.into());
        }

        Ok(invitation)
    }

    /// Best-effort email delivery; failure never rolls back the invitation
    async fn deliver(&self, invitation: &Invitation, inviter_name: &str) {
        if let Err(e) = self
            .ctx
            .invite_delivery()
            .send_invitation(&invitation.invitee_email, inviter_name, &invitation.token)
            .await
        {
            warn!(
                invitation_id = %invitation.id,
                error = %e,
                "Invitation email delivery failed; share link remains usable"
            );
        }
    }
}
