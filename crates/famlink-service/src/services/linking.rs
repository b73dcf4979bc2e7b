//! Linking service
//!
//! Owns invitation acceptance: the conditional claim plus the graph
//! mutation, followed by best-effort side effects (trial grant,
//! notifications). The durable transition commits before any side effect
//! runs, and a side-effect failure never unwinds it.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use famlink_common::VerifiedIdentity;
use famlink_core::entities::{AccountRole, FamilyMembership, InvitationKind, InvitationResolution};
use famlink_core::error::DomainError;
use famlink_core::traits::NotificationEvent;
use famlink_core::value_objects::ProfileId;

use crate::dto::AcceptInvitationResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Premium trial granted to both parents when a co-parent link forms
const LINK_TRIAL_DAYS: i64 = 14;

/// Linking service
pub struct LinkingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LinkingService<'a> {
    /// Create a new LinkingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Accept an invitation token on behalf of the verified caller
    #[instrument(skip(self, token, identity))]
    pub async fn accept_invitation(
        &self,
        token: &str,
        identity: &VerifiedIdentity,
    ) -> ServiceResult<AcceptInvitationResponse> {
        let invitation = self
            .ctx
            .invitation_repo()
            .find_by_token(token)
            .await?
            .ok_or(DomainError::InvitationNotFound)?;

        let accepter = self
            .ctx
            .profile_repo()
            .find_by_auth_user_id(&identity.auth_user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Profile", identity.auth_user_id.clone())
            })?;

        // Resolution re-runs here even if the caller resolved moments ago;
        // status and expiry are time-dependent.
        let (inviter_id, kind) =
            match invitation.resolve(Utc::now(), Some(&identity.email)) {
                InvitationResolution::Valid {
                    inviter_id, kind, ..
                } => (inviter_id, kind),
                InvitationResolution::Expired => {
                    if let Err(e) = self.ctx.invitation_repo().mark_expired(invitation.id).await {
                        warn!(invitation_id = %invitation.id, error = %e, "Failed to persist expiry");
                    }
                    return Err(DomainError::InvitationExpired.into());
                }
                InvitationResolution::AlreadyAccepted => {
                    return Err(DomainError::AlreadyAccepted.into());
                }
                InvitationResolution::EmailMismatch => {
                    return Err(DomainError::EmailMismatch.into());
                }
                InvitationResolution::Invalid => {
                    return Err(DomainError::InvitationRevoked.into());
                }
            };

        if accepter.id == inviter_id {
            return Err(ServiceError::validation(
                "Cannot accept your own invitation",
            ));
        }

        let inviter = self
            .ctx
            .profile_repo()
            .find_by_id(&inviter_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(inviter_id.clone()))?;

        match kind {
            InvitationKind::CoParent => {
                self.link_co_parents(token, &accepter.id, &inviter.id).await?;

                self.grant_link_trial(&accepter.id).await;
                self.grant_link_trial(&inviter.id).await;
                self.notify(
                    &inviter.id,
                    NotificationEvent::CoParentLinked {
                        partner_id: accepter.id.clone(),
                        partner_name: accepter.display_name.clone(),
                    },
                )
                .await;

                Ok(AcceptInvitationResponse {
                    kind,
                    co_parent_id: Some(inviter.id),
                    primary_parent_id: None,
                })
            }
            InvitationKind::ThirdParty => {
                if accepter.role == AccountRole::Child {
                    return Err(ServiceError::validation(
                        "Child accounts cannot accept invitations",
                    ));
                }

                let membership = FamilyMembership::new(accepter.id.clone(), &inviter);

                if self
                    .ctx
                    .membership_repo()
                    .find_active_by_member(&accepter.id)
                    .await?
                    .is_some()
                {
                    return Err(DomainError::AlreadyFamilyMember.into());
                }

                self.ctx
                    .family_graph_repo()
                    .attach_third_party(token, &membership)
                    .await?;

                info!(
                    member_id = %membership.member_id,
                    primary_parent_id = %membership.primary_parent_id,
                    "Third-party member joined family"
                );

                let event = NotificationEvent::FamilyMemberJoined {
                    member_id: accepter.id.clone(),
                    member_name: accepter.display_name.clone(),
                };
                self.notify(&inviter.id, event.clone()).await;
                if let Some(partner_id) = &inviter.co_parent_id {
                    self.notify(partner_id, event).await;
                }

                Ok(AcceptInvitationResponse {
                    kind,
                    co_parent_id: None,
                    primary_parent_id: Some(membership.primary_parent_id),
                })
            }
        }
    }

    /// Run the atomic co-parent link after the role and slot pre-checks
    async fn link_co_parents(
        &self,
        token: &str,
        accepter_id: &ProfileId,
        inviter_id: &ProfileId,
    ) -> ServiceResult<()> {
        let accepter = self
            .ctx
            .profile_repo()
            .find_by_id(accepter_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(accepter_id.clone()))?;

        if accepter.role != AccountRole::Parent {
            return Err(DomainError::NotAParent.into());
        }
        // Pre-checks for a clean error message; the conditional updates
        // inside the transaction are the authoritative guard.
        if accepter.is_linked() {
            return Err(DomainError::AlreadyLinked.into());
        }

        self.ctx
            .family_graph_repo()
            .link_co_parents(token, accepter_id, inviter_id)
            .await?;

        info!(
            accepter_id = %accepter_id,
            inviter_id = %inviter_id,
            "Co-parent link established"
        );
        Ok(())
    }

    /// Best-effort trial grant after a successful link
    async fn grant_link_trial(&self, profile_id: &ProfileId) {
        let ends_at = Utc::now() + Duration::days(LINK_TRIAL_DAYS);
        if let Err(e) = self.ctx.profile_repo().start_trial(profile_id, ends_at).await {
            warn!(profile_id = %profile_id, error = %e, "Failed to start link trial");
        }
    }

    /// Best-effort notification dispatch
    async fn notify(&self, target: &ProfileId, event: NotificationEvent) {
        if let Err(e) = self.ctx.notifier().notify(target, event).await {
            warn!(target = %target, error = %e, "Notification dispatch failed");
        }
    }
}
