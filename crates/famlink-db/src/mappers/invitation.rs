//! Invitation entity <-> model mapper

use famlink_core::entities::{Invitation, InvitationKind, InvitationStatus};
use famlink_core::value_objects::{EmailAddress, ProfileId};
use famlink_core::DomainError;

use crate::models::InvitationModel;

use super::bad_enum;

impl TryFrom<InvitationModel> for Invitation {
    type Error = DomainError;

    fn try_from(model: InvitationModel) -> Result<Self, Self::Error> {
        let kind =
            InvitationKind::parse(&model.kind).ok_or_else(|| bad_enum("kind", &model.kind))?;
        let status = InvitationStatus::parse(&model.status)
            .ok_or_else(|| bad_enum("status", &model.status))?;

        Ok(Invitation {
            id: model.id,
            token: model.token,
            inviter_id: ProfileId::from(model.inviter_id),
            invitee_email: EmailAddress::new(model.invitee_email),
            kind,
            status,
            created_at: model.created_at,
            expires_at: model.expires_at,
        })
    }
}
