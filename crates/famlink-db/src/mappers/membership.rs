//! Family membership entity <-> model mapper

use famlink_core::entities::{FamilyMembership, MembershipStatus};
use famlink_core::value_objects::ProfileId;
use famlink_core::DomainError;

use crate::models::FamilyMembershipModel;

use super::bad_enum;

impl TryFrom<FamilyMembershipModel> for FamilyMembership {
    type Error = DomainError;

    fn try_from(model: FamilyMembershipModel) -> Result<Self, Self::Error> {
        let status = MembershipStatus::parse(&model.status)
            .ok_or_else(|| bad_enum("status", &model.status))?;

        Ok(FamilyMembership {
            id: model.id,
            member_id: ProfileId::from(model.member_id),
            primary_parent_id: ProfileId::from(model.primary_parent_id),
            status,
            invited_by: ProfileId::from(model.invited_by),
            accepted_at: model.accepted_at,
        })
    }
}
