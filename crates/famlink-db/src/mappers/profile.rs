//! Profile entity <-> model mapper

use famlink_core::entities::{AccountRole, Profile, SubscriptionStatus, SubscriptionTier};
use famlink_core::value_objects::{EmailAddress, ProfileId};
use famlink_core::DomainError;

use crate::models::ProfileModel;

use super::bad_enum;

impl TryFrom<ProfileModel> for Profile {
    type Error = DomainError;

    fn try_from(model: ProfileModel) -> Result<Self, Self::Error> {
        let role =
            AccountRole::parse(&model.role).ok_or_else(|| bad_enum("role", &model.role))?;
        let subscription_tier = SubscriptionTier::parse(&model.subscription_tier)
            .ok_or_else(|| bad_enum("subscription_tier", &model.subscription_tier))?;
        let subscription_status = SubscriptionStatus::parse(&model.subscription_status)
            .ok_or_else(|| bad_enum("subscription_status", &model.subscription_status))?;

        Ok(Profile {
            id: ProfileId::from(model.id),
            auth_user_id: model.auth_user_id,
            email: EmailAddress::new(model.email),
            display_name: model.display_name,
            co_parent_id: model.co_parent_id.map(ProfileId::from),
            role,
            subscription_tier,
            subscription_status,
            trial_ends_at: model.trial_ends_at,
            is_admin: model.is_admin,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
