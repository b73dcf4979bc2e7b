//! Access pass entity <-> model mapper

use famlink_core::entities::{AccessPass, SubscriptionTier};
use famlink_core::DomainError;

use crate::models::AccessPassModel;

use super::bad_enum;

impl TryFrom<AccessPassModel> for AccessPass {
    type Error = DomainError;

    fn try_from(model: AccessPassModel) -> Result<Self, Self::Error> {
        let grant_tier = SubscriptionTier::parse(&model.grant_tier)
            .ok_or_else(|| bad_enum("grant_tier", &model.grant_tier))?;

        Ok(AccessPass {
            id: model.id,
            code_hash: model.code_hash,
            code_preview: model.code_preview,
            label: model.label,
            audience: model.audience,
            grant_reason: model.grant_reason,
            grant_tier,
            max_redemptions: model.max_redemptions,
            redeemed_count: model.redeemed_count,
            active: model.active,
            expires_at: model.expires_at,
            created_at: model.created_at,
        })
    }
}
