//! Access pass service
//!
//! Admin-issued grant codes with a redemption cap. Redemption is a
//! conditional increment at the storage layer; this service classifies the
//! terminal states around it and applies the grant afterwards.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use famlink_core::entities::{generate_access_code, hash_access_code, AccessPass};
use famlink_core::error::DomainError;
use famlink_core::value_objects::ProfileId;

use crate::dto::{
    CreateAccessPassRequest, CreateAccessPassResponse, RedeemAccessPassRequest,
    RedeemAccessPassResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Access pass service
pub struct AccessPassService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessPassService<'a> {
    /// Create a new AccessPassService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new pass (admin only); returns the plaintext code once
    #[instrument(skip(self, request))]
    pub async fn create_pass(
        &self,
        admin_id: &ProfileId,
        request: CreateAccessPassRequest,
    ) -> ServiceResult<CreateAccessPassResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        self.require_admin(admin_id).await?;

        let code = generate_access_code();
        let pass = AccessPass::new(
            &code,
            request.label,
            request.audience,
            request.grant_reason,
            request.grant_tier,
            request.max_redemptions,
            request.expires_at,
        );

        self.ctx.access_pass_repo().create(&pass).await?;

        info!(
            pass_id = %pass.id,
            label = %pass.label,
            max_redemptions = pass.max_redemptions,
            "Access pass created"
        );

        Ok(CreateAccessPassResponse {
            id: pass.id,
            code,
            code_preview: pass.code_preview,
            label: pass.label,
            max_redemptions: pass.max_redemptions,
            expires_at: pass.expires_at,
        })
    }

    /// Redeem a pass code for the calling profile
    #[instrument(skip(self, request))]
    pub async fn redeem(
        &self,
        profile_id: &ProfileId,
        request: RedeemAccessPassRequest,
    ) -> ServiceResult<RedeemAccessPassResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(profile_id.clone()))?;

        let code_hash = hash_access_code(&request.code);
        let pass = self
            .ctx
            .access_pass_repo()
            .find_by_code_hash(&code_hash)
            .await?
            .ok_or(DomainError::AccessPassNotFound)?;

        let now = Utc::now();
        Self::classify(&pass, now)?;

        // The read above is advisory; the conditional increment decides. A
        // false return means another redemption won the last slot (or the
        // pass flipped) between the read and the update.
        let claimed = self.ctx.access_pass_repo().try_redeem(pass.id, now).await?;
        if !claimed {
            let current = self
                .ctx
                .access_pass_repo()
                .find_by_code_hash(&code_hash)
                .await?
                .ok_or(DomainError::AccessPassNotFound)?;
            Self::classify(&current, Utc::now())?;
            return Err(DomainError::AccessPassExhausted.into());
        }

        self.ctx
            .profile_repo()
            .apply_access_grant(&profile.id, pass.grant_tier, &pass.grant_reason)
            .await?;

        info!(
            pass_id = %pass.id,
            profile_id = %profile.id,
            tier = pass.grant_tier.as_str(),
            "Access pass redeemed"
        );

        Ok(RedeemAccessPassResponse {
            granted_tier: pass.grant_tier,
            label: pass.label,
        })
    }

    /// Deactivate a pass (admin only)
    #[instrument(skip(self))]
    pub async fn deactivate_pass(&self, admin_id: &ProfileId, pass_id: Uuid) -> ServiceResult<()> {
        self.require_admin(admin_id).await?;
        self.ctx.access_pass_repo().deactivate(pass_id).await?;
        info!(pass_id = %pass_id, "Access pass deactivated");
        Ok(())
    }

    /// Map a non-redeemable pass to its terminal error
    fn classify(pass: &AccessPass, now: chrono::DateTime<Utc>) -> ServiceResult<()> {
        if !pass.active {
            return Err(DomainError::AccessPassInactive.into());
        }
        if pass.is_expired(now) {
            return Err(DomainError::AccessPassExpired.into());
        }
        if pass.is_exhausted() {
            return Err(DomainError::AccessPassExhausted.into());
        }
        Ok(())
    }

    async fn require_admin(&self, profile_id: &ProfileId) -> ServiceResult<()> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(profile_id.clone()))?;

        if !profile.is_admin {
            return Err(ServiceError::permission_denied("canAccessAdmin"));
        }
        Ok(())
    }
}
