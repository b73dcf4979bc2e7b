//! Permission service
//!
//! Resolves the capability set for a profile from its account role. Pure
//! derivation: the only storage read beyond the profile itself is the
//! child-permission record.

use chrono::Utc;
use tracing::instrument;

use famlink_core::entities::{AccountRole, ChildPermissions};
use famlink_core::error::DomainError;
use famlink_core::value_objects::{Capabilities, ProfileId};

use crate::dto::CapabilitiesResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Permission service
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve capabilities for a profile
    #[instrument(skip(self))]
    pub async fn capabilities(&self, profile_id: &ProfileId) -> ServiceResult<CapabilitiesResponse> {
        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(profile_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(profile_id.clone()))?;

        let capabilities = match profile.role {
            AccountRole::Parent => {
                Capabilities::for_parent(profile.has_premium_access(Utc::now()), profile.is_admin)
            }
            AccountRole::Child => {
                let permissions = self
                    .ctx
                    .profile_repo()
                    .get_child_permissions(&profile.id)
                    .await?
                    .unwrap_or_else(|| ChildPermissions::default_for(profile.id.clone()));
                Capabilities::for_child(&permissions)
            }
            AccountRole::ThirdParty => Capabilities::for_third_party(),
        };

        Ok(CapabilitiesResponse {
            profile_id: profile.id,
            capabilities,
        })
    }

    /// Update the permission record for a child in the caller's family
    #[instrument(skip(self, permissions))]
    pub async fn set_child_permissions(
        &self,
        parent_id: &ProfileId,
        permissions: ChildPermissions,
    ) -> ServiceResult<()> {
        let parent = self
            .ctx
            .profile_repo()
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(parent_id.clone()))?;

        if parent.role != AccountRole::Parent {
            return Err(DomainError::NotAParent.into());
        }

        let child = self
            .ctx
            .profile_repo()
            .find_by_id(&permissions.child_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(permissions.child_id.clone()))?;

        if child.role != AccountRole::Child {
            return Err(super::error::ServiceError::validation(
                "Permission records only apply to child profiles",
            ));
        }

        self.ctx
            .profile_repo()
            .upsert_child_permissions(&permissions)
            .await?;

        Ok(())
    }
}
