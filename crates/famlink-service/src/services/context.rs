//! Service context - dependency container for services
//!
//! Holds the repository and delivery ports every service borrows. The
//! context carries trait objects only, so tests can build one from
//! in-memory implementations without a database.

use std::sync::Arc;

use famlink_common::InviteConfig;
use famlink_core::traits::{
    AccessPassRepository, FamilyGraphRepository, InvitationRepository, InviteDelivery,
    MembershipRepository, Notifier, ProfileRepository,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    profile_repo: Arc<dyn ProfileRepository>,
    invitation_repo: Arc<dyn InvitationRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    family_graph_repo: Arc<dyn FamilyGraphRepository>,
    access_pass_repo: Arc<dyn AccessPassRepository>,

    invite_delivery: Arc<dyn InviteDelivery>,
    notifier: Arc<dyn Notifier>,

    invite_config: InviteConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        profile_repo: Arc<dyn ProfileRepository>,
        invitation_repo: Arc<dyn InvitationRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        family_graph_repo: Arc<dyn FamilyGraphRepository>,
        access_pass_repo: Arc<dyn AccessPassRepository>,
        invite_delivery: Arc<dyn InviteDelivery>,
        notifier: Arc<dyn Notifier>,
        invite_config: InviteConfig,
    ) -> Self {
        Self {
            profile_repo,
            invitation_repo,
            membership_repo,
            family_graph_repo,
            access_pass_repo,
            invite_delivery,
            notifier,
            invite_config,
        }
    }

    // === Repositories ===

    /// Get the profile repository
    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the invitation repository
    pub fn invitation_repo(&self) -> &dyn InvitationRepository {
        self.invitation_repo.as_ref()
    }

    /// Get the membership repository
    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    /// Get the family graph repository
    pub fn family_graph_repo(&self) -> &dyn FamilyGraphRepository {
        self.family_graph_repo.as_ref()
    }

    /// Get the access pass repository
    pub fn access_pass_repo(&self) -> &dyn AccessPassRepository {
        self.access_pass_repo.as_ref()
    }

    // === Delivery ports ===

    /// Get the invitation email delivery port
    pub fn invite_delivery(&self) -> &dyn InviteDelivery {
        self.invite_delivery.as_ref()
    }

    /// Get the notification dispatch port
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    // === Configuration ===

    /// Get the invitation configuration
    pub fn invite_config(&self) -> &InviteConfig {
        &self.invite_config
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("delivery", &"...")
            .field("invite_config", &self.invite_config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    invitation_repo: Option<Arc<dyn InvitationRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    family_graph_repo: Option<Arc<dyn FamilyGraphRepository>>,
    access_pass_repo: Option<Arc<dyn AccessPassRepository>>,
    invite_delivery: Option<Arc<dyn InviteDelivery>>,
    notifier: Option<Arc<dyn Notifier>>,
    invite_config: Option<InviteConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn invitation_repo(mut self, repo: Arc<dyn InvitationRepository>) -> Self {
        self.invitation_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn family_graph_repo(mut self, repo: Arc<dyn FamilyGraphRepository>) -> Self {
        self.family_graph_repo = Some(repo);
        self
    }

    pub fn access_pass_repo(mut self, repo: Arc<dyn AccessPassRepository>) -> Self {
        self.access_pass_repo = Some(repo);
        self
    }

    pub fn invite_delivery(mut self, delivery: Arc<dyn InviteDelivery>) -> Self {
        self.invite_delivery = Some(delivery);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn invite_config(mut self, config: InviteConfig) -> Self {
        self.invite_config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.profile_repo
                .ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            self.invitation_repo
                .ok_or_else(|| ServiceError::validation("invitation_repo is required"))?,
            self.membership_repo
                .ok_or_else(|| ServiceError::validation("membership_repo is required"))?,
            self.family_graph_repo
                .ok_or_else(|| ServiceError::validation("family_graph_repo is required"))?,
            self.access_pass_repo
                .ok_or_else(|| ServiceError::validation("access_pass_repo is required"))?,
            self.invite_delivery
                .ok_or_else(|| ServiceError::validation("invite_delivery is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
            self.invite_config
                .ok_or_else(|| ServiceError::validation("invite_config is required"))?,
        ))
    }
}
