//! Test environment wiring

use std::sync::Arc;

use famlink_common::{InviteConfig, VerifiedIdentity};
use famlink_core::entities::Profile;
use famlink_core::traits::InviteDelivery;
use famlink_service::{ServiceContext, ServiceContextBuilder};

use crate::fixtures::{InMemoryBackend, RecordingDelivery, RecordingNotifier};

/// A fully wired service context over the in-memory backend
pub struct TestEnv {
    pub backend: InMemoryBackend,
    pub delivery: RecordingDelivery,
    pub notifier: RecordingNotifier,
    pub ctx: ServiceContext,
}

impl TestEnv {
    /// Environment with recording delivery and notifier ports
    pub fn new() -> Self {
        let backend = InMemoryBackend::new();
        let delivery = RecordingDelivery::default();
        let notifier = RecordingNotifier::default();
        let ctx = build_context(&backend, Arc::new(delivery.clone()), &notifier);
        Self {
            backend,
            delivery,
            notifier,
            ctx,
        }
    }

    /// Environment whose email delivery always fails
    pub fn with_failing_delivery() -> Self {
        let backend = InMemoryBackend::new();
        let delivery = RecordingDelivery::default();
        let notifier = RecordingNotifier::default();
        let ctx = build_context(
            &backend,
            Arc::new(crate::fixtures::FailingDelivery),
            &notifier,
        );
        Self {
            backend,
            delivery,
            notifier,
            ctx,
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn build_context(
    backend: &InMemoryBackend,
    delivery: Arc<dyn InviteDelivery>,
    notifier: &RecordingNotifier,
) -> ServiceContext {
    ServiceContextBuilder::new()
        .profile_repo(Arc::new(backend.clone()))
        .invitation_repo(Arc::new(backend.clone()))
        .membership_repo(Arc::new(backend.clone()))
        .family_graph_repo(Arc::new(backend.clone()))
        .access_pass_repo(Arc::new(backend.clone()))
        .invite_delivery(delivery)
        .notifier(Arc::new(notifier.clone()))
        .invite_config(InviteConfig {
            share_base_url: "https://app.famlink.test".to_string(),
        })
        .build()
        .expect("all context dependencies provided")
}

/// Verified identity matching a seeded profile
pub fn identity_for(profile: &Profile) -> VerifiedIdentity {
    VerifiedIdentity {
        auth_user_id: profile.auth_user_id.clone(),
        email: profile.email.clone(),
    }
}
