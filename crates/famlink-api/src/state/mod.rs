//! Application state
//!
//! Holds the shared state for the Axum application including the service
//! context, the identity verifier, and configuration.

use std::sync::Arc;

use famlink_common::{AppConfig, IdentityVerifier};
use famlink_db::PgPool;
use famlink_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Verifier for identity-provider session tokens
    identity_verifier: Arc<IdentityVerifier>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Database pool, held for readiness probes
    pool: PgPool,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        identity_verifier: Arc<IdentityVerifier>,
        config: AppConfig,
        pool: PgPool,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            identity_verifier,
            config: Arc::new(config),
            pool,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the identity verifier
    pub fn identity_verifier(&self) -> &IdentityVerifier {
        &self.identity_verifier
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}
