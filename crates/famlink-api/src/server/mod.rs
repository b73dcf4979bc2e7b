//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use famlink_common::{AppConfig, AppError, IdentityVerifier};
use famlink_db::{
    create_pool, PgAccessPassRepository, PgFamilyGraphRepository, PgInvitationRepository,
    PgMembershipRepository, PgProfileRepository,
};
use famlink_service::{ServiceContextBuilder, TracingInviteDelivery, TracingNotifier};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = state.config().cors.clone();
    let is_production = state.config().app.env.is_production();

    let router = create_router().merge(health_routes());
    let router = apply_middleware_with_config(router, &cors, is_production);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = famlink_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create identity verifier
    let identity_verifier = Arc::new(IdentityVerifier::new(
        &config.identity.jwt_secret,
        config.identity.issuer.as_deref(),
    ));

    // Create repositories
    let profile_repo = Arc::new(PgProfileRepository::new(pool.clone()));
    let invitation_repo = Arc::new(PgInvitationRepository::new(pool.clone()));
    let membership_repo = Arc::new(PgMembershipRepository::new(pool.clone()));
    let family_graph_repo = Arc::new(PgFamilyGraphRepository::new(pool.clone()));
    let access_pass_repo = Arc::new(PgAccessPassRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .profile_repo(profile_repo)
        .invitation_repo(invitation_repo)
        .membership_repo(membership_repo)
        .family_graph_repo(family_graph_repo)
        .access_pass_repo(access_pass_repo)
        .invite_delivery(Arc::new(TracingInviteDelivery))
        .notifier(Arc::new(TracingNotifier))
        .invite_config(config.invite.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(
        service_context,
        identity_verifier,
        config,
        pool,
    ))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
