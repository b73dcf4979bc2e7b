//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{access_passes, capabilities, health, invitations};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (mounted outside /api/v1)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(invitation_routes())
        .merge(capability_routes())
        .merge(access_pass_routes())
}

/// Invitation routes
fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route("/invitations", post(invitations::create_invitation))
        .route("/invitations", get(invitations::list_invitations))
        .route("/invitations/:token", get(invitations::resolve_invitation))
        .route(
            "/invitations/:token/accept",
            post(invitations::accept_invitation),
        )
        .route(
            "/invitations/:invitation_id/resend",
            post(invitations::resend_invitation),
        )
        .route(
            "/invitations/:invitation_id",
            delete(invitations::revoke_invitation),
        )
}

/// Capability routes
fn capability_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me/capabilities", get(capabilities::get_capabilities))
        .route(
            "/users/:child_id/permissions",
            put(capabilities::set_child_permissions),
        )
}

/// Access pass routes
fn access_pass_routes() -> Router<AppState> {
    Router::new()
        .route("/access-passes/redeem", post(access_passes::redeem_access_pass))
        .route("/access-passes", post(access_passes::create_access_pass))
        .route(
            "/access-passes/:pass_id",
            delete(access_passes::deactivate_access_pass),
        )
}
