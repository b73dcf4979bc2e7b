//! Invitation handlers
//!
//! Endpoints for issuing, listing, resolving, accepting, and revoking
//! invitations.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use famlink_service::dto::{
    AcceptInvitationResponse, CreateInvitationRequest, InvitationResponse,
    ResolveInvitationResponse,
};
use famlink_service::{InvitationService, LinkingService};

use crate::extractors::{CurrentProfile, OptionalAuthIdentity};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create an invitation
///
/// POST /invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Json(request): Json<CreateInvitationRequest>,
) -> ApiResult<Created<Json<InvitationResponse>>> {
    let service = InvitationService::new(state.service_context());
    let response = service
        .create_invitation(&caller.profile.id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List invitations created by the caller
///
/// GET /invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    caller: CurrentProfile,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let service = InvitationService::new(state.service_context());
    let invitations = service.list_invitations(&caller.profile.id).await?;
    Ok(Json(invitations))
}

/// Resolve an invitation token for display (auth optional)
///
/// GET /invitations/{token}
pub async fn resolve_invitation(
    State(state): State<AppState>,
    OptionalAuthIdentity(identity): OptionalAuthIdentity,
    Path(token): Path<String>,
) -> ApiResult<Json<ResolveInvitationResponse>> {
    let service = InvitationService::new(state.service_context());
    let response = service
        .resolve_invitation(&token, identity.as_ref())
        .await?;
    Ok(Json(response))
}

/// Accept an invitation token
///
/// POST /invitations/{token}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Path(token): Path<String>,
) -> ApiResult<Json<AcceptInvitationResponse>> {
    let service = LinkingService::new(state.service_context());
    let response = service.accept_invitation(&token, &caller.identity).await?;
    Ok(Json(response))
}

/// Re-send the email for a pending invitation
///
/// POST /invitations/{invitation_id}/resend
pub async fn resend_invitation(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Path(invitation_id): Path<String>,
) -> ApiResult<Json<InvitationResponse>> {
    let invitation_id = parse_invitation_id(&invitation_id)?;
    let service = InvitationService::new(state.service_context());
    let response = service
        .resend_invitation(&caller.profile.id, invitation_id)
        .await?;
    Ok(Json(response))
}

/// Revoke a pending invitation
///
/// DELETE /invitations/{invitation_id}
pub async fn revoke_invitation(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Path(invitation_id): Path<String>,
) -> ApiResult<NoContent> {
    let invitation_id = parse_invitation_id(&invitation_id)?;
    let service = InvitationService::new(state.service_context());
    service
        .revoke_invitation(&caller.profile.id, invitation_id)
        .await?;
    Ok(NoContent)
}

fn parse_invitation_id(raw: &str) -> ApiResult<Uuid> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid invitation_id format"))
}
