//! Capability handlers
//!
//! Endpoints for resolving the calling profile's capability set and
//! configuring a child's permission record.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use famlink_core::entities::ChildPermissions;
use famlink_core::value_objects::ProfileId;
use famlink_service::dto::{CapabilitiesResponse, UpdateChildPermissionsRequest};
use famlink_service::PermissionService;

use crate::extractors::CurrentProfile;
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Get the caller's resolved capabilities
///
/// GET /users/@me/capabilities
pub async fn get_capabilities(
    State(state): State<AppState>,
    caller: CurrentProfile,
) -> ApiResult<Json<CapabilitiesResponse>> {
    let service = PermissionService::new(state.service_context());
    let response = service.capabilities(&caller.profile.id).await?;
    Ok(Json(response))
}

/// Replace a child's permission record
///
/// PUT /users/{child_id}/permissions
pub async fn set_child_permissions(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Path(child_id): Path<String>,
    Json(request): Json<UpdateChildPermissionsRequest>,
) -> ApiResult<NoContent> {
    let permissions = ChildPermissions {
        child_id: ProfileId::from(child_id),
        can_send_messages: request.can_send_messages,
        can_mood_checkin: request.can_mood_checkin,
        can_view_schedule_details: request.can_view_schedule_details,
        can_write_journal: request.can_write_journal,
        updated_at: Utc::now(),
    };

    let service = PermissionService::new(state.service_context());
    service
        .set_child_permissions(&caller.profile.id, permissions)
        .await?;
    Ok(NoContent)
}
