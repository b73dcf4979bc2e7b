//! Access pass handlers
//!
//! Redemption for any profile; creation and deactivation for admins.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use famlink_service::dto::{
    CreateAccessPassRequest, CreateAccessPassResponse, RedeemAccessPassRequest,
    RedeemAccessPassResponse,
};
use famlink_service::AccessPassService;

use crate::extractors::CurrentProfile;
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Redeem an access pass code
///
/// POST /access-passes/redeem
pub async fn redeem_access_pass(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Json(request): Json<RedeemAccessPassRequest>,
) -> ApiResult<Json<RedeemAccessPassResponse>> {
    let service = AccessPassService::new(state.service_context());
    let response = service.redeem(&caller.profile.id, request).await?;
    Ok(Json(response))
}

/// Create an access pass (admin only)
///
/// POST /access-passes
pub async fn create_access_pass(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Json(request): Json<CreateAccessPassRequest>,
) -> ApiResult<Created<Json<CreateAccessPassResponse>>> {
    let service = AccessPassService::new(state.service_context());
    let response = service.create_pass(&caller.profile.id, request).await?;
    Ok(Created(Json(response)))
}

/// Deactivate an access pass (admin only)
///
/// DELETE /access-passes/{pass_id}
pub async fn deactivate_access_pass(
    State(state): State<AppState>,
    caller: CurrentProfile,
    Path(pass_id): Path<String>,
) -> ApiResult<NoContent> {
    let pass_id: Uuid = pass_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid pass_id format"))?;

    let service = AccessPassService::new(state.service_context());
    service.deactivate_pass(&caller.profile.id, pass_id).await?;
    Ok(NoContent)
}
