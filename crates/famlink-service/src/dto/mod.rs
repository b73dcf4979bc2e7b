//! Data transfer objects for the service layer

mod requests;
mod responses;

pub use requests::{
    CreateAccessPassRequest, CreateInvitationRequest, RedeemAccessPassRequest,
    UpdateChildPermissionsRequest,
};
pub use responses::{
    AcceptInvitationResponse, CapabilitiesResponse, CreateAccessPassResponse, InvitationResponse,
    RedeemAccessPassResponse, ResolveInvitationResponse,
};
