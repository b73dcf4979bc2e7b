//! Service layer - use cases over the domain layer

mod access_pass;
mod context;
mod delivery;
mod error;
mod invitation;
mod linking;
mod permission;

pub use access_pass::AccessPassService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use delivery::{TracingInviteDelivery, TracingNotifier};
pub use error::{ServiceError, ServiceResult};
pub use invitation::InvitationService;
pub use linking::LinkingService;
pub use permission::PermissionService;
