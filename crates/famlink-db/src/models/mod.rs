//! Database models with SQLx `FromRow` derives

mod access_pass;
mod child_permissions;
mod invitation;
mod membership;
mod profile;

pub use access_pass::AccessPassModel;
pub use child_permissions::ChildPermissionsModel;
pub use invitation::InvitationModel;
pub use membership::FamilyMembershipModel;
pub use profile::ProfileModel;
