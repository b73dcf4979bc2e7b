//! Domain entities

mod access_pass;
mod child_permissions;
mod invitation;
mod membership;
mod profile;

pub use access_pass::{generate_access_code, hash_access_code, AccessPass};
pub use child_permissions::ChildPermissions;
pub use invitation::{
    generate_invitation_token, Invitation, InvitationKind, InvitationResolution, InvitationStatus,
    INVITATION_TTL_DAYS,
};
pub use membership::{resolve_primary_parent, FamilyMembership, MembershipStatus};
pub use profile::{AccountRole, Profile, SubscriptionStatus, SubscriptionTier};
