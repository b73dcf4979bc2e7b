//! Domain traits (ports) implemented by the infrastructure layer

mod delivery;
mod repositories;

pub use delivery::{DeliveryError, InviteDelivery, NotificationEvent, Notifier};
pub use repositories::{
    AccessPassRepository, FamilyGraphRepository, InvitationRepository, MembershipRepository,
    ProfileRepository, RepoResult,
};
