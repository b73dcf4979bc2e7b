//! # famlink-core
//!
//! Domain layer for the family-graph linking subsystem: entities, value
//! objects, repository traits, and domain errors. This crate has zero
//! dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AccessPass, AccountRole, ChildPermissions, FamilyMembership, Invitation, InvitationKind,
    InvitationResolution, InvitationStatus, MembershipStatus, Profile, SubscriptionStatus,
    SubscriptionTier, generate_access_code, generate_invitation_token, hash_access_code,
    resolve_primary_parent,
};
pub use error::DomainError;
pub use traits::{
    AccessPassRepository, DeliveryError, FamilyGraphRepository, InvitationRepository,
    InviteDelivery, MembershipRepository, NotificationEvent, Notifier, ProfileRepository,
    RepoResult,
};
pub use value_objects::{Capabilities, EmailAddress, ProfileId, ViewOnlyReason};
