//! PostgreSQL repository implementations

mod access_pass;
mod error;
mod family_graph;
mod invitation;
mod membership;
mod profile;

pub use access_pass::PgAccessPassRepository;
pub use family_graph::PgFamilyGraphRepository;
pub use invitation::PgInvitationRepository;
pub use membership::PgMembershipRepository;
pub use profile::PgProfileRepository;
