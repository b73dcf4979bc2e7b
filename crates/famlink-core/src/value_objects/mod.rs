//! Value objects - immutable types that represent domain concepts

mod capabilities;
mod email;
mod profile_id;

pub use capabilities::{Capabilities, ViewOnlyReason};
pub use email::EmailAddress;
pub use profile_id::ProfileId;
