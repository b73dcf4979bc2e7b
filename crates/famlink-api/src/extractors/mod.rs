//! Request extractors

mod auth;

pub use auth::{AuthIdentity, CurrentProfile, OptionalAuthIdentity};
