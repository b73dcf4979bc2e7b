//! Identity-token verification

mod verifier;

pub use verifier::{IdentityError, IdentityVerifier, VerifiedIdentity};
