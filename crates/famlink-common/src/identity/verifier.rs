//! Verification of session tokens from the external identity provider
//!
//! The provider owns authentication; this service only verifies the token
//! signature and reads the authenticated user id and verified email from
//! the claims. The acceptance resolver trusts that email - caller-supplied
//! addresses are never used for the mismatch check.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use famlink_core::EmailAddress;

/// Errors verifying an identity token
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity token is invalid")]
    Invalid,

    #[error("Identity token has expired")]
    Expired,

    #[error("Identity token has no verified email")]
    UnverifiedEmail,
}

/// Claims carried by the identity provider's session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Authenticated user id
    pub sub: String,
    /// Email on the account
    pub email: String,
    /// Whether the provider has verified the email
    #[serde(default)]
    pub email_verified: bool,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issuer
    #[serde(default)]
    pub iss: Option<String>,
}

/// The caller's verified identity
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub auth_user_id: String,
    pub email: EmailAddress,
}

/// Verifies identity-provider session tokens
pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    /// Create a verifier for HS256 tokens signed with the shared secret
    pub fn new(secret: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and extract the caller's identity
    pub fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => IdentityError::Expired,
                _ => IdentityError::Invalid,
            })?;

        let claims = data.claims;
        if !claims.email_verified {
            return Err(IdentityError::UnverifiedEmail);
        }

        Ok(VerifiedIdentity {
            auth_user_id: claims.sub,
            email: EmailAddress::new(claims.email),
        })
    }
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier").finish_non_exhaustive()
    }
}
