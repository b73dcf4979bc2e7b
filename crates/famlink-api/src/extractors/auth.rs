//! Authentication extractors
//!
//! Verify the identity-provider session token from the Authorization header
//! and, where a handler needs it, resolve the caller's profile.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use famlink_common::VerifiedIdentity;
use famlink_core::entities::Profile;

use crate::response::ApiError;
use crate::state::AppState;

/// Verified caller identity extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub VerifiedIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let identity = app_state
            .identity_verifier()
            .verify(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid identity token");
                ApiError::InvalidToken
            })?;

        Ok(AuthIdentity(identity))
    }
}

/// Optional verified identity
///
/// Returns None if no authorization header is present, or an error if a
/// token was supplied but is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthIdentity(pub Option<VerifiedIdentity>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthIdentity
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let app_state = AppState::from_ref(state);
                let identity = app_state
                    .identity_verifier()
                    .verify(bearer.token())
                    .map_err(|e| {
                        tracing::warn!(error = %e, "Invalid identity token");
                        ApiError::InvalidToken
                    })?;
                Ok(OptionalAuthIdentity(Some(identity)))
            }
            Err(_) => Ok(OptionalAuthIdentity(None)),
        }
    }
}

/// Verified identity with the caller's profile resolved from storage
#[derive(Debug, Clone)]
pub struct CurrentProfile {
    pub identity: VerifiedIdentity,
    pub profile: Profile,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentProfile
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthIdentity(identity) = AuthIdentity::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let profile = app_state
            .service_context()
            .profile_repo()
            .find_by_auth_user_id(&identity.auth_user_id)
            .await?
            .ok_or_else(|| {
                ApiError::App(famlink_common::AppError::NotFound(
                    "profile for authenticated user".to_string(),
                ))
            })?;

        Ok(CurrentProfile { identity, profile })
    }
}
