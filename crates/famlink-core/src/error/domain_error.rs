//! Domain errors - error types for the domain layer
//!
//! Every variant is a typed, terminal outcome surfaced to the caller with a
//! stable reason; nothing here is retried automatically and nothing crashes
//! the process. Transient delivery failures never appear in this taxonomy -
//! they are logged and swallowed at the call site.

use thiserror::Error;

use crate::value_objects::ProfileId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error("Invitation not found")]
    InvitationNotFound,

    #[error("Family membership not found")]
    MembershipNotFound,

    #[error("Access pass not found")]
    AccessPassNotFound,

    // =========================================================================
    // Invitation Lifecycle Errors
    // =========================================================================
    #[error("Invitation has expired")]
    InvitationExpired,

    #[error("Invitation was already accepted")]
    AlreadyAccepted,

    #[error("Invitation was revoked")]
    InvitationRevoked,

    #[error("Signed-in email does not match the invited email")]
    EmailMismatch,

    #[error("A pending invitation already exists for this email")]
    DuplicateInvitation,

    // =========================================================================
    // Linking Errors
    // =========================================================================
    #[error("Profile already has an active co-parent link")]
    AlreadyLinked,

    #[error("Profile is already a member of this family")]
    AlreadyFamilyMember,

    #[error("Only parent profiles can send invitations")]
    NotAParent,

    // =========================================================================
    // Access Pass Errors
    // =========================================================================
    #[error("Access pass is no longer active")]
    AccessPassInactive,

    #[error("Access pass has expired")]
    AccessPassExpired,

    #[error("Access pass has reached its redemption limit")]
    AccessPassExhausted,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::InvitationNotFound => "UNKNOWN_INVITATION",
            Self::MembershipNotFound => "UNKNOWN_MEMBERSHIP",
            Self::AccessPassNotFound => "UNKNOWN_ACCESS_PASS",

            // Invitation lifecycle
            Self::InvitationExpired => "INVITATION_EXPIRED",
            Self::AlreadyAccepted => "INVITATION_ALREADY_ACCEPTED",
            Self::InvitationRevoked => "INVITATION_REVOKED",
            Self::EmailMismatch => "EMAIL_MISMATCH",
            Self::DuplicateInvitation => "DUPLICATE_INVITATION",

            // Linking
            Self::AlreadyLinked => "ALREADY_LINKED",
            Self::AlreadyFamilyMember => "ALREADY_FAMILY_MEMBER",
            Self::NotAParent => "NOT_A_PARENT",

            // Access pass
            Self::AccessPassInactive => "ACCESS_PASS_INACTIVE",
            Self::AccessPassExpired => "ACCESS_PASS_EXPIRED",
            Self::AccessPassExhausted => "ACCESS_PASS_EXHAUSTED",

            // Validation
            Self::Validation(_) => "VALIDATION_ERROR",

            // Infrastructure
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound(_)
                | Self::InvitationNotFound
                | Self::MembershipNotFound
                | Self::AccessPassNotFound
        )
    }

    /// Check if this is a conflict error (state already moved on)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyAccepted
                | Self::DuplicateInvitation
                | Self::AlreadyLinked
                | Self::AlreadyFamilyMember
                | Self::AccessPassExhausted
        )
    }

    /// Check if this is a validation/state error surfaced as 4xx
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvitationExpired
                | Self::InvitationRevoked
                | Self::AccessPassInactive
                | Self::AccessPassExpired
                | Self::NotAParent
        )
    }

    /// Check if this is an identity/authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::EmailMismatch)
    }
}
