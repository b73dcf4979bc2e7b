//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use famlink_core::entities::{Invitation, InvitationKind, InvitationStatus, SubscriptionTier};
use famlink_core::value_objects::{Capabilities, ProfileId};

// ============================================================================
// Invitation Responses
// ============================================================================

/// An invitation as seen by its creator
#[derive(Debug, Clone, Serialize)]
pub struct InvitationResponse {
    pub id: Uuid,
    pub invitee_email: String,
    pub kind: InvitationKind,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Shareable accept link, the fallback when email delivery fails
    pub share_link: String,
}

impl InvitationResponse {
    pub fn from_invitation(invitation: &Invitation, share_link: String) -> Self {
        Self {
            id: invitation.id,
            invitee_email: invitation.invitee_email.as_str().to_string(),
            kind: invitation.kind,
            status: invitation.status,
            created_at: invitation.created_at,
            expires_at: invitation.expires_at,
            share_link,
        }
    }
}

/// Outcome of resolving a token, shown before the caller commits to accept
#[derive(Debug, Clone, Serialize)]
pub struct ResolveInvitationResponse {
    /// One of: valid, invalid, expired, already_accepted, email_mismatch
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<InvitationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inviter_name: Option<String>,
}

impl ResolveInvitationResponse {
    pub fn valid(kind: InvitationKind, inviter_name: String) -> Self {
        Self {
            status: "valid",
            kind: Some(kind),
            inviter_name: Some(inviter_name),
        }
    }

    pub fn terminal(status: &'static str) -> Self {
        Self {
            status,
            kind: None,
            inviter_name: None,
        }
    }
}

/// Result of a successful acceptance
#[derive(Debug, Clone, Serialize)]
pub struct AcceptInvitationResponse {
    pub kind: InvitationKind,
    /// Set for co-parent links: the partner this profile is now linked to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_parent_id: Option<ProfileId>,
    /// Set for third-party joins: the family anchor the member now belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_parent_id: Option<ProfileId>,
}

// ============================================================================
// Capability Responses
// ============================================================================

/// Resolved capabilities for the calling profile
#[derive(Debug, Clone, Serialize)]
pub struct CapabilitiesResponse {
    pub profile_id: ProfileId,
    #[serde(flatten)]
    pub capabilities: Capabilities,
}

// ============================================================================
// Access Pass Responses
// ============================================================================

/// Result of a successful redemption
#[derive(Debug, Clone, Serialize)]
pub struct RedeemAccessPassResponse {
    pub granted_tier: SubscriptionTier,
    pub label: String,
}

/// A freshly created pass; the plaintext code appears here and nowhere else
#[derive(Debug, Clone, Serialize)]
pub struct CreateAccessPassResponse {
    pub id: Uuid,
    pub code: String,
    pub code_preview: String,
    pub label: String,
    pub max_redemptions: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
