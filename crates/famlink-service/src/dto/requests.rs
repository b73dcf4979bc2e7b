//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use famlink_core::entities::{InvitationKind, SubscriptionTier};

// ============================================================================
// Invitation Requests
// ============================================================================

/// Create invitation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[validate(email(message = "Invalid email format"))]
    pub invitee_email: String,

    pub kind: InvitationKind,
}

// ============================================================================
// Permission Requests
// ============================================================================

/// Replace a child's permission record
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChildPermissionsRequest {
    pub can_send_messages: bool,
    pub can_mood_checkin: bool,
    pub can_view_schedule_details: bool,
    pub can_write_journal: bool,
}

// ============================================================================
// Access Pass Requests
// ============================================================================

/// Redeem access pass request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RedeemAccessPassRequest {
    #[validate(length(min = 4, max = 64, message = "Code must be 4-64 characters"))]
    pub code: String,
}

/// Create access pass request (admin only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccessPassRequest {
    #[validate(length(min = 1, max = 100, message = "Label must be 1-100 characters"))]
    pub label: String,

    #[validate(length(min = 1, max = 100, message = "Audience must be 1-100 characters"))]
    pub audience: String,

    #[validate(length(min = 1, max = 200, message = "Grant reason must be 1-200 characters"))]
    pub grant_reason: String,

    pub grant_tier: SubscriptionTier,

    #[validate(range(min = 1, max = 100_000, message = "Max redemptions must be at least 1"))]
    pub max_redemptions: i32,

    pub expires_at: Option<DateTime<Utc>>,
}
