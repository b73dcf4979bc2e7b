//! Invitation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the invitations table
#[derive(Debug, Clone, FromRow)]
pub struct InvitationModel {
    pub id: Uuid,
    pub token: String,
    pub inviter_id: String,
    pub invitee_email: String,
    pub kind: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl InvitationModel {
    /// Check if the row is past its deadline, whatever the stored status says
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
