//! Family membership database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the family_memberships table
#[derive(Debug, Clone, FromRow)]
pub struct FamilyMembershipModel {
    pub id: Uuid,
    pub member_id: String,
    pub primary_parent_id: String,
    pub status: String,
    pub invited_by: String,
    pub accepted_at: DateTime<Utc>,
}
