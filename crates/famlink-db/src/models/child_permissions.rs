//! Child permissions database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the child_permissions table
#[derive(Debug, Clone, FromRow)]
pub struct ChildPermissionsModel {
    pub child_id: String,
    pub can_send_messages: bool,
    pub can_mood_checkin: bool,
    pub can_view_schedule_details: bool,
    pub can_write_journal: bool,
    pub updated_at: DateTime<Utc>,
}
