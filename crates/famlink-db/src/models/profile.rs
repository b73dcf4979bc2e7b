//! Profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the profiles table
#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub id: String,
    pub auth_user_id: String,
    pub email: String,
    pub display_name: String,
    pub co_parent_id: Option<String>,
    pub role: String,
    pub subscription_tier: String,
    pub subscription_status: String,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub access_reason: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
