//! Access pass database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the access_passes table
#[derive(Debug, Clone, FromRow)]
pub struct AccessPassModel {
    pub id: Uuid,
    pub code_hash: String,
    pub code_preview: String,
    pub label: String,
    pub audience: String,
    pub grant_reason: String,
    pub grant_tier: String,
    pub max_redemptions: i32,
    pub redeemed_count: i32,
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
