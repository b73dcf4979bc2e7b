//! Parent-configured permission record for a child profile

use chrono::{DateTime, Utc};

use crate::value_objects::ProfileId;

/// View-capability toggles for a child account
///
/// Management capabilities are never granted to children; these toggles only
/// control which view surfaces a child sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildPermissions {
    pub child_id: ProfileId,
    pub can_send_messages: bool,
    pub can_mood_checkin: bool,
    pub can_view_schedule_details: bool,
    pub can_write_journal: bool,
    pub updated_at: DateTime<Utc>,
}

impl ChildPermissions {
    /// Defaults applied until a parent configures the record: kid-safe
    /// surfaces on, schedule detail off.
    pub fn default_for(child_id: ProfileId) -> Self {
        Self {
            child_id,
            can_send_messages: true,
            can_mood_checkin: true,
            can_view_schedule_details: false,
            can_write_journal: true,
            updated_at: Utc::now(),
        }
    }
}
