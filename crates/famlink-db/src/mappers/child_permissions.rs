//! Child permissions entity <-> model mapper

use famlink_core::entities::ChildPermissions;
use famlink_core::value_objects::ProfileId;

use crate::models::ChildPermissionsModel;

impl From<ChildPermissionsModel> for ChildPermissions {
    fn from(model: ChildPermissionsModel) -> Self {
        ChildPermissions {
            child_id: ProfileId::from(model.child_id),
            can_send_messages: model.can_send_messages,
            can_mood_checkin: model.can_mood_checkin,
            can_view_schedule_details: model.can_view_schedule_details,
            can_write_journal: model.can_write_journal,
            updated_at: model.updated_at,
        }
    }
}
