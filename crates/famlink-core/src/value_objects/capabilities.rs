//! Capability set - the resolved permissions for a profile
//!
//! Every feature surface consults this struct instead of branching on raw
//! account-type strings. The constructors are the single place where the
//! role rules live.

use serde::Serialize;

use crate::entities::ChildPermissions;

/// Why a profile is limited to view-only access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOnlyReason {
    ChildAccount,
    ThirdPartyMember,
}

/// Resolved boolean permissions for a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_manage_documents: bool,
    pub can_manage_children: bool,
    pub can_view_audit_log: bool,
    pub can_export_court_records: bool,
    pub can_access_admin: bool,
    pub can_send_messages: bool,
    pub can_view_calendar: bool,
    pub can_view_journal: bool,
    pub is_view_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_only_reason: Option<ViewOnlyReason>,
}

impl Capabilities {
    /// Capabilities for a parent profile (linked or unlinked)
    ///
    /// Management capabilities are always on; audit log and court-record
    /// export are gated behind premium access.
    pub fn for_parent(has_premium_access: bool, is_admin: bool) -> Self {
        Self {
            can_manage_documents: true,
            can_manage_children: true,
            can_view_audit_log: has_premium_access,
            can_export_court_records: has_premium_access,
            can_access_admin: is_admin,
            can_send_messages: true,
            can_view_calendar: true,
            can_view_journal: true,
            is_view_only: false,
            view_only_reason: None,
        }
    }

    /// Capabilities for a child profile
    ///
    /// No management capabilities; view capabilities come from the
    /// parent-configured permission record, never from hardcoded defaults.
    pub fn for_child(permissions: &ChildPermissions) -> Self {
        Self {
            can_manage_documents: false,
            can_manage_children: false,
            can_view_audit_log: false,
            can_export_court_records: false,
            can_access_admin: false,
            can_send_messages: permissions.can_send_messages,
            can_view_calendar: permissions.can_view_schedule_details,
            can_view_journal: permissions.can_write_journal,
            is_view_only: true,
            view_only_reason: Some(ViewOnlyReason::ChildAccount),
        }
    }

    /// Capabilities for a third-party family member
    ///
    /// Messaging and read-only calendar/journal only. Never audit log,
    /// never admin.
    pub fn for_third_party() -> Self {
        Self {
            can_manage_documents: false,
            can_manage_children: false,
            can_view_audit_log: false,
            can_export_court_records: false,
            can_access_admin: false,
            can_send_messages: true,
            can_view_calendar: true,
            can_view_journal: true,
            is_view_only: true,
            view_only_reason: Some(ViewOnlyReason::ThirdPartyMember),
        }
    }

    /// Check if this profile can do any management at all
    pub fn can_manage(&self) -> bool {
        self.can_manage_documents || self.can_manage_children
    }
}
