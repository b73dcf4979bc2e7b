//! Family membership - third-party attachment to a family unit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Profile;
use crate::value_objects::ProfileId;

/// Membership lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Active,
    Revoked,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "revoked" => Some(Self::Revoked),
            _ => None,
        }
    }
}

/// Third-party membership in a family unit
///
/// `primary_parent_id` is the canonical anchor: all third-party members of a
/// family resolve to the same anchor no matter which co-parent invited them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMembership {
    pub id: Uuid,
    pub member_id: ProfileId,
    pub primary_parent_id: ProfileId,
    pub status: MembershipStatus,
    pub invited_by: ProfileId,
    pub accepted_at: DateTime<Utc>,
}

impl FamilyMembership {
    /// Create an active membership anchored at the family's primary parent
    pub fn new(member_id: ProfileId, inviter: &Profile) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            primary_parent_id: resolve_primary_parent(inviter),
            status: MembershipStatus::Active,
            invited_by: inviter.id.clone(),
            accepted_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

/// Resolve the canonical family anchor for an inviter
///
/// The anchor is the smaller of the inviter's own id and their co-parent's
/// id (or the inviter alone when unlinked). Computed once at acceptance
/// time; both co-parents resolve to the same anchor.
pub fn resolve_primary_parent(inviter: &Profile) -> ProfileId {
    match &inviter.co_parent_id {
        Some(partner) if *partner < inviter.id => partner.clone(),
        _ => inviter.id.clone(),
    }
}
