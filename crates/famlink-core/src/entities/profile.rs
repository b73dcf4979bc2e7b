//! Profile entity - one per human account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EmailAddress, ProfileId};

/// Account type for a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Primary account, unlinked or linked to a co-parent
    Parent,
    /// Restricted account linked to a child record
    Child,
    /// Restricted family participant attached via membership
    ThirdParty,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Child => "child",
            Self::ThirdParty => "third_party",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "parent" => Some(Self::Parent),
            "child" => Some(Self::Child),
            "third_party" => Some(Self::ThirdParty),
            _ => None,
        }
    }
}

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(Self::Free),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

/// Subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Inactive,
    Trialing,
    Active,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Trialing => "trialing",
            Self::Active => "active",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inactive" => Some(Self::Inactive),
            "trialing" => Some(Self::Trialing),
            "active" => Some(Self::Active),
            _ => None,
        }
    }
}

/// Profile entity
///
/// Invariant: if `co_parent_id` is `Some(x)`, then x's profile must point
/// back at this one. The pair is mutually exclusive - at most one active
/// co-parent link per profile. Both sides are always written together by
/// the family graph linker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub auth_user_id: String,
    pub email: EmailAddress,
    pub display_name: String,
    pub co_parent_id: Option<ProfileId>,
    pub role: AccountRole,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new unlinked parent profile
    pub fn new_parent(
        id: ProfileId,
        auth_user_id: impl Into<String>,
        email: EmailAddress,
        display_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            auth_user_id: auth_user_id.into(),
            email,
            display_name: display_name.into(),
            co_parent_id: None,
            role: AccountRole::Parent,
            subscription_tier: SubscriptionTier::default(),
            subscription_status: SubscriptionStatus::default(),
            trial_ends_at: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this profile has an active co-parent link
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.co_parent_id.is_some()
    }

    /// Check whether premium-gated features (audit log, court-record export)
    /// are available right now
    pub fn has_premium_access(&self, now: DateTime<Utc>) -> bool {
        match self.subscription_status {
            SubscriptionStatus::Active => self.subscription_tier == SubscriptionTier::Premium,
            SubscriptionStatus::Trialing => self.trial_ends_at.is_some_and(|ends| ends > now),
            SubscriptionStatus::Inactive => false,
        }
    }
}
