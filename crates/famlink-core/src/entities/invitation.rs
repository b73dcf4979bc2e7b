//! Invitation entity - a single-use, time-limited credential for joining a family

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{EmailAddress, ProfileId};

/// Fixed invitation lifetime in days
pub const INVITATION_TTL_DAYS: i64 = 7;

/// Kind of relationship an invitation establishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationKind {
    CoParent,
    ThirdParty,
}

impl InvitationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoParent => "co_parent",
            Self::ThirdParty => "third_party",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "co_parent" => Some(Self::CoParent),
            "third_party" => Some(Self::ThirdParty),
            _ => None,
        }
    }
}

/// Invitation lifecycle status
///
/// `Expired` is lazy: storage may still say `Pending` after the deadline,
/// resolution always checks `expires_at` against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Expired,
    Revoked,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "expired" => Some(Self::Expired),
            "revoked" => Some(Self::Revoked),
            _ => None,
        }
    }
}

/// Outcome of presenting a token to the acceptance resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationResolution {
    /// Token is live and may be accepted by the caller
    Valid {
        inviter_id: ProfileId,
        kind: InvitationKind,
        invitee_email: EmailAddress,
    },
    /// Unknown token, or one that was revoked
    Invalid,
    /// Past its deadline, whether or not storage was updated
    Expired,
    /// Consumed exactly once already; re-presenting never re-links
    AlreadyAccepted,
    /// Third-party token presented by an account with a different email
    EmailMismatch,
}

/// Invitation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Uuid,
    pub token: String,
    pub inviter_id: ProfileId,
    pub invitee_email: EmailAddress,
    pub kind: InvitationKind,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Create a new pending invitation with a fresh token and fixed TTL
    pub fn new(inviter_id: ProfileId, invitee_email: EmailAddress, kind: InvitationKind) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            token: generate_invitation_token(),
            inviter_id,
            invitee_email,
            kind,
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at: now + Duration::days(INVITATION_TTL_DAYS),
        }
    }

    /// Check if the invitation is past its deadline
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Expired || now > self.expires_at
    }

    /// Resolve this invitation against the clock and the caller's verified
    /// identity. Re-run on every accept attempt - status and expiry are
    /// time-dependent and must never be cached.
    pub fn resolve(
        &self,
        now: DateTime<Utc>,
        verified_email: Option<&EmailAddress>,
    ) -> InvitationResolution {
        match self.status {
            InvitationStatus::Accepted => return InvitationResolution::AlreadyAccepted,
            InvitationStatus::Revoked => return InvitationResolution::Invalid,
            InvitationStatus::Expired | InvitationStatus::Pending => {}
        }

        if self.is_expired(now) {
            return InvitationResolution::Expired;
        }

        // Third-party invitations are bound to the invitee email: holding the
        // token is not enough to consume someone else's invite.
        if self.kind == InvitationKind::ThirdParty {
            if let Some(email) = verified_email {
                if *email != self.invitee_email {
                    return InvitationResolution::EmailMismatch;
                }
            }
        }

        InvitationResolution::Valid {
            inviter_id: self.inviter_id.clone(),
            kind: self.kind,
            invitee_email: self.invitee_email.clone(),
        }
    }
}

/// Generate a cryptographically random, URL-safe invitation token
///
/// 24 random bytes encoded as unpadded base64url: 32 characters, far beyond
/// brute-force reach. The token is the only credential needed to accept.
pub fn generate_invitation_token() -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use rand::RngCore;

    let mut bytes = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
