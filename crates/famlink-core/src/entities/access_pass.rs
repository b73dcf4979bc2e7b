//! Access pass - administrator-issued, multi-redemption grant code
//!
//! The administrative analogue of an invitation: a code instead of a token,
//! a redemption cap instead of single use. Redeeming grants a subscription
//! tier outside normal billing; it never creates family links.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entities::profile::SubscriptionTier;

/// Access pass entity
///
/// Only the SHA-256 hash of the code is stored; a short preview is retained
/// for display in admin tooling. Invariant: `redeemed_count <=
/// max_redemptions`, enforced by a conditional update at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPass {
    pub id: Uuid,
    pub code_hash: String,
    pub code_preview: String,
    pub label: String,
    pub audience: String,
    pub grant_reason: String,
    pub grant_tier: SubscriptionTier,
    pub max_redemptions: i32,
    pub redeemed_count: i32,
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AccessPass {
    /// Create a new active pass for a plaintext code
    pub fn new(
        code: &str,
        label: impl Into<String>,
        audience: impl Into<String>,
        grant_reason: impl Into<String>,
        grant_tier: SubscriptionTier,
        max_redemptions: i32,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code_hash: hash_access_code(code),
            code_preview: code_preview(code),
            label: label.into(),
            audience: audience.into(),
            grant_reason: grant_reason.into(),
            grant_tier,
            max_redemptions,
            redeemed_count: 0,
            active: true,
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Check if the pass is past its optional deadline
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }

    /// Check if the redemption cap is reached
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.redeemed_count >= self.max_redemptions
    }

    /// Check if the pass could be redeemed right now
    ///
    /// Advisory only: the authoritative check is the conditional increment
    /// at the storage layer.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        self.active && !self.is_expired(now) && !self.is_exhausted()
    }

    /// Remaining redemptions
    pub fn remaining_redemptions(&self) -> i32 {
        (self.max_redemptions - self.redeemed_count).max(0)
    }
}

/// Generate a random access-pass code
pub fn generate_access_code() -> String {
    use rand::Rng;

    // No 0/O/1/I: codes are read aloud and typed by hand.
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    const CODE_LEN: usize = 12;

    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// SHA-256 hash of a code, hex-encoded, after trimming and uppercasing
pub fn hash_access_code(code: &str) -> String {
    let normalized = code.trim().to_uppercase();
    let digest = Sha256::digest(normalized.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut out, b| {
        use std::fmt::Write;
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Short display preview of a code (last four characters)
fn code_preview(code: &str) -> String {
    let normalized = code.trim().to_uppercase();
    let tail: String = normalized
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("…{tail}")
}
