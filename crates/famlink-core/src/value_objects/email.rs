//! Email address value object
//!
//! Addresses are normalized (trimmed, lowercased) at construction so every
//! later comparison - duplicate invitation checks, the third-party identity
//! mismatch check - is a plain equality test.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, normalizing the raw input
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_lowercase())
    }

    /// Get the normalized address as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Case-insensitive comparison against a raw, possibly unnormalized input
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw.trim().to_lowercase()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EmailAddress {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for EmailAddress {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

// Normalize on deserialization as well, so addresses arriving over the wire
// never bypass the lowercase/trim rule.
impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
