//! Profile identifier - opaque id issued by the account lifecycle
//!
//! Profile ids come from the identity provider and are treated as opaque
//! strings. `Ord` matters: the family anchor is the smaller of two ids.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque profile identifier
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    /// Create a new ProfileId from a raw string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner String
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Check if the id is empty (uninitialized)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProfileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ProfileId> for String {
    fn from(id: ProfileId) -> Self {
        id.0
    }
}
