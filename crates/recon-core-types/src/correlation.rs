//! Correlation identifiers for audit trails
//!
//! A merge decision is tagged with a [`MergeId`] so that the change log handed
//! to the persistence layer can be tied back to the log events it produced.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single confirmation-gated merge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeId(String);

impl MergeId {
    /// Generate a new time-ordered MergeId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for MergeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MergeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
