//! Diff output types.
//!
//! The serialized shape of [`FieldDiff`] is consumed by the review page and
//! must stay stable.

use serde::{Deserialize, Serialize};

/// Comparison of one uploaded field against its persisted counterpart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDiff {
    /// Field key
    pub key: String,
    /// Normalized persisted value (`""` when absent)
    pub old: String,
    /// Normalized uploaded value
    pub new: String,
    /// True if `old != new`
    pub changed: bool,
    /// Always `!changed`
    pub is_same: bool,
    /// Always true for diffs built from an upload
    pub from_upload: bool,
    /// True if the change writes non-empty content and needs a reviewer's approval
    pub requires_confirmation: bool,
}

impl FieldDiff {
    /// Build a diff row from normalized old and new text.
    pub fn from_normalized(key: impl Into<String>, old: String, new: String) -> Self {
        let changed = old != new;
        let requires_confirmation = changed && !new.is_empty();
        Self {
            key: key.into(),
            old,
            new,
            changed,
            is_same: !changed,
            from_upload: true,
            requires_confirmation,
        }
    }

    /// True if the upload clears a field that currently has content.
    pub fn is_clearing(&self) -> bool {
        self.changed && self.new.is_empty()
    }
}
