use crate::datetime::LocalZone;
use crate::value::{Record, TypeMap, Value};
use recon_core_types::MergeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Field keys a reviewer explicitly approved. Empty is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationSet(BTreeSet<String>);

impl ConfirmationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<K> for ConfirmationSet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// How uploaded values are turned into stored values.
#[derive(Debug, Clone, Copy)]
pub struct MergeContext<'a> {
    /// The upload the diffs were computed from, raw or already coerced
    pub uploaded: &'a Record,
    /// Declared field types; unlisted keys are stored as text
    pub type_map: &'a TypeMap,
    pub zone: &'a LocalZone,
    /// Store datetimes as local wall-clock time instead of UTC
    pub convert_to_local: bool,
}

/// One field actually changed by a merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeLogEntry {
    pub key: String,
    pub old: Value,
    pub new: Value,
}

/// Audit trail of a merge, in merge order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeLog {
    pub merge_id: MergeId,
    pub actor: String,
    pub comment: String,
    pub entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

/// Result of [`apply_patch`](crate::merge::apply_patch).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeOutcome {
    /// The record to persist
    pub updated: Record,
    pub change_log: ChangeLog,
    /// Changed keys left untouched for lack of confirmation
    pub pending: Vec<String>,
}
