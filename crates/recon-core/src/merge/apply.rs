//! Functional-boundary merge
//!
//! [`apply_patch`] takes the persisted record by reference, works on its own
//! copy, and hands back the updated record plus the audit trail. The caller
//! persists both in one transaction.
//!
//! ## Atomicity Contract
//!
//! - **All-or-nothing**: if any applied field fails to cast, no updated
//!   record is returned
//! - **Non-destructive**: keys of `existing` that no diff names are kept as is
//! - **No panics**: invalid uploaded text returns typed errors
//!
//! ## Example
//!
//! ```
//! use recon_core::datetime::LocalZone;
//! use recon_core::diff::compute_diff;
//! use recon_core::merge::{apply_patch, ConfirmationSet, MergeContext};
//! use recon_core::value::{Record, TypeMap, Value};
//!
//! let zone = LocalZone::utc();
//! let types = TypeMap::new();
//! let existing: Record = [("notes", Value::Null)].into_iter().collect();
//! let uploaded: Record = [("notes", "fixed")].into_iter().collect();
//! let diffs = compute_diff(&uploaded, Some(&existing), &zone);
//!
//! let ctx = MergeContext {
//!     uploaded: &uploaded,
//!     type_map: &types,
//!     zone: &zone,
//!     convert_to_local: false,
//! };
//!
//! let confirmed: ConfirmationSet = ["notes"].into_iter().collect();
//! let outcome = apply_patch(&existing, &diffs, &confirmed, "reviewer", "import", &ctx).unwrap();
//! assert_eq!(outcome.updated.get("notes"), Some(&Value::text("fixed")));
//! ```

use crate::cast::{cast, coerce_field};
use crate::datetime::{to_local, DatetimeValue};
use crate::diff::FieldDiff;
use crate::errors::Result;
use crate::merge::model::{ChangeLog, ChangeLogEntry, ConfirmationSet, MergeContext, MergeOutcome};
use crate::value::{FieldType, Record, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use recon_core_types::MergeId;

/// Apply confirmed changes from `diffs` to a copy of `existing`.
///
/// For each changed diff: applied if it needs no confirmation or its key is
/// in `confirmed`, otherwise retained and listed in `pending`. The stored
/// value comes from the context's upload, coerced with its type map, so a
/// value that was typed upstream keeps its type. An upload that clears a
/// field stores `Null`.
///
/// # Errors
///
/// `Cast` naming the first applied field whose uploaded text does not fit
/// its declared type.
pub fn apply_patch(
    existing: &Record,
    diffs: &[FieldDiff],
    confirmed: &ConfirmationSet,
    actor: &str,
    comment: &str,
    ctx: &MergeContext<'_>,
) -> Result<MergeOutcome> {
    let merge_id = MergeId::new();
    log_op_start!(
        "apply_patch",
        merge_id = %merge_id,
        actor = actor,
        diff_len = diffs.len()
    );
    let start = std::time::Instant::now();

    let outcome = apply_patch_impl(existing, diffs, confirmed, actor, comment, ctx, merge_id)
        .map_err(|e| {
            log_op_error!(
                "apply_patch",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "apply_patch",
        duration_ms = start.elapsed().as_millis() as u64,
        merge_id = %outcome.change_log.merge_id,
        applied_len = outcome.change_log.entries.len(),
        pending_len = outcome.pending.len()
    );

    Ok(outcome)
}

#[allow(clippy::too_many_arguments)]
fn apply_patch_impl(
    existing: &Record,
    diffs: &[FieldDiff],
    confirmed: &ConfirmationSet,
    actor: &str,
    comment: &str,
    ctx: &MergeContext<'_>,
    merge_id: MergeId,
) -> Result<MergeOutcome> {
    let mut updated = existing.clone();
    let mut entries = Vec::new();
    let mut pending = Vec::new();

    for diff in diffs.iter().filter(|d| d.changed) {
        if diff.requires_confirmation && !confirmed.contains(&diff.key) {
            pending.push(diff.key.clone());
            continue;
        }

        let new = stored_value(diff, ctx)?;
        let old = updated.insert(diff.key.clone(), new.clone()).unwrap_or_default();
        entries.push(ChangeLogEntry {
            key: diff.key.clone(),
            old,
            new,
        });
    }

    Ok(MergeOutcome {
        updated,
        change_log: ChangeLog {
            merge_id,
            actor: actor.to_string(),
            comment: comment.to_string(),
            entries,
        },
        pending,
    })
}

/// Native value for the uploaded side of a diff.
///
/// A diff whose key is missing from the upload falls back to casting its
/// normalized text.
fn stored_value(diff: &FieldDiff, ctx: &MergeContext<'_>) -> Result<Value> {
    if diff.new.is_empty() {
        return Ok(Value::Null);
    }
    let Some(raw) = ctx.uploaded.get(&diff.key) else {
        let target = ctx.type_map.get(&diff.key).unwrap_or(FieldType::Text);
        return cast(&diff.new, target, ctx.zone, ctx.convert_to_local)
            .map_err(|e| e.for_field(&diff.key));
    };

    let value = coerce_field(&diff.key, raw, ctx.type_map, ctx.zone, ctx.convert_to_local)?;
    match value {
        Value::Datetime(dt @ DatetimeValue::Aware(_)) if ctx.convert_to_local => {
            let local = to_local(&dt, ctx.zone, false, false)?;
            Ok(Value::Datetime(local))
        }
        other => Ok(other),
    }
}
