//! Field diff computation engine.
//!
//! The core entry point is [`compute_diff`], which compares a typed upload
//! with the persisted record through [`normalize`](crate::normalize::normalize).

use crate::cast::coerce_record;
use crate::datetime::LocalZone;
use crate::diff::model::FieldDiff;
use crate::errors::Result;
use crate::normalize::normalize;
use crate::value::{Record, TypeMap};
use crate::{log_op_end, log_op_start};

/// Compute one [`FieldDiff`] per uploaded key, in upload order.
///
/// A missing `persisted` record is treated as empty, so every uploaded
/// field with content is new. Never fails.
pub fn compute_diff(
    uploaded: &Record,
    persisted: Option<&Record>,
    zone: &LocalZone,
) -> Vec<FieldDiff> {
    log_op_start!("compute_diff", field_count = uploaded.len());
    let start = std::time::Instant::now();

    let diffs: Vec<FieldDiff> = uploaded
        .iter()
        .map(|(key, new_value)| {
            // absent and null both normalize to ""
            let old = persisted
                .and_then(|p| p.get(key))
                .map(|v| normalize(v, zone))
                .unwrap_or_default();
            FieldDiff::from_normalized(key, old, normalize(new_value, zone))
        })
        .collect();

    let changed = diffs.iter().filter(|d| d.changed).count();
    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        diff_len = diffs.len(),
        changed_len = changed
    );

    diffs
}

/// Coerce a raw upload with the type map, then diff it.
///
/// # Errors
///
/// The first `Cast` error from [`coerce_record`], naming the field.
pub fn compute_diff_coerced(
    raw: &Record,
    types: &TypeMap,
    persisted: Option<&Record>,
    zone: &LocalZone,
    convert_to_local: bool,
) -> Result<Vec<FieldDiff>> {
    let typed = coerce_record(raw, types, zone, convert_to_local)?;
    Ok(compute_diff(&typed, persisted, zone))
}

/// Keys whose change waits on a reviewer, in diff order.
pub fn pending_confirmations(diffs: &[FieldDiff]) -> Vec<&str> {
    diffs
        .iter()
        .filter(|d| d.requires_confirmation)
        .map(|d| d.key.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::DatetimeValue;
    use crate::errors::ReconError;
    use crate::value::{FieldType, Value};

    #[test]
    fn test_upload_order_and_scope() {
        let uploaded: Record = [("b", "2"), ("a", "1")].into_iter().collect();
        let persisted: Record = [("a", "1"), ("only_stored", "x")].into_iter().collect();

        let diffs = compute_diff(&uploaded, Some(&persisted), &LocalZone::utc());

        let keys: Vec<&str> = diffs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert!(diffs[0].changed);
        assert!(diffs[1].is_same);
    }

    #[test]
    fn test_missing_persisted_is_empty() {
        let uploaded: Record = [("a", "1"), ("blank", "")].into_iter().collect();
        let diffs = compute_diff(&uploaded, None, &LocalZone::utc());

        assert!(diffs[0].changed && diffs[0].requires_confirmation);
        assert_eq!(diffs[0].old, "");
        assert!(diffs[1].is_same);
    }

    #[test]
    fn test_datetime_upload_matches_equal_stored_instant() {
        let zone = LocalZone::named("America/Los_Angeles").unwrap();
        let uploaded: Record = [(
            "at",
            Value::Datetime(DatetimeValue::utc(2025, 1, 15, 17, 0, 0).unwrap()),
        )]
        .into_iter()
        .collect();
        let persisted: Record = [(
            "at",
            Value::Datetime(DatetimeValue::naive(2025, 1, 15, 9, 0, 0).unwrap()),
        )]
        .into_iter()
        .collect();

        let diffs = compute_diff(&uploaded, Some(&persisted), &zone);
        assert!(diffs[0].is_same, "{:?}", diffs[0]);
    }

    #[test]
    fn test_decimal_scale_is_not_a_change() {
        let stored: rust_decimal::Decimal = "10.50".parse().unwrap();
        let persisted: Record = [("cost", Value::Decimal(stored))].into_iter().collect();
        let raw: Record = [("cost", "10.5")].into_iter().collect();
        let types: TypeMap = [("cost", FieldType::Decimal)].into_iter().collect();

        let diffs =
            compute_diff_coerced(&raw, &types, Some(&persisted), &LocalZone::utc(), false).unwrap();
        assert!(diffs[0].is_same, "{:?}", diffs[0]);
        assert!(!diffs[0].requires_confirmation);
    }

    #[test]
    fn test_coerced_diff_propagates_cast_error() {
        let raw: Record = [("qty", "three")].into_iter().collect();
        let types: TypeMap = [("qty", FieldType::Integer)].into_iter().collect();
        let err = compute_diff_coerced(&raw, &types, None, &LocalZone::utc(), false).unwrap_err();
        assert!(matches!(err, ReconError::Cast { field: Some(ref f), .. } if f == "qty"));
    }

    #[test]
    fn test_pending_confirmations() {
        let uploaded: Record = [("a", "new"), ("b", ""), ("c", "same")].into_iter().collect();
        let persisted: Record = [("a", "old"), ("b", "gone"), ("c", "same")]
            .into_iter()
            .collect();
        let diffs = compute_diff(&uploaded, Some(&persisted), &LocalZone::utc());
        assert_eq!(pending_confirmations(&diffs), vec!["a"]);
    }
}
