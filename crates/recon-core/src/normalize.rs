//! Canonical text rendering for equality-based diffing.
//!
//! [`normalize`] never fails: diff display must stay computable even over
//! malformed stored data. Its output is for comparison and display only and
//! is never parsed back into a typed value except through the caster.

use crate::datetime::{to_iso8601, to_utc, DatetimeValue, LocalZone};
use crate::value::Value;
use chrono::Utc;

/// Render any value as comparable text.
///
/// - `Null` and empty text both become `""`.
/// - Naive datetimes are read as local time and rendered as UTC ISO8601;
///   one that cannot be placed on the UTC line (DST gap, rejected
///   ambiguity) falls back to its offset-less ISO form.
/// - Aware datetimes render as ISO8601 of the same instant at UTC, so equal
///   instants always compare equal.
/// - Decimals drop trailing zeros, so `10.50` and `10.5` compare equal.
/// - Containers render their normalized members: `[a, b]`, `{k: v}`.
pub fn normalize(value: &Value, zone: &LocalZone) -> String {
    match value {
        Value::Null => String::new(),
        Value::Text(s) => s.clone(),
        Value::Integer(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Decimal(d) => d.normalize().to_string(),
        Value::Datetime(dt) => normalize_datetime(dt, zone),
        Value::Sequence(items) | Value::Set(items) => {
            let parts: Vec<String> = items.iter().map(|v| normalize(v, zone)).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Mapping(record) => {
            let parts: Vec<String> = record
                .iter()
                .map(|(k, v)| format!("{k}: {}", normalize(v, zone)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn normalize_datetime(dt: &DatetimeValue, zone: &LocalZone) -> String {
    let at_utc = match dt {
        DatetimeValue::Naive(_) => to_utc(dt, zone),
        DatetimeValue::Aware(aware) => Ok(DatetimeValue::Aware(
            aware.with_timezone(&Utc).fixed_offset(),
        )),
    };
    at_utc
        .and_then(|utc| to_iso8601(&utc))
        .unwrap_or_else(|_| dt.to_string())
}
