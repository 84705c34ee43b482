use crate::datetime::{DatetimeValue, LocalZone};
use crate::errors::{ReconError, Result};
use crate::log_op_warn;
use crate::schema::EVENT_ASSUMED_UTC;
use crate::value::Value;
use chrono::{SecondsFormat, TimeZone, Utc};

fn mismatch(op: &str, expected: &str, found: &DatetimeValue) -> ReconError {
    ReconError::TypeMismatch {
        op: op.to_string(),
        expected: expected.to_string(),
        found: found.variant_name().to_string(),
    }
}

/// Interpret a naive value as local time and return the same instant at UTC.
///
/// # Errors
///
/// - `TypeMismatch` if `value` is already aware
/// - `AmbiguousLocalTime` / `NonexistentLocalTime` per the zone's DST policy
pub fn to_utc(value: &DatetimeValue, zone: &LocalZone) -> Result<DatetimeValue> {
    match value {
        DatetimeValue::Naive(naive) => {
            let local = zone.localize(naive)?;
            Ok(DatetimeValue::Aware(local.with_timezone(&Utc).fixed_offset()))
        }
        DatetimeValue::Aware(_) => Err(mismatch("to_utc", "naive", value)),
    }
}

/// Wall-clock reading of an aware value in the local zone.
///
/// With `allow_naive_input`, a naive value is taken to already be UTC and a
/// warning is emitted. With `strict_utc`, an aware value must sit at offset
/// zero.
///
/// # Errors
///
/// - `TypeMismatch` if `value` is naive and `allow_naive_input` is false
/// - `TimezoneMismatch` if `strict_utc` is set and the offset is not UTC
pub fn to_local(
    value: &DatetimeValue,
    zone: &LocalZone,
    allow_naive_input: bool,
    strict_utc: bool,
) -> Result<DatetimeValue> {
    match value {
        DatetimeValue::Naive(naive) => {
            if !allow_naive_input {
                return Err(mismatch("to_local", "aware", value));
            }
            log_op_warn!(
                "to_local",
                EVENT_ASSUMED_UTC,
                input = %value,
            );
            let instant = Utc.from_utc_datetime(naive);
            Ok(DatetimeValue::Naive(zone.wall_clock(&instant)))
        }
        DatetimeValue::Aware(aware) => {
            if strict_utc && aware.offset().local_minus_utc() != 0 {
                return Err(ReconError::TimezoneMismatch {
                    offset: aware.offset().to_string(),
                });
            }
            Ok(DatetimeValue::Naive(zone.wall_clock(aware)))
        }
    }
}

/// Canonical ISO8601 text with explicit offset, e.g. `2025-01-15T17:00:00+00:00`.
///
/// # Errors
///
/// `TypeMismatch` if `value` is naive.
pub fn to_iso8601(value: &DatetimeValue) -> Result<String> {
    match value {
        DatetimeValue::Aware(aware) => Ok(aware.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
        DatetimeValue::Naive(_) => Err(mismatch("to_iso8601", "aware", value)),
    }
}

/// Local `YYYY-MM-DDTHH:MM` text for review forms.
///
/// # Errors
///
/// `TypeMismatch` if `value` is naive, or aware at an offset other than UTC.
pub fn to_form_text(value: &DatetimeValue, zone: &LocalZone) -> Result<String> {
    match value {
        DatetimeValue::Aware(aware) => {
            if aware.offset().local_minus_utc() != 0 {
                return Err(ReconError::TypeMismatch {
                    op: "to_form_text".to_string(),
                    expected: "utc aware".to_string(),
                    found: format!("aware at {}", aware.offset()),
                });
            }
            Ok(zone.wall_clock(aware).format("%Y-%m-%dT%H:%M").to_string())
        }
        DatetimeValue::Naive(_) => Err(mismatch("to_form_text", "aware", value)),
    }
}

/// True only for a naive datetime; false for null and every other value.
pub fn is_naive(value: &Value) -> bool {
    matches!(value, Value::Datetime(DatetimeValue::Naive(_)))
}

/// True only for an aware datetime at offset zero.
pub fn is_utc(value: &Value) -> bool {
    matches!(
        value,
        Value::Datetime(DatetimeValue::Aware(aware)) if aware.offset().local_minus_utc() == 0
    )
}
