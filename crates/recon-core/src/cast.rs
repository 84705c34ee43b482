//! Type-casting of raw spreadsheet text into declared native types.
//!
//! The type map comes from the ingestion side. Keys it does not mention stay
//! as they arrived, which for spreadsheet input means text.

use crate::datetime::{parse_iso8601, to_local, DatetimeValue, LocalZone};
use crate::errors::{ExError, ReconError, Result};
use crate::schema::EVENT_FIELD_WARNING;
use crate::value::{FieldType, Record, TypeMap, Value};
use crate::{log_op_end, log_op_error, log_op_start, log_op_warn};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn cast_error(text: &str, target: FieldType, reason: impl Into<String>) -> ReconError {
    ReconError::Cast {
        field: None,
        text: text.to_string(),
        target_type: target,
        reason: reason.into(),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Convert raw text into a value of `target` type.
///
/// Datetimes must carry an offset and are returned at UTC; with
/// `convert_to_local` they are further converted to local wall-clock time.
///
/// # Errors
///
/// `Cast` (without a field name) if the text cannot be converted.
pub fn cast(
    text: &str,
    target: FieldType,
    zone: &LocalZone,
    convert_to_local: bool,
) -> Result<Value> {
    if target == FieldType::Text {
        return Ok(Value::text(text));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(cast_error(text, target, "empty input"));
    }

    match target {
        FieldType::Text => Ok(Value::text(text)),
        FieldType::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| cast_error(text, target, e.to_string())),
        FieldType::Float => match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Float(n)),
            Ok(_) => Err(cast_error(text, target, "not a finite number")),
            Err(e) => Err(cast_error(text, target, e.to_string())),
        },
        FieldType::Boolean => parse_bool(trimmed)
            .map(Value::Boolean)
            .ok_or_else(|| cast_error(text, target, "not a recognised boolean")),
        FieldType::Decimal => Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Value::Decimal)
            .map_err(|e| cast_error(text, target, e.to_string())),
        FieldType::Datetime => {
            let parsed = parse_iso8601(Some(trimmed), true)
                .map_err(|e| cast_error(text, target, e.to_string()))?;
            let DatetimeValue::Aware(aware) = parsed else {
                return Err(cast_error(text, target, "parsed value is not aware"));
            };
            let utc = DatetimeValue::Aware(aware.with_timezone(&Utc).fixed_offset());
            if convert_to_local {
                let local = to_local(&utc, zone, false, true)
                    .map_err(|e| cast_error(text, target, e.to_string()))?;
                Ok(Value::Datetime(local))
            } else {
                Ok(Value::Datetime(utc))
            }
        }
    }
}

/// Cast one raw field. Blank text in a typed, non-text field means the cell
/// was cleared and becomes `Null`; non-text values were typed upstream and
/// pass through.
pub(crate) fn coerce_field(
    key: &str,
    raw: &Value,
    types: &TypeMap,
    zone: &LocalZone,
    convert_to_local: bool,
) -> Result<Value> {
    let (Some(target), Value::Text(text)) = (types.get(key), raw) else {
        return Ok(raw.clone());
    };
    if target != FieldType::Text && text.trim().is_empty() {
        return Ok(Value::Null);
    }
    cast(text, target, zone, convert_to_local).map_err(|e| e.for_field(key))
}

/// Cast every field of `raw` that the type map declares.
///
/// Keys absent from the type map pass through unchanged. Order is kept.
///
/// # Errors
///
/// The first `Cast` error, carrying the failing field's name. No partially
/// coerced record is returned.
pub fn coerce_record(
    raw: &Record,
    types: &TypeMap,
    zone: &LocalZone,
    convert_to_local: bool,
) -> Result<Record> {
    log_op_start!("coerce_record", field_count = raw.len());
    let start = std::time::Instant::now();

    let result: Result<Record> = raw
        .iter()
        .map(|(key, value)| {
            coerce_field(key, value, types, zone, convert_to_local).map(|v| (key, v))
        })
        .collect();

    match result {
        Ok(record) => {
            log_op_end!(
                "coerce_record",
                duration_ms = start.elapsed().as_millis() as u64
            );
            Ok(record)
        }
        Err(e) => {
            log_op_error!(
                "coerce_record",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(e)
        }
    }
}

/// A field that kept its raw text because it could not be cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWarning {
    /// Field key
    pub field: String,
    /// Stable error code, e.g. `ERR_CAST_FAILED`
    pub code: String,
    /// Human-readable reason
    pub message: String,
}

/// Result of a lenient coercion: the record plus per-field warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionReport {
    pub record: Record,
    pub warnings: Vec<FieldWarning>,
}

impl CoercionReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Like [`coerce_record`], but a field that fails to cast keeps its raw
/// value and is reported as a warning for the reviewer instead of aborting.
///
/// # Errors
///
/// Only fatal errors (see [`ExErrorKind::is_fatal`](crate::errors::ExErrorKind::is_fatal));
/// casting itself produces none, so in practice this succeeds.
pub fn coerce_record_lenient(
    raw: &Record,
    types: &TypeMap,
    zone: &LocalZone,
    convert_to_local: bool,
) -> Result<CoercionReport> {
    let mut record = Record::new();
    let mut warnings = Vec::new();

    for (key, value) in raw.iter() {
        match coerce_field(key, value, types, zone, convert_to_local) {
            Ok(v) => {
                record.insert(key, v);
            }
            Err(e) => {
                let ex: ExError = e.clone().into();
                if ex.is_fatal() {
                    return Err(e);
                }
                log_op_warn!(
                    "coerce_record_lenient",
                    EVENT_FIELD_WARNING,
                    field = key,
                    err_code = ex.code(),
                );
                warnings.push(FieldWarning {
                    field: key.to_string(),
                    code: ex.code().to_string(),
                    message: e.to_string(),
                });
                record.insert(key, value.clone());
            }
        }
    }

    Ok(CoercionReport { record, warnings })
}
