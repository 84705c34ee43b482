use crate::datetime::{DatetimeValue, LocalZone};
use crate::errors::{ReconError, Result};
use crate::log_op_warn;
use crate::schema::EVENT_ASSUMED_UTC;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// ISO8601 layouts carrying an offset. A trailing `Z` is rewritten to
/// `+00:00` before these are tried.
const ISO_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// ISO8601 layouts without an offset.
const ISO_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Extra date-time layouts seen in exported spreadsheets.
const SPREADSHEET_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"];

/// Date-only layouts; the time is taken as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

const FORM_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

fn parse_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    let rewritten;
    let text = match text.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(head) => {
            rewritten = format!("{head}+00:00");
            rewritten.as_str()
        }
        None => text,
    };
    ISO_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
}

fn parse_naive(text: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse ISO8601 text into an aware value, keeping the offset as written.
///
/// Without an offset the text is either rejected (`require_tz`) or taken to
/// be UTC, in which case an `assumed_utc` warning is emitted.
///
/// # Errors
///
/// - `Format` if `text` is absent, blank or unparsable
/// - `MissingTimezone` if no offset is present and `require_tz` is set
pub fn parse_iso8601(text: Option<&str>, require_tz: bool) -> Result<DatetimeValue> {
    let raw = text.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ReconError::Format {
            text: raw.to_string(),
            reason: "empty input".to_string(),
        });
    }

    if let Some(aware) = parse_with_offset(trimmed) {
        return Ok(DatetimeValue::Aware(aware));
    }

    match parse_naive(trimmed, ISO_NAIVE_FORMATS) {
        Some(_) if require_tz => Err(ReconError::MissingTimezone {
            text: raw.to_string(),
        }),
        Some(naive) => {
            log_op_warn!("parse_iso8601", EVENT_ASSUMED_UTC, input = trimmed);
            Ok(DatetimeValue::Aware(Utc.from_utc_datetime(&naive).fixed_offset()))
        }
        None => Err(ReconError::Format {
            text: raw.to_string(),
            reason: "not an ISO8601 datetime".to_string(),
        }),
    }
}

/// Lenient parse of a spreadsheet cell into local wall-clock time.
///
/// Returns `None` for null, non-text, blank or unparsable input; cell
/// quality is not under our control. Text that carries an offset is
/// re-read as wall-clock time in `zone`.
pub fn parse_spreadsheet_text(value: &Value, zone: &LocalZone) -> Option<DatetimeValue> {
    let text = value.as_text()?.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(aware) = parse_with_offset(text) {
        return Some(DatetimeValue::Naive(zone.wall_clock(&aware)));
    }
    parse_naive(text, ISO_NAIVE_FORMATS)
        .or_else(|| parse_naive(text, SPREADSHEET_FORMATS))
        .or_else(|| parse_date(text))
        .map(DatetimeValue::Naive)
}

/// Parse review-form text (`YYYY-MM-DDTHH:MM`, local time) into an aware
/// UTC value. Absent or blank text yields `None`.
///
/// # Errors
///
/// - `Format` if non-blank text does not match the form layout
/// - `AmbiguousLocalTime` / `NonexistentLocalTime` per the zone's DST policy
pub fn parse_form_text(text: Option<&str>, zone: &LocalZone) -> Result<Option<DatetimeValue>> {
    let Some(raw) = text else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let naive = parse_naive(trimmed, FORM_FORMATS).ok_or_else(|| ReconError::Format {
        text: raw.to_string(),
        reason: "expected YYYY-MM-DDTHH:MM".to_string(),
    })?;
    let local = zone.localize(&naive)?;
    Ok(Some(DatetimeValue::Aware(
        local.with_timezone(&Utc).fixed_offset(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pacific() -> LocalZone {
        LocalZone::named("America/Los_Angeles").unwrap()
    }

    #[test]
    fn test_parse_iso8601_with_offsets() {
        let expected = DatetimeValue::utc(2025, 1, 15, 14, 30, 0).unwrap();
        for text in [
            "2025-01-15T14:30:00Z",
            "2025-01-15T14:30:00+00:00",
            "2025-01-15 14:30:00+00:00",
            "2025-01-15T15:30:00+0100",
            "2025-01-15T06:30-08:00",
        ] {
            assert_eq!(parse_iso8601(Some(text), true).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_parse_iso8601_keeps_offset() {
        let parsed = parse_iso8601(Some("2025-01-15T06:30:00-08:00"), true).unwrap();
        let DatetimeValue::Aware(aware) = parsed else {
            panic!("expected aware");
        };
        assert_eq!(aware.offset().local_minus_utc(), -8 * 3600);
    }

    #[test]
    fn test_parse_iso8601_fractional_seconds() {
        let parsed = parse_iso8601(Some("2025-01-15T14:30:00.250Z"), true).unwrap();
        assert_eq!(parsed.to_string(), "2025-01-15T14:30:00.250+00:00");
    }

    #[test]
    fn test_parse_iso8601_missing_timezone() {
        let err = parse_iso8601(Some("2025-01-15T14:30:00"), true).unwrap_err();
        assert!(matches!(err, ReconError::MissingTimezone { .. }));

        let assumed = parse_iso8601(Some("2025-01-15T14:30:00"), false).unwrap();
        assert_eq!(assumed, DatetimeValue::utc(2025, 1, 15, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_iso8601_format_errors() {
        for text in [None, Some(""), Some("   "), Some("yesterday"), Some("2025-01-15")] {
            assert!(
                matches!(parse_iso8601(text, false), Err(ReconError::Format { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_parse_spreadsheet_text_layouts() {
        let zone = pacific();
        let nine = DatetimeValue::naive(2025, 1, 15, 9, 0, 0).unwrap();
        for text in [
            "2025-01-15 09:00:00",
            "2025-01-15T09:00",
            "15/01/2025 09:00",
            " 15/01/2025 09:00:00 ",
            "2025-01-15T17:00:00Z",
        ] {
            assert_eq!(
                parse_spreadsheet_text(&Value::text(text), &zone),
                Some(nine),
                "{text}"
            );
        }
        assert_eq!(
            parse_spreadsheet_text(&Value::text("2025-01-15"), &zone),
            DatetimeValue::naive(2025, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_spreadsheet_text_is_lenient() {
        let zone = pacific();
        for value in [
            Value::Null,
            Value::text(""),
            Value::text("n/a"),
            Value::Integer(45000),
            Value::Datetime(DatetimeValue::naive(2025, 1, 15, 9, 0, 0).unwrap()),
        ] {
            assert_eq!(parse_spreadsheet_text(&value, &zone), None);
        }
    }

    #[test]
    fn test_parse_form_text() {
        let zone = pacific();
        assert_eq!(parse_form_text(None, &zone).unwrap(), None);
        assert_eq!(parse_form_text(Some(""), &zone).unwrap(), None);
        assert_eq!(
            parse_form_text(Some("2025-01-15T09:00"), &zone).unwrap(),
            DatetimeValue::utc(2025, 1, 15, 17, 0, 0)
        );
        assert!(matches!(
            parse_form_text(Some("15/01/2025"), &zone),
            Err(ReconError::Format { .. })
        ));
        assert!(matches!(
            parse_form_text(Some("2025-03-09T02:30"), &zone),
            Err(ReconError::NonexistentLocalTime { .. })
        ));
    }
}
