#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::pacific;
use recon_core::datetime::{
    bulk_to_local, bulk_to_utc, is_naive, is_utc, parse_form_text, parse_iso8601,
    parse_spreadsheet_text, to_form_text, to_iso8601, to_local, to_utc, AmbiguityPolicy,
    DatetimeValue, LocalZone,
};
use recon_core::errors::{ExError, ExErrorKind, ReconError};
use recon_core::logging_facility::test_capture::init_test_capture;
use recon_core::schema::EVENT_ASSUMED_UTC;
use recon_core::value::{Record, Value};

fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DatetimeValue {
    DatetimeValue::naive(y, mo, d, h, mi, 0).unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DatetimeValue {
    DatetimeValue::utc(y, mo, d, h, mi, 0).unwrap()
}

// ===== parse_iso8601 =====

#[test]
fn test_parse_iso8601_requires_offset_when_asked() {
    let err = parse_iso8601(Some("2025-01-15T14:30:00"), true).unwrap_err();
    assert!(matches!(err, ReconError::MissingTimezone { .. }));

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::MissingTimezone);
    assert!(!ex.is_fatal());
}

#[test]
fn test_parse_iso8601_assumes_utc_with_warning() {
    let capture = init_test_capture();
    let input = "2025-01-15T14:30:00";

    let parsed = parse_iso8601(Some(input), false).unwrap();
    assert_eq!(parsed, utc(2025, 1, 15, 14, 30));
    assert_eq!(to_iso8601(&parsed).unwrap(), "2025-01-15T14:30:00+00:00");

    let warnings = capture.warnings_with("input", input);
    assert_eq!(warnings.len(), 1, "expected one assumed_utc warning");
    assert_eq!(warnings[0].event.as_deref(), Some(EVENT_ASSUMED_UTC));
    assert_eq!(warnings[0].op.as_deref(), Some("parse_iso8601"));
}

#[test]
fn test_parse_iso8601_with_offset_is_silent() {
    let capture = init_test_capture();
    let input = "2025-02-03T04:05:06-08:00";

    let parsed = parse_iso8601(Some(input), true).unwrap();
    assert_eq!(parsed, DatetimeValue::utc(2025, 2, 3, 12, 5, 6).unwrap());
    assert!(capture.warnings_with("input", input).is_empty());
}

#[test]
fn test_parse_iso8601_rejects_empty_and_garbage() {
    for text in [None, Some(""), Some("   "), Some("yesterday")] {
        let err = parse_iso8601(text, false).unwrap_err();
        assert!(
            matches!(err, ReconError::Format { .. }),
            "expected Format for {text:?}, got {err:?}"
        );
    }
}

#[test]
fn test_parse_iso8601_accepts_zulu() {
    let parsed = parse_iso8601(Some("2025-01-15T17:00:00Z"), true).unwrap();
    assert_eq!(parsed, utc(2025, 1, 15, 17, 0));
}

// ===== parse_spreadsheet_text =====

#[test]
fn test_spreadsheet_text_is_lenient() {
    let zone = pacific();
    assert_eq!(parse_spreadsheet_text(&Value::Null, &zone), None);
    assert_eq!(parse_spreadsheet_text(&Value::Integer(5), &zone), None);
    assert_eq!(parse_spreadsheet_text(&Value::text(""), &zone), None);
    assert_eq!(parse_spreadsheet_text(&Value::text("n/a"), &zone), None);
}

#[test]
fn test_spreadsheet_text_reads_common_layouts() {
    let zone = pacific();
    assert_eq!(
        parse_spreadsheet_text(&Value::text("2025-01-15 09:00:00"), &zone),
        Some(naive(2025, 1, 15, 9, 0))
    );
    assert_eq!(
        parse_spreadsheet_text(&Value::text("15/01/2025 09:00"), &zone),
        Some(naive(2025, 1, 15, 9, 0))
    );
    assert_eq!(
        parse_spreadsheet_text(&Value::text("2025-01-15"), &zone),
        Some(naive(2025, 1, 15, 0, 0))
    );
}

#[test]
fn test_spreadsheet_text_with_offset_becomes_wall_clock() {
    let parsed = parse_spreadsheet_text(&Value::text("2025-01-15T17:00:00Z"), &pacific());
    assert_eq!(parsed, Some(naive(2025, 1, 15, 9, 0)));
}

// ===== parse_form_text / to_form_text =====

#[test]
fn test_form_text_round_trip() {
    let zone = pacific();
    let parsed = parse_form_text(Some("2025-01-15T09:00"), &zone)
        .unwrap()
        .unwrap();
    assert_eq!(parsed, utc(2025, 1, 15, 17, 0));
    assert_eq!(to_form_text(&parsed, &zone).unwrap(), "2025-01-15T09:00");
}

#[test]
fn test_form_text_empty_is_none() {
    assert_eq!(parse_form_text(None, &pacific()).unwrap(), None);
    assert_eq!(parse_form_text(Some(" "), &pacific()).unwrap(), None);
}

#[test]
fn test_to_form_text_rejects_naive_and_non_utc() {
    let zone = pacific();
    let err = to_form_text(&naive(2025, 1, 15, 9, 0), &zone).unwrap_err();
    assert!(matches!(err, ReconError::TypeMismatch { .. }));

    let offset = parse_iso8601(Some("2025-01-15T09:00:00+01:00"), true).unwrap();
    let err = to_form_text(&offset, &zone).unwrap_err();
    assert!(matches!(err, ReconError::TypeMismatch { ref op, ref expected, .. }
        if op == "to_form_text" && expected == "utc aware"));

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::TypeMismatch);
}

// ===== to_utc / to_local =====

#[test]
fn test_to_utc_rejects_aware() {
    let err = to_utc(&utc(2025, 1, 15, 17, 0), &pacific()).unwrap_err();
    assert!(matches!(err, ReconError::TypeMismatch { ref op, .. } if op == "to_utc"));
}

#[test]
fn test_to_local_rejects_naive_unless_allowed() {
    let zone = pacific();
    let err = to_local(&naive(2025, 1, 15, 9, 0), &zone, false, false).unwrap_err();
    assert!(matches!(err, ReconError::TypeMismatch { .. }));
}

#[test]
fn test_to_local_naive_input_assumed_utc_with_warning() {
    let capture = init_test_capture();
    let value = naive(2031, 1, 15, 17, 0);

    let local = to_local(&value, &pacific(), true, false).unwrap();
    assert_eq!(local, naive(2031, 1, 15, 9, 0));

    let warnings = capture.warnings_with("input", &value.to_string());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].op.as_deref(), Some("to_local"));
}

#[test]
fn test_to_local_strict_utc() {
    let zone = pacific();
    let offset = parse_iso8601(Some("2025-01-15T09:00:00-08:00"), true).unwrap();

    let err = to_local(&offset, &zone, false, true).unwrap_err();
    assert!(matches!(err, ReconError::TimezoneMismatch { .. }));

    assert_eq!(
        to_local(&offset, &zone, false, false).unwrap(),
        naive(2025, 1, 15, 9, 0)
    );
}

#[test]
fn test_to_utc_follows_ambiguity_policy() {
    // 01:30 happens twice on 2025-11-02 in Los Angeles
    let local = naive(2025, 11, 2, 1, 30);

    let earliest = to_utc(&local, &pacific()).unwrap();
    assert_eq!(earliest, utc(2025, 11, 2, 8, 30));

    let latest = to_utc(&local, &pacific().with_ambiguity(AmbiguityPolicy::Latest)).unwrap();
    assert_eq!(latest, utc(2025, 11, 2, 9, 30));

    let err = to_utc(&local, &pacific().with_ambiguity(AmbiguityPolicy::Reject)).unwrap_err();
    assert!(matches!(err, ReconError::AmbiguousLocalTime { .. }));
}

#[test]
fn test_to_utc_rejects_dst_gap() {
    // 02:30 does not exist on 2025-03-09 in Los Angeles
    let err = to_utc(&naive(2025, 3, 9, 2, 30), &pacific()).unwrap_err();
    assert!(matches!(err, ReconError::NonexistentLocalTime { ref zone, .. } if zone == "America/Los_Angeles"));
}

// ===== to_iso8601 / predicates =====

#[test]
fn test_to_iso8601_rejects_naive() {
    let err = to_iso8601(&naive(2025, 1, 15, 9, 0)).unwrap_err();
    assert!(matches!(err, ReconError::TypeMismatch { .. }));
}

#[test]
fn test_predicates_are_total() {
    assert!(!is_naive(&Value::Null));
    assert!(!is_utc(&Value::Null));
    assert!(!is_naive(&Value::text("2025-01-15T09:00:00")));

    assert!(is_naive(&Value::Datetime(naive(2025, 1, 15, 9, 0))));
    assert!(is_utc(&Value::Datetime(utc(2025, 1, 15, 9, 0))));

    let offset = parse_iso8601(Some("2025-01-15T09:00:00+01:00"), true).unwrap();
    assert!(!is_utc(&Value::Datetime(offset)));
}

// ===== bulk conversion =====

#[test]
fn test_bulk_to_utc_nested() {
    let input: Record = [
        ("a", Value::Sequence(vec![Value::Datetime(naive(2025, 1, 15, 9, 0))])),
        ("b", Value::text("text")),
    ]
    .into_iter()
    .collect();

    let out = bulk_to_utc(&Value::Mapping(input), &pacific()).unwrap();

    let expected: Record = [
        ("a", Value::Sequence(vec![Value::Datetime(utc(2025, 1, 15, 17, 0))])),
        ("b", Value::text("text")),
    ]
    .into_iter()
    .collect();
    assert_eq!(out, Value::Mapping(expected));
}

#[test]
fn test_bulk_to_local_walks_sets_and_mappings() {
    let inner: Record = [("at", Value::Datetime(utc(2025, 1, 15, 17, 0)))]
        .into_iter()
        .collect();
    let input = Value::Sequence(vec![
        Value::set(vec![Value::Datetime(utc(2025, 1, 16, 17, 0)), Value::Integer(7)]),
        Value::Mapping(inner),
    ]);

    let out = bulk_to_local(&input, &pacific(), false, true).unwrap();

    let expected_inner: Record = [("at", Value::Datetime(naive(2025, 1, 15, 9, 0)))]
        .into_iter()
        .collect();
    assert_eq!(
        out,
        Value::Sequence(vec![
            Value::Set(vec![Value::Datetime(naive(2025, 1, 16, 9, 0)), Value::Integer(7)]),
            Value::Mapping(expected_inner),
        ])
    );
}

#[test]
fn test_bulk_conversion_fails_on_first_bad_leaf() {
    let input = Value::Sequence(vec![
        Value::Datetime(naive(2025, 1, 15, 9, 0)),
        Value::Datetime(naive(2025, 3, 9, 2, 30)),
    ]);
    let err = bulk_to_utc(&input, &pacific()).unwrap_err();
    assert!(matches!(err, ReconError::NonexistentLocalTime { .. }));
}

#[test]
fn test_named_zone_rejects_unknown() {
    let err = LocalZone::named("Pacific/Atlantis").unwrap_err();
    assert!(matches!(err, ReconError::UnknownZone { .. }));
    assert!(ExError::from(err).is_fatal());
}
