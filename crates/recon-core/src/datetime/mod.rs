//! Datetime contract.
//!
//! Spreadsheets deliver wall-clock text with no offset, storage holds
//! instants, and review forms speak local `YYYY-MM-DDTHH:MM`. This module is
//! the only place values move between the [`DatetimeValue::Naive`] and
//! [`DatetimeValue::Aware`] variants.
//!
//! ## Conventions
//!
//! - A naive value is wall-clock time in the configured [`LocalZone`].
//! - ISO8601 with an explicit offset is the canonical exchange format.
//! - DST: ambiguous local times follow the zone's [`AmbiguityPolicy`];
//!   nonexistent local times (spring-forward gap) are always rejected.
//! - Warnings (a naive value assumed to be UTC) are emitted as `tracing`
//!   WARN events with `event = "assumed_utc"`; they never fail the call.

pub mod bulk;
pub mod convert;
pub mod parse;
pub mod zone;

pub use bulk::{bulk_to_local, bulk_to_utc};
pub use convert::{is_naive, is_utc, to_form_text, to_iso8601, to_local, to_utc};
pub use parse::{parse_form_text, parse_iso8601, parse_spreadsheet_text};
pub use zone::{AmbiguityPolicy, LocalZone};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// A datetime that is either wall-clock only or pinned to a UTC offset.
///
/// Equality of two `Aware` values compares instants, not offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatetimeValue {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl DatetimeValue {
    /// Naive value from calendar fields; `None` if the fields are invalid.
    pub fn naive(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, min, sec)
            .map(DatetimeValue::Naive)
    }

    /// Aware value at offset UTC from calendar fields.
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(|dt| DatetimeValue::Aware(dt.fixed_offset()))
    }

    pub fn is_naive(&self) -> bool {
        matches!(self, DatetimeValue::Naive(_))
    }

    pub fn is_aware(&self) -> bool {
        matches!(self, DatetimeValue::Aware(_))
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            DatetimeValue::Naive(_) => "naive",
            DatetimeValue::Aware(_) => "aware",
        }
    }
}

/// ISO8601; naive values render without an offset.
impl std::fmt::Display for DatetimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatetimeValue::Naive(n) => write!(f, "{}", n.format("%Y-%m-%dT%H:%M:%S%.f")),
            DatetimeValue::Aware(a) => f.write_str(&a.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
        }
    }
}
