use crate::errors::{ReconError, Result};
use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How to resolve a local time that occurs twice (DST fall-back overlap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Take the first occurrence (the offset in force before the transition)
    #[default]
    Earliest,
    /// Take the second occurrence
    Latest,
    /// Fail with `AmbiguousLocalTime`
    Reject,
}

/// The zone naive values are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalZone {
    tz: Tz,
    ambiguity: AmbiguityPolicy,
}

impl LocalZone {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    pub fn utc() -> Self {
        Self::new(Tz::UTC)
    }

    /// Look up an IANA zone name such as `America/Los_Angeles`.
    ///
    /// # Errors
    ///
    /// `UnknownZone` if the name is not in the time zone database.
    pub fn named(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ReconError::UnknownZone {
                name: name.to_string(),
            })
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn ambiguity(&self) -> AmbiguityPolicy {
        self.ambiguity
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Pin a wall-clock time to this zone.
    pub(crate) fn localize(&self, naive: &NaiveDateTime) -> Result<DateTime<FixedOffset>> {
        match self.tz.from_local_datetime(naive) {
            LocalResult::Single(dt) => Ok(dt.fixed_offset()),
            LocalResult::Ambiguous(earliest, latest) => match self.ambiguity {
                AmbiguityPolicy::Earliest => Ok(earliest.fixed_offset()),
                AmbiguityPolicy::Latest => Ok(latest.fixed_offset()),
                AmbiguityPolicy::Reject => Err(ReconError::AmbiguousLocalTime {
                    local: naive.to_string(),
                    zone: self.name().to_string(),
                }),
            },
            LocalResult::None => Err(ReconError::NonexistentLocalTime {
                local: naive.to_string(),
                zone: self.name().to_string(),
            }),
        }
    }

    /// Wall-clock reading of an instant in this zone.
    pub(crate) fn wall_clock<Z: TimeZone>(&self, instant: &DateTime<Z>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }
}

impl Default for LocalZone {
    fn default() -> Self {
        Self::utc()
    }
}
