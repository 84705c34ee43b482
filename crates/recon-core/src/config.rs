//! Configuration for the reconciliation engine.
//!
//! Loaded with precedence: environment > config file > defaults.
//!
//! # Example config file (recon.toml)
//! ```toml
//! [datetime]
//! local_zone = "America/Los_Angeles"
//! ambiguity = "latest"
//!
//! [merge]
//! convert_to_local = false
//! ```

use crate::datetime::{AmbiguityPolicy, LocalZone};
use crate::errors::{ReconError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `datetime.local_zone`
pub const ENV_LOCAL_ZONE: &str = "RECON_LOCAL_ZONE";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconConfig {
    pub datetime: DatetimeConfig,
    pub merge: MergeConfig,
}

/// How naive values are placed on the UTC line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatetimeConfig {
    /// IANA zone name
    pub local_zone: String,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for DatetimeConfig {
    fn default() -> Self {
        Self {
            local_zone: "UTC".to_string(),
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}

impl DatetimeConfig {
    /// Build the configured zone.
    ///
    /// # Errors
    ///
    /// `UnknownZone` if `local_zone` is not an IANA name.
    pub fn local_zone(&self) -> Result<LocalZone> {
        Ok(LocalZone::named(&self.local_zone)?.with_ambiguity(self.ambiguity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Store merged datetimes as local wall-clock time
    pub convert_to_local: bool,
}

impl ReconConfig {
    /// Parse TOML text. Missing tables and keys take their defaults.
    ///
    /// # Errors
    ///
    /// `Config` on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ReconError::Config {
            message: e.to_string(),
        })
    }

    /// Load from an optional file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Config` if it cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply overrides from an environment lookup.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(zone) = lookup(ENV_LOCAL_ZONE).filter(|z| !z.trim().is_empty()) {
            self.datetime.local_zone = zone.trim().to_string();
        }
        self
    }
}
