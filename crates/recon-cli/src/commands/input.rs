//! Shared loading of records, type maps and configuration

use clap::Args;
use recon_core::cast::coerce_record_lenient;
use recon_core::config::ReconConfig;
use recon_core::datetime::LocalZone;
use recon_core::errors::ReconError;
use recon_core::value::{Record, TypeMap, Value};
use std::path::{Path, PathBuf};

/// Inputs common to `diff` and `merge`
#[derive(Debug, Args)]
pub struct ReconInputs {
    /// Staged upload (JSON object)
    #[arg(long)]
    pub uploaded: PathBuf,

    /// Persisted record (JSON object)
    #[arg(long)]
    pub persisted: PathBuf,

    /// Field type map (JSON object of field -> type name)
    #[arg(long)]
    pub types: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Everything a command needs, loaded and typed
pub struct Loaded {
    pub uploaded: Record,
    pub persisted: Record,
    pub types: TypeMap,
    pub zone: LocalZone,
    pub convert_to_local: bool,
}

impl ReconInputs {
    /// Read all inputs and cast both records with the type map.
    ///
    /// Fields that fail to cast keep their raw text; each one is reported
    /// on stderr as a warning.
    pub fn load(&self) -> Result<Loaded, Box<dyn std::error::Error>> {
        let config = ReconConfig::load(self.config.as_deref())?;
        let zone = config.datetime.local_zone()?;
        let convert_to_local = config.merge.convert_to_local;

        let types = match &self.types {
            Some(path) => serde_json::from_str::<TypeMap>(&std::fs::read_to_string(path)?)?,
            None => TypeMap::new(),
        };

        let uploaded = read_typed(&self.uploaded, &types, &zone, convert_to_local)?;
        let persisted = read_typed(&self.persisted, &types, &zone, convert_to_local)?;

        Ok(Loaded {
            uploaded,
            persisted,
            types,
            zone,
            convert_to_local,
        })
    }
}

fn read_typed(
    path: &Path,
    types: &TypeMap,
    zone: &LocalZone,
    convert_to_local: bool,
) -> Result<Record, ReconError> {
    let report = coerce_record_lenient(&read_record(path)?, types, zone, convert_to_local)?;
    for warning in &report.warnings {
        eprintln!(
            "Warning: {}: [{}] {}",
            path.display(),
            warning.code,
            warning.message
        );
    }
    Ok(report.record)
}

/// Read a JSON object as a record, keeping key order.
pub fn read_record(path: &Path) -> Result<Record, ReconError> {
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    match Value::from(json) {
        Value::Mapping(record) => Ok(record),
        other => Err(ReconError::Serialization {
            message: format!(
                "{}: expected a JSON object, found {}",
                path.display(),
                other.kind_name()
            ),
        }),
    }
}
