use crate::errors::ReconError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Native type a raw spreadsheet cell is cast to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FieldType {
    Text,
    Integer,
    Float,
    Boolean,
    Decimal,
    Datetime,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Decimal => "decimal",
            FieldType::Datetime => "datetime",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ReconError;

    /// # Errors
    ///
    /// `UnsupportedType` for any name outside the supported set.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "str" | "string" => Ok(FieldType::Text),
            "int" | "integer" => Ok(FieldType::Integer),
            "float" => Ok(FieldType::Float),
            "bool" | "boolean" => Ok(FieldType::Boolean),
            "decimal" => Ok(FieldType::Decimal),
            "datetime" => Ok(FieldType::Datetime),
            _ => Err(ReconError::UnsupportedType {
                name: name.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = ReconError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Declared native type per field key, supplied by the ingestion side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap(BTreeMap<String, FieldType>);

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, type name)` pairs.
    ///
    /// # Errors
    ///
    /// `UnsupportedType` on the first unknown type name.
    pub fn from_names<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ReconError> {
        pairs
            .into_iter()
            .map(|(key, name)| name.parse::<FieldType>().map(|ty| (key.to_string(), ty)))
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, ty: FieldType) {
        self.0.insert(key.into(), ty);
    }

    pub fn get(&self, key: &str) -> Option<FieldType> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldType)> for TypeMap {
    fn from_iter<I: IntoIterator<Item = (K, FieldType)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, t)| (k.into(), t)).collect())
    }
}
