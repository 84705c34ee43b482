use recon_core::datetime::LocalZone;
use recon_core::value::{Record, Value};

/// Pacific time, the zone most fixtures are written in
#[allow(dead_code)]
pub fn pacific() -> LocalZone {
    LocalZone::named("America/Los_Angeles").unwrap()
}

/// Build a record from key/value pairs, keeping their order
#[allow(dead_code)]
pub fn record<V: Into<Value>>(pairs: Vec<(&str, V)>) -> Record {
    pairs.into_iter().collect()
}

/// Record as it arrives from the ingestion side: every value is raw text
#[allow(dead_code)]
pub fn raw_upload(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}
