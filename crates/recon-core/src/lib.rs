//! Recon Core - field-level reconciliation of spreadsheet uploads
//!
//! This crate provides the pure-function kernel for reconciling a staged
//! upload against a persisted record, including:
//! - A closed value model with insertion-ordered records
//! - The datetime contract (naive wall-clock vs aware instants, DST policy)
//! - Canonical value normalization for comparison
//! - Type-casting of raw text into declared field types
//! - The diff engine and reviewer-facing summary
//! - The confirmation-gated merge with its change log
//!
//! Persistence, HTTP and review pages live with the caller; nothing here
//! performs I/O other than loading configuration.

pub mod cast;
pub mod config;
pub mod datetime;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod merge;
pub mod normalize;
pub mod value;

pub use recon_core_types::schema;

// Re-export commonly used types
pub use cast::{cast, coerce_record, coerce_record_lenient, CoercionReport, FieldWarning};
pub use config::ReconConfig;
pub use datetime::{AmbiguityPolicy, DatetimeValue, LocalZone};
pub use diff::{compute_diff, FieldDiff};
pub use errors::{ExError, ExErrorKind, ReconError, Result};
pub use merge::{apply_patch, ChangeLog, ConfirmationSet, MergeContext, MergeOutcome};
pub use normalize::normalize;
pub use recon_core_types::MergeId;
pub use value::{FieldType, Record, TypeMap, Value};
