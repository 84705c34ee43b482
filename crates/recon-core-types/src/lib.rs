//! Core types shared across Recon facilities
//!
//! - **Correlation types**: MergeId for tagging audit logs
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::MergeId;
