//! Field-level diff between a staged upload and the persisted record.
//!
//! ## Entry point
//!
//! ```
//! use recon_core::datetime::LocalZone;
//! use recon_core::diff::compute_diff;
//! use recon_core::value::{Record, Value};
//!
//! let uploaded: Record = [("notes", "fixed")].into_iter().collect();
//! let persisted: Record = [("notes", Value::Null)].into_iter().collect();
//!
//! let diffs = compute_diff(&uploaded, Some(&persisted), &LocalZone::utc());
//! assert!(diffs[0].requires_confirmation);
//! let summary = recon_core::diff::render_review_summary(&diffs);
//! assert!(summary.contains("notes"));
//! ```
//!
//! ## Guarantees
//!
//! - **Upload-scoped**: only keys present in the upload are diffed, in upload
//!   order; keys unique to the persisted record are never candidates.
//! - **Total**: data content never makes the diff fail; mismatches surface as
//!   [`FieldDiff`] rows.
//! - **Deletion is silent**: clearing a field to empty never requires
//!   confirmation; adding or overwriting with non-empty content does.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{compute_diff, compute_diff_coerced, pending_confirmations};
pub use human_summary::render_review_summary;
pub use model::FieldDiff;
