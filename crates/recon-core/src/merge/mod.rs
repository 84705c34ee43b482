//! Confirmation-gated merge.
//!
//! Applies the changed fields of a diff to a copy of the persisted record:
//! a change that needs confirmation is applied only if its key is in the
//! reviewer's [`ConfirmationSet`]. Every applied change lands in the
//! [`ChangeLog`]; nothing is written to storage here.

pub mod apply;
pub mod model;

pub use apply::apply_patch;
pub use model::{ChangeLog, ChangeLogEntry, ConfirmationSet, MergeContext, MergeOutcome};
