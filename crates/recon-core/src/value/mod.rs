//! Closed value model for staged uploads and persisted records.
//!
//! Every value the engine handles is a [`Value`]: a scalar, a
//! [`DatetimeValue`](crate::datetime::DatetimeValue), or a finite tree of
//! sequences, sets and mappings. Values own their children, so cyclic
//! structures cannot be built and structural recursion always terminates.

pub mod model;
pub mod record;
pub mod types;

pub use model::Value;
pub use record::Record;
pub use types::{FieldType, TypeMap};
