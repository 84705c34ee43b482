//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_MERGE_ID: &str = "merge_id";

// Record identifiers
pub const FIELD_KEY: &str = "field";
pub const FIELD_ACTOR: &str = "actor";
pub const FIELD_INPUT: &str = "input";

// Collection sizes
pub const FIELD_DIFF_LEN: &str = "diff_len";
pub const FIELD_CHANGED_LEN: &str = "changed_len";
pub const FIELD_PENDING_LEN: &str = "pending_len";
pub const FIELD_APPLIED_LEN: &str = "applied_len";
pub const FIELD_WARNING_LEN: &str = "warning_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Non-fatal signal: a naive value was interpreted as UTC
pub const EVENT_ASSUMED_UTC: &str = "assumed_utc";

/// Non-fatal signal: a field kept its raw text after a failed cast
pub const EVENT_FIELD_WARNING: &str = "field_warning";
