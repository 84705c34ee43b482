use crate::value::FieldType;
use thiserror::Error;

/// Result type alias using ReconError
pub type Result<T> = std::result::Result<T, ReconError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// testing, and review-page responses. Kinds are split into validation
/// outcomes (the reviewer is shown a warning) and fatal conditions (the
/// request is aborted); see [`ExErrorKind::is_fatal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation (data content)
    /// Text is empty or unparsable where a value is required
    InvalidFormat,
    /// ISO8601 text lacks an offset and one was required
    MissingTimezone,
    /// A naive value was passed where an aware one was required, or vice versa
    TypeMismatch,
    /// An aware value is not at UTC and strict UTC was required
    TimezoneMismatch,
    /// Text cannot be coerced to the declared field type
    CastFailed,
    /// A local wall-clock time occurs twice and the policy rejects it
    AmbiguousLocalTime,
    /// A local wall-clock time falls in a DST gap
    NonexistentLocalTime,

    // Fatal (programming/configuration)
    /// A type map names a type the caster does not support
    UnsupportedType,
    /// A configured time zone name is not in the IANA database
    UnknownZone,
    /// Configuration could not be loaded
    Config,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidFormat => "ERR_INVALID_FORMAT",
            ExErrorKind::MissingTimezone => "ERR_MISSING_TIMEZONE",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::TimezoneMismatch => "ERR_TIMEZONE_MISMATCH",
            ExErrorKind::CastFailed => "ERR_CAST_FAILED",
            ExErrorKind::AmbiguousLocalTime => "ERR_AMBIGUOUS_LOCAL_TIME",
            ExErrorKind::NonexistentLocalTime => "ERR_NONEXISTENT_LOCAL_TIME",
            ExErrorKind::UnsupportedType => "ERR_UNSUPPORTED_TYPE",
            ExErrorKind::UnknownZone => "ERR_UNKNOWN_ZONE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True if this kind should abort the request rather than be shown
    /// to the reviewer as a per-field warning.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExErrorKind::InvalidFormat
                | ExErrorKind::MissingTimezone
                | ExErrorKind::TypeMismatch
                | ExErrorKind::TimezoneMismatch
                | ExErrorKind::CastFailed
                | ExErrorKind::AmbiguousLocalTime
                | ExErrorKind::NonexistentLocalTime
        )
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging and for per-field warnings on the review page.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    field: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            field: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add field key context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the field key context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Shorthand for `self.kind().is_fatal()`
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for the datetime contract, casting and merge operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconError {
    // ===== Datetime Errors =====
    /// Text is empty or cannot be parsed
    #[error("Cannot parse {text:?}: {reason}")]
    Format { text: String, reason: String },

    /// ISO8601 text has no UTC offset
    #[error("Datetime {text:?} has no timezone offset")]
    MissingTimezone { text: String },

    /// Wrong datetime variant for the operation
    #[error("{op} expects a {expected} datetime, got {found}")]
    TypeMismatch {
        op: String,
        expected: String,
        found: String,
    },

    /// Aware value is not at UTC
    #[error("Expected a UTC datetime, got offset {offset}")]
    TimezoneMismatch { offset: String },

    /// Local wall-clock time occurs twice in the zone
    #[error("Local time {local} is ambiguous in {zone}")]
    AmbiguousLocalTime { local: String, zone: String },

    /// Local wall-clock time does not exist in the zone
    #[error("Local time {local} does not exist in {zone}")]
    NonexistentLocalTime { local: String, zone: String },

    // ===== Casting Errors =====
    /// Text cannot be converted to the declared type
    #[error("Cannot cast {text:?} to {target_type}{}", field.as_ref().map(|f| format!(" for field {f}")).unwrap_or_default())]
    Cast {
        field: Option<String>,
        text: String,
        target_type: FieldType,
        reason: String,
    },

    /// Type name not known to the caster
    #[error("Unsupported field type: {name}")]
    UnsupportedType { name: String },

    // ===== Configuration Errors =====
    /// Time zone name not in the IANA database
    #[error("Unknown time zone: {name}")]
    UnknownZone { name: String },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    // ===== Integration Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}

impl ReconError {
    /// Attach a field name to a cast error that does not yet carry one.
    /// Other errors are returned unchanged.
    pub fn for_field(self, key: &str) -> Self {
        match self {
            ReconError::Cast {
                field: None,
                text,
                target_type,
                reason,
            } => ReconError::Cast {
                field: Some(key.to_string()),
                text,
                target_type,
                reason,
            },
            other => other,
        }
    }
}

impl From<ReconError> for ExError {
    fn from(err: ReconError) -> Self {
        let message = err.to_string();
        match err {
            ReconError::Format { .. } => {
                ExError::new(ExErrorKind::InvalidFormat).with_message(message)
            }
            ReconError::MissingTimezone { .. } => {
                ExError::new(ExErrorKind::MissingTimezone).with_message(message)
            }
            ReconError::TypeMismatch { op, .. } => ExError::new(ExErrorKind::TypeMismatch)
                .with_op(op)
                .with_message(message),
            ReconError::TimezoneMismatch { .. } => {
                ExError::new(ExErrorKind::TimezoneMismatch).with_message(message)
            }
            ReconError::AmbiguousLocalTime { .. } => {
                ExError::new(ExErrorKind::AmbiguousLocalTime).with_message(message)
            }
            ReconError::NonexistentLocalTime { .. } => {
                ExError::new(ExErrorKind::NonexistentLocalTime).with_message(message)
            }
            ReconError::Cast { field, .. } => {
                let ex = ExError::new(ExErrorKind::CastFailed)
                    .with_op("cast")
                    .with_message(message);
                match field {
                    Some(field) => ex.with_field(field),
                    None => ex,
                }
            }
            ReconError::UnsupportedType { .. } => {
                ExError::new(ExErrorKind::UnsupportedType).with_message(message)
            }
            ReconError::UnknownZone { .. } => {
                ExError::new(ExErrorKind::UnknownZone).with_message(message)
            }
            ReconError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),
            ReconError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            ReconError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

/// Conversion from serde_json::Error to ReconError
impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ReconError {
    fn from(err: std::io::Error) -> Self {
        ReconError::Io {
            message: err.to_string(),
        }
    }
}
