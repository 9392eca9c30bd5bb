use thiserror::Error;

/// Result type alias using the structured ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (CLI, HTTP layers,
/// bot handlers) can translate into user-facing responses. "Not found" on
/// reads is deliberately absent from store results: reads return `Option`,
/// and `NotFound` is only raised by outer layers that require a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    UnknownField,
    TypeMismatch,
    ImmutableField,

    // Lookup
    NotFound,

    // Storage
    /// A write violated a uniqueness, foreign-key, not-null or check constraint
    ConstraintViolation,
    /// Any other transaction failure (connectivity, locking, I/O inside the engine)
    Storage,

    // Integration
    Io,
    Serialization,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownField => "ERR_UNKNOWN_FIELD",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::ImmutableField => "ERR_IMMUTABLE_FIELD",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Storage => "ERR_STORAGE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus the
/// operation and record context it was raised in.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_kind: Option<String>,
    record_id: Option<i64>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_kind: None,
            record_id: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record kind context (e.g. `event`)
    pub fn with_record_kind(mut self, kind: impl Into<String>) -> Self {
        self.record_kind = Some(kind.into());
        self
    }

    /// Add record identifier context
    pub fn with_record_id(mut self, id: i64) -> Self {
        self.record_id = Some(id);
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn record_kind(&self) -> Option<&str> {
        self.record_kind.as_deref()
    }

    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(kind) = &self.record_kind {
            write!(f, " (kind: {})", kind)?;
        }
        if let Some(id) = self.record_id {
            write!(f, " (id: {})", id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for record validation and lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvplanError {
    /// Field name is not part of the kind's declared field set
    #[error("Unknown field '{field}' for kind {kind}")]
    UnknownField { kind: String, field: String },

    /// Value does not fit the field's declared type or nullability
    #[error("Field '{field}' of kind {kind} expects {expected}, got {actual}")]
    TypeMismatch {
        kind: String,
        field: String,
        expected: String,
        actual: String,
    },

    /// Key fields are assigned by the store or fixed at creation
    #[error("Field '{field}' is part of the {kind} key and cannot be set here")]
    ImmutableField { kind: String, field: String },

    /// Textual input could not be converted to the field's type
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Projection relation name not recognised
    #[error("Unknown relation: {name}")]
    UnknownRelation { name: String },

    /// A record required by the caller does not exist
    #[error("{kind} {id} not found")]
    RecordNotFound { kind: String, id: i64 },

    /// JSON encoding/decoding failure
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },
}

impl From<EvplanError> for ExError {
    fn from(err: EvplanError) -> Self {
        let message = err.to_string();
        match err {
            EvplanError::UnknownField { kind, field } => ExError::new(ExErrorKind::UnknownField)
                .with_record_kind(kind)
                .with_field(field)
                .with_message(message),

            EvplanError::TypeMismatch { kind, field, .. } => {
                ExError::new(ExErrorKind::TypeMismatch)
                    .with_record_kind(kind)
                    .with_field(field)
                    .with_message(message)
            }

            EvplanError::ImmutableField { kind, field } => {
                ExError::new(ExErrorKind::ImmutableField)
                    .with_record_kind(kind)
                    .with_field(field)
                    .with_message(message)
            }

            EvplanError::InvalidValue { field, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_field(field)
                .with_message(message),

            EvplanError::UnknownRelation { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            EvplanError::RecordNotFound { kind, id } => ExError::new(ExErrorKind::NotFound)
                .with_record_kind(kind)
                .with_record_id(id)
                .with_message(message),

            EvplanError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for EvplanError {
    fn from(err: serde_json::Error) -> Self {
        EvplanError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        EvplanError::from(err).into()
    }
}
