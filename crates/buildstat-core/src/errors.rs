use buildstat_core_types::BuildEventId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Snapshot ingestion
    /// Raw compilation result is missing required fields or has wrong types
    MalformedSnapshot,
    /// Two artifacts in one collection share a name (reported as a warning)
    DuplicateArtifactName,

    // Persistence / output
    /// Snapshot record cannot be read or written because the medium failed
    StoreUnavailable,
    /// Renderer or report sink could not produce output
    RenderFailure,

    // Configuration
    InvalidConfig,

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
            ExErrorKind::MalformedSnapshot => "ERR_MALFORMED_SNAPSHOT",
            ExErrorKind::DuplicateArtifactName => "ERR_DUPLICATE_ARTIFACT_NAME",
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::RenderFailure => "ERR_RENDER_FAILURE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, artifact
/// collection and name, build event) for debugging and structured logs.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    collection: Option<String>,
    artifact: Option<String>,
    build_event_id: Option<BuildEventId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            collection: None,
            artifact: None,
            build_event_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add artifact collection context ("modules" or "assets")
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Add artifact name context
    pub fn with_artifact(mut self, name: impl Into<String>) -> Self {
        self.artifact = Some(name.into());
        self
    }

    /// Add build event correlation
    pub fn with_build_event_id(mut self, id: BuildEventId) -> Self {
        self.build_event_id = Some(id);
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

    /// Get the collection context, if any
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    /// Get the artifact name context, if any
    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    /// Get the build event id, if any
    pub fn build_event_id(&self) -> Option<&BuildEventId> {
        self.build_event_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {:?}", self.code(), self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(collection) = &self.collection {
            write!(f, " (collection: {})", collection)?;
        }
        if let Some(artifact) = &self.artifact {
            write!(f, " (artifact: {})", artifact)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Normalizer failures for a raw compilation result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// The compilation result root is not a JSON object
    #[error("compilation result must be a JSON object")]
    NotAnObject,

    /// A required field is absent
    #[error("required field `{field}` is absent")]
    MissingField { field: String },

    /// A field is present with the wrong shape
    #[error("field `{field}` is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    /// `modules` or `assets` is not an array
    #[error("`{collection}` must be an array")]
    CollectionNotSequence { collection: String },

    /// An artifact entry is not a JSON object
    #[error("{collection}[{index}] must be an object")]
    ArtifactNotObject { collection: String, index: usize },

    /// An artifact entry has no string `name`
    #[error("{collection}[{index}] is missing a string `name`")]
    ArtifactMissingName { collection: String, index: usize },

    /// An artifact field is present with the wrong shape
    #[error("{collection}[{index}] ({name}): `{field}` is invalid: {reason}")]
    InvalidArtifactField {
        collection: String,
        index: usize,
        name: String,
        field: String,
        reason: String,
    },
}

impl From<SnapshotError> for ExError {
    fn from(err: SnapshotError) -> Self {
        let base = ExError::new(ExErrorKind::MalformedSnapshot)
            .with_op("normalize")
            .with_message(err.to_string());
        match err {
            SnapshotError::CollectionNotSequence { collection }
            | SnapshotError::ArtifactNotObject { collection, .. }
            | SnapshotError::ArtifactMissingName { collection, .. } => {
                base.with_collection(collection)
            }
            SnapshotError::InvalidArtifactField {
                collection, name, ..
            } => base.with_collection(collection).with_artifact(name),
            SnapshotError::NotAnObject
            | SnapshotError::MissingField { .. }
            | SnapshotError::InvalidField { .. } => base,
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
