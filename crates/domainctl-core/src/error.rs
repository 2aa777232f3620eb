//! Error types for domainctl
//!
//! Every failure a reconciler can hand back to the host is one variant of
//! [`Error`]. Call sites wrap errors with [`Error::with_context`]; matching
//! on the failure class goes through [`Error::kind`], which looks through
//! any amount of context wrapping.

use thiserror::Error;

/// Result type alias for domainctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for domainctl
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or conflicting configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request could not be built or the connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a status other than the expected one
    #[error("Request failed with status: {status_line}")]
    StatusMismatch {
        /// Status code the caller declared as success
        expected: u16,
        /// Status code actually received
        status: u16,
        /// Full status line, e.g. "404 Not Found"
        status_line: String,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The remote entity does not exist
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity kind, e.g. "sending domain"
        entity: String,
        /// Natural key of the entity
        key: String,
    },

    /// A remote verification predicate did not hold
    #[error("Verification failed: {field} is {observed}")]
    VerificationFailed {
        /// Response field that was checked
        field: String,
        /// Observed value of that field
        observed: String,
    },

    /// The remote API answered successfully but with an unexpected payload
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Update was requested on a resource that only supports replacement
    #[error(
        "{resource_type} does not support in-place updates; the resource must be destroyed and recreated"
    )]
    UnsupportedOperation {
        /// Host-facing resource type name
        resource_type: String,
    },

    /// Update was requested with changes to attributes that cannot be
    /// changed in place on an otherwise updatable resource
    #[error(
        "{resource_type} cannot change {attributes} in place; the resource must be destroyed and recreated"
    )]
    ReplacementRequired {
        /// Host-facing resource type name
        resource_type: String,
        /// Comma-separated replace-triggering attributes
        attributes: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error annotated with the call site that observed it
    #[error("{context}: {source}")]
    Context {
        /// What the caller was doing
        context: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },
}

/// Structural classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Transport,
    StatusMismatch,
    NotFound,
    VerificationFailed,
    UnexpectedResponse,
    UnsupportedOperation,
    Decode,
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Create a verification failure
    pub fn verification_failed(field: impl Into<String>, observed: impl Into<String>) -> Self {
        Self::VerificationFailed {
            field: field.into(),
            observed: observed.into(),
        }
    }

    /// Create an unexpected-response error
    pub fn unexpected_response(msg: impl Into<String>) -> Self {
        Self::UnexpectedResponse(msg.into())
    }

    /// Create an unsupported-operation error for a replace-only resource
    pub fn unsupported_operation(resource_type: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            resource_type: resource_type.into(),
        }
    }

    /// Create a replacement-required error naming the offending attributes
    pub fn replacement_required(resource_type: impl Into<String>, attributes: &[&str]) -> Self {
        Self::ReplacementRequired {
            resource_type: resource_type.into(),
            attributes: attributes.join(", "),
        }
    }

    /// Wrap this error with call-site context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context stripped
    pub fn root(&self) -> &Error {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classify this error, looking through context wrapping
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::StatusMismatch { .. } => ErrorKind::StatusMismatch,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::VerificationFailed { .. } => ErrorKind::VerificationFailed,
            Self::UnexpectedResponse(_) => ErrorKind::UnexpectedResponse,
            Self::UnsupportedOperation { .. } | Self::ReplacementRequired { .. } => {
                ErrorKind::UnsupportedOperation
            }
            Self::Json(_) => ErrorKind::Decode,
            // root() never returns a Context
            Self::Context { .. } => ErrorKind::UnexpectedResponse,
        }
    }

    /// True when the remote entity is absent
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// HTTP status carried by a status mismatch, if any
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::StatusMismatch { status, .. } => Some(*status),
            _ => None,
        }
    }
}
