//! Domain-level errors.
//!
//! These errors represent business rule violations and malformed classifier
//! output. They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

use crate::adapter::SourceKind;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password-related errors
    #[error("Password error: {0}")]
    Password(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Invalid credentials provided
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Classifier output could not be turned into a distribution
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// A scoring policy was asked to score input it does not understand
    #[error("Scoring error: {0}")]
    Scoring(String),

    /// Internal domain error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Create a scoring error
    pub fn scoring(msg: impl Into<String>) -> Self {
        DomainError::Scoring(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Raw classifier output that cannot be normalized.
///
/// Callers must not substitute a default distribution for any of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    #[error("{origin} returned an empty result")]
    Empty { origin: SourceKind },

    #[error("{origin} returned malformed output: {reason}")]
    Malformed { origin: SourceKind, reason: String },

    #[error("{origin} returned unrecognized emotion label '{label}'")]
    UnknownLabel { origin: SourceKind, label: String },

    #[error("{origin} returned invalid score {score} for '{label}'")]
    InvalidScore {
        origin: SourceKind,
        label: String,
        score: f64,
    },
}

impl AdapterError {
    /// Create a malformed-output error
    pub fn malformed(origin: SourceKind, reason: impl Into<String>) -> Self {
        AdapterError::Malformed {
            origin,
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
