//! Unified application error types for Zatrano.
//!
//! The persistence layer reports failures through a small taxonomy
//! ([`ErrorKind`]) that the handler layer translates into HTTP statuses
//! and flash messages. All crates map their internal errors into
//! [`AppError`] for consistent propagation through the `?` operator.

use std::fmt;
use thiserror::Error;

/// Error categories surfaced by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A lookup by id, key or slug found no matching, non-deleted row.
    NotFound,
    /// A uniqueness, foreign-key, not-null or check rule was rejected.
    ConstraintViolation,
    /// A step inside an aggregate transaction failed; nothing was committed.
    TransactionFailure,
    /// An update or delete referenced a row that does not exist.
    Precondition,
    /// The store connection or driver failed independently of the query.
    StoreUnavailable,
    /// A query failed for any other reason.
    Database,
    /// Caller input was rejected before reaching the store.
    Validation,
    /// The unique key generator ran out of attempts.
    KeyExhausted,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::ConstraintViolation => write!(f, "CONSTRAINT_VIOLATION"),
            Self::TransactionFailure => write!(f, "TRANSACTION_FAILURE"),
            Self::Precondition => write!(f, "PRECONDITION"),
            Self::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            Self::Database => write!(f, "DATABASE"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::KeyExhausted => write!(f, "KEY_EXHAUSTED"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Zatrano.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a constraint-violation error.
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConstraintViolation, message)
    }

    /// Create a transaction-failure error.
    pub fn transaction_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransactionFailure, message)
    }

    /// Create a precondition error.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Precondition, message)
    }

    /// Create a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreUnavailable, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a key-exhausted error.
    pub fn key_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyExhausted, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Re-tag a generic query failure as a failed transaction.
    ///
    /// Typed failures keep their kind so callers can still tell a
    /// duplicate slug or a missing row from a broken transaction.
    pub fn into_transaction_failure(mut self) -> Self {
        if self.kind == ErrorKind::Database {
            self.kind = ErrorKind::TransactionFailure;
        }
        self
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
