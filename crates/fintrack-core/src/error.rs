//! Error taxonomy shared by every layer.
//!
//! Three classes are kept apart:
//!
//! - [`RepositoryError`]: sentinel failures reported by storage.
//! - [`ServiceError`]: the closed set of five kinds a caller may observe.
//! - Validation failures: a list of [`FieldError`]s produced before any I/O.
//!
//! [`FintrackError`] is the union a service method returns.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

// ============ Repository Errors ============

/// Sentinel failures returned by repository implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The addressed row (or a row it references) does not exist.
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("record is duplicated")]
    Duplicated,

    /// A transaction amount exceeds the spending limit of its category.
    #[error("category limit exceeded")]
    LimitExceeded,

    /// The request deadline elapsed before storage answered.
    #[error("deadline exceeded")]
    Timeout,

    /// Any other driver or storage failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result alias for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // unique_violation
                Some("23505") => Self::Duplicated,
                // foreign_key_violation: owner or category is missing
                Some("23503") => Self::NotFound,
                _ => Self::Backend(err.to_string()),
            },
            sqlx::Error::PoolTimedOut => Self::Timeout,
            _ => Self::Backend(err.to_string()),
        }
    }
}

// ============ Service Errors ============

/// The closed set of errors a service operation may report.
///
/// Transports choose a response code from this enum alone.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceError {
    /// Resource not found
    #[error("resource is not found")]
    NotFound,

    /// Unique field already taken
    #[error("resource is duplicated")]
    Duplicated,

    /// Storage failure with no client-facing meaning
    #[error("error database")]
    Database,

    /// Empty or malformed query filter
    #[error("invalid filter value")]
    ValidateType,

    /// Transaction count above the category limit
    #[error("exceeded the limit")]
    Limit,
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Duplicated => 409,
            Self::ValidateType => 400,
            Self::Limit => 422,
            Self::Database => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Duplicated => "DUPLICATED",
            Self::Database => "DATABASE_ERROR",
            Self::ValidateType => "INVALID_FILTER",
            Self::Limit => "LIMIT_EXCEEDED",
        }
    }

    /// Returns true for errors caused by the request rather than the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database)
    }
}

/// Translates repository sentinels into service errors.
///
/// Anything without an explicit arm becomes [`ServiceError::Database`] so that
/// driver detail never reaches a caller.
impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Duplicated => Self::Duplicated,
            RepositoryError::LimitExceeded => Self::Limit,
            _ => Self::Database,
        }
    }
}

// ============ Application Errors ============

/// Error returned by service operations and startup code.
#[derive(Error, Debug)]
pub enum FintrackError {
    /// Input rejected before any I/O
    #[error("validation failed: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// Translated repository outcome
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure while bringing the process up or down
    #[error("Startup error: {0}")]
    Startup(String),
}

impl FintrackError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Service(err) => err.status_code(),
            Self::Configuration(_) | Self::Startup(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Service(err) => err.error_code(),
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Startup(_) => "STARTUP_ERROR",
        }
    }

    /// Returns the service error kind, if this is one.
    #[must_use]
    pub const fn service_error(&self) -> Option<ServiceError> {
        match self {
            Self::Service(err) => Some(*err),
            _ => None,
        }
    }

    /// Returns the field errors, if this is a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<RepositoryError> for FintrackError {
    fn from(err: RepositoryError) -> Self {
        Self::Service(err.into())
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serializable error body for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field-level errors for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request id for log correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

impl ErrorResponse {
    /// Creates an error response from a `FintrackError`.
    ///
    /// Validation failures carry their field list; every other error is
    /// reduced to its code and display message.
    #[must_use]
    pub fn from_error(error: &FintrackError) -> Self {
        let (message, details) = match error {
            FintrackError::Validation(errors) => {
                ("Request validation failed".to_string(), Some(errors.clone()))
            }
            other => (other.to_string(), None),
        };

        Self {
            code: error.error_code().to_string(),
            message,
            details,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl From<&FintrackError> for ErrorResponse {
    fn from(error: &FintrackError) -> Self {
        Self::from_error(error)
    }
}
