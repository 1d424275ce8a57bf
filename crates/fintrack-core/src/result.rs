//! Result type aliases for Fintrack.

use crate::FintrackError;

/// A specialized `Result` type for service operations.
pub type FintrackResult<T> = Result<T, FintrackError>;
