//! Validation utilities.

use crate::{FieldError, FintrackError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `FintrackError::Validation` on failure.
    fn validate_request(&self) -> Result<(), FintrackError> {
        self.validate()
            .map_err(|e| FintrackError::Validation(field_errors(&e)))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field/message pairs.
///
/// Output is sorted by field name so callers see a stable order.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("Invalid value for '{field}'"), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a query filter is not blank.
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}
