//! REST API controllers.

pub mod category_controller;
pub mod health_controller;
pub mod transaction_controller;

pub use health_controller::*;

use crate::responses::AppError;
use fintrack_core::{FieldError, FintrackError};
use std::str::FromStr;

/// Parses an id path segment.
fn parse_id<I: FromStr>(raw: &str) -> Result<I, AppError> {
    raw.parse().map_err(|_| {
        AppError(FintrackError::Validation(vec![FieldError::new(
            "id",
            "invalid_id",
            format!("Invalid id: {raw}"),
        )]))
    })
}
