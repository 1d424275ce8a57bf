//! Entity service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `category_service.rs`).

pub mod category_service_impl;
pub mod transaction_service_impl;

pub use category_service_impl::CategoryServiceImpl;
pub use transaction_service_impl::TransactionServiceImpl;

use fintrack_core::{FintrackError, RepositoryError, ServiceError};
use tracing::{debug, error};

/// Translates a repository failure, logging it at a level matching its class.
pub(crate) fn translate(op: &'static str, request_id: &str, err: RepositoryError) -> FintrackError {
    let kind = ServiceError::from(err.clone());
    if kind.is_client_error() {
        debug!(op, request_id, error = %err, kind = ?kind, "Repository rejected operation");
    } else {
        error!(op, request_id, error = %err, "Repository operation failed");
    }
    FintrackError::Service(kind)
}
