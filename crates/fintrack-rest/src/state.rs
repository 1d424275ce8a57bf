//! Application state for Axum handlers.

use async_trait::async_trait;
use fintrack_service::{CategoryService, TransactionService};
use std::sync::Arc;
use std::time::Duration;

/// Dependency probe used by the readiness endpoint.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// Name reported in the readiness body.
    fn name(&self) -> &'static str;

    /// Returns an error message when the dependency is unusable.
    async fn check(&self) -> Result<(), String>;
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub category_service: Arc<dyn CategoryService>,
    pub transaction_service: Arc<dyn TransactionService>,
    pub readiness: Vec<Arc<dyn ReadinessCheck>>,
    /// Deadline applied to every request's repository and cache calls.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        category_service: Arc<dyn CategoryService>,
        transaction_service: Arc<dyn TransactionService>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            category_service,
            transaction_service,
            readiness: Vec::new(),
            request_timeout,
        }
    }

    /// Adds a dependency probed by `/ready`.
    #[must_use]
    pub fn with_readiness_check(mut self, check: Arc<dyn ReadinessCheck>) -> Self {
        self.readiness.push(check);
        self
    }
}
