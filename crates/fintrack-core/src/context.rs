//! Per-request context threaded into every repository and cache call.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use uuid::Uuid;

/// Returned when a bounded future outlives the request deadline.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("request deadline exceeded")]
pub struct DeadlineExceeded;

impl From<DeadlineExceeded> for crate::RepositoryError {
    fn from(_: DeadlineExceeded) -> Self {
        Self::Timeout
    }
}

/// Request id plus an optional deadline.
///
/// Cloning is cheap; a clone is handed to detached cache tasks.
#[derive(Clone)]
pub struct RequestContext {
    request_id: Arc<str>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context with the given request id and no deadline.
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Arc::from(request_id.into()),
            deadline: None,
        }
    }

    /// Creates a context with a generated request id and no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Sets the deadline to `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Sets an absolute deadline. An earlier existing deadline wins.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// Returns the request id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `None` means unbounded.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Returns true once the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Drives `fut` to completion or until the deadline elapses.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: Future,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| DeadlineExceeded),
            None => Ok(fut.await),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("remaining", &self.remaining())
            .finish()
    }
}
