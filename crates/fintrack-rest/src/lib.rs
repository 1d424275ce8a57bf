//! # Fintrack REST
//!
//! REST API layer using Axum for Fintrack.
//! Provides HTTP endpoints for categories, transactions, and health checks.
//!
//! Service errors are mapped to status codes here and nowhere else; handlers
//! never inspect repository or cache failures.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
