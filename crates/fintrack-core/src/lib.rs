//! # Fintrack Core
//!
//! Core types shared by every Fintrack crate: typed identifiers, the
//! category and transaction domain types with their validation rules, the
//! per-request context, and the error taxonomy that separates storage
//! sentinels, service errors, and validation failures.

pub mod context;
pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use context::*;
pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
