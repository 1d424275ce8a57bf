//! # Fintrack Service
//!
//! Entity services for categories and transactions.
//!
//! Every operation validates its input, calls the repository (the source of
//! truth), and keeps a best-effort cache in step:
//!
//! ```text
//! Create / Update / Delete:  validate → repository → observed cache write
//! Get:                       cache → (miss) repository → optional cache fill
//! Query:                     filter check → repository
//! ```
//!
//! Repository sentinels are translated into [`fintrack_core::ServiceError`];
//! cache failures are logged and never returned.

pub mod cache;
pub mod category_service;
pub mod r#impl;
pub mod transaction_service;

pub use cache::*;
pub use category_service::*;
pub use r#impl::*;
pub use transaction_service::*;
