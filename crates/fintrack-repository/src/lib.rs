//! # Fintrack Repository
//!
//! Durable storage for categories and transactions.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CategoryRepository> / Arc<dyn TransactionRepository>
//! PgCategoryRepository / PgTransactionRepository
//!   ↓  Arc<DatabasePool>
//! PostgreSQL
//! ```
//!
//! Implementations report failures as [`fintrack_core::RepositoryError`]
//! sentinels; translating them is the service layer's job.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
