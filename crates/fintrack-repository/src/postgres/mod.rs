//! PostgreSQL repository implementations.

mod category_repository;
mod transaction_repository;

pub use category_repository::PgCategoryRepository;
pub use transaction_repository::PgTransactionRepository;
