//! Domain input and output types.

mod category;
mod transaction;

pub use category::*;
pub use transaction::*;
