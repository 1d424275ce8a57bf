//! Custom Axum extractors.

mod context;
mod json_body;
mod owner;

pub use context::*;
pub use json_body::*;
pub use owner::*;
