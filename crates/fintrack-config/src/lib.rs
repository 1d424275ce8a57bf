//! # Fintrack Config
//!
//! Layered configuration for Fintrack: TOML files, environment variables,
//! and validation that reports every problem at once.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
