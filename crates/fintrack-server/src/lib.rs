//! # Fintrack Server Library
//!
//! Wiring for the Fintrack server: logging setup, component assembly,
//! and startup output.

pub mod app;
pub mod logging;
pub mod startup;
