//! eqbench-core
//!
//! Core library for benchmarking semantic equivalence checkers on paired
//! C programs.
//!
//! This crate defines the data model for benchmark cases and result rows,
//! the parsers for the external checker's outputs, the verdict classifier,
//! and the adapter that drives the checker as a subprocess.
//!
//! The goal is to keep all substantive logic here so it is fully testable
//! and reusable from multiple frontends (CLI, batch drivers, etc.).

pub mod cases;
pub mod classify;
pub mod descriptor;
pub mod layout;
pub mod model;
pub mod report;
pub mod tools;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
