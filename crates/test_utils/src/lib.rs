//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! error boundary test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built errors, violations and request bodies
//! - `assertions`: Assertion helpers for wire error documents
//! - `generators`: Property-based test data generators
//! - `logging`: Captures formatted log output for inspection

pub mod fixtures;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use assertions::*;
pub use generators::*;
pub use logging::*;
