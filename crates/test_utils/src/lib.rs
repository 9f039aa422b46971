//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the case
//! portal test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built submissions, identities and a wired in-memory service
//! - `builders`: Builder for cases at any stage with a realistic history
//! - `assertions`: Assertion helpers for status history and timelines
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
