//! Test Utilities Crate
//!
//! Shared test infrastructure for the chaincode repository workspace.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built packages, chaincodes, candidates, and clients
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Assertion helpers for registration outcomes
//! - `generators`: Property-based test data generators
//! - `logging`: Idempotent test tracing setup

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod logging;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::*;
