//! Chaincode client abstraction
//!
//! Everything a chaincode-backed repository needs from the network sits
//! behind the [`ChaincodeClient`] trait: submit a call, evaluate a call,
//! report health. Transaction execution, endorsement, and identity handling
//! are deliberately out of scope; the only shipped implementation is an
//! in-memory mock.
//!
//! The [`ClientRegistry`] holds named client instances. Enablement
//! configuration refers to a client by reference name, and that name must
//! resolve to exactly one registered instance before any repository is built.

pub mod call;
pub mod client;
pub mod error;
pub mod health;
pub mod registry;

pub use call::{ChaincodeCall, ChaincodeId, InvokeOutcome, QueryOutcome};
pub use client::ChaincodeClient;
pub use error::{ClientError, ResolutionError};
pub use health::{ClientHealth, HealthCheckable, HealthStatus};
pub use registry::ClientRegistry;

#[cfg(any(test, feature = "mock"))]
pub use client::mock::MockChaincodeClient;
