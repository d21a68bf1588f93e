//! Client error types

use thiserror::Error;

/// Errors surfaced by a chaincode client while submitting or evaluating a
/// call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Could not reach the network
    #[error("connection error: {0}")]
    Connection(String),

    /// The call did not complete in time
    #[error("operation timed out after {0} ms")]
    Timeout(u64),

    /// The chaincode itself rejected the call
    #[error("chaincode rejected the call: {0}")]
    ChaincodeRejected(String),

    /// Payload could not be serialized or deserialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client exists but cannot currently serve calls
    #[error("client unavailable: {0}")]
    Unavailable(String),

    /// Unexpected client-side failure
    #[error("internal client error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Creates a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a timeout error
    pub fn timeout(elapsed_ms: u64) -> Self {
        Self::Timeout(elapsed_ms)
    }

    /// Creates a chaincode rejection error
    pub fn chaincode_rejected(message: impl Into<String>) -> Self {
        Self::ChaincodeRejected(message.into())
    }

    /// Creates an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if retrying the call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout(_) | Self::Unavailable(_)
        )
    }
}

/// Errors raised while resolving a client reference against the registry.
///
/// This is the only failure mode of repository enablement that depends on
/// runtime state: the configured reference must resolve to exactly one
/// registered client, and resolution happens before any repository is built.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// No client is registered under the configured reference
    #[error("no chaincode client registered under '{name}' (registered: [{}])", registered.join(", "))]
    UnknownClient {
        name: String,
        registered: Vec<String>,
    },

    /// More than one client is registered under the configured reference
    #[error("client reference '{name}' is ambiguous: {count} instances registered")]
    AmbiguousClient { name: String, count: usize },
}

impl ResolutionError {
    /// The reference name that failed to resolve
    pub fn reference(&self) -> &str {
        match self {
            Self::UnknownClient { name, .. } => name,
            Self::AmbiguousClient { name, .. } => name,
        }
    }
}
