//! The chaincode client trait
//!
//! Repositories never talk to the network themselves; every read and write
//! goes through a [`ChaincodeClient`]. Submission, endorsement, retry, and
//! identity are all behind this seam and out of scope here. The crate ships
//! one implementation, the in-memory mock used for wiring and tests.

use std::fmt;

use async_trait::async_trait;

use crate::call::{ChaincodeCall, InvokeOutcome, QueryOutcome};
use crate::error::ClientError;

/// Submits and evaluates chaincode calls.
#[async_trait]
pub trait ChaincodeClient: Send + Sync {
    /// Submits a state-changing call for ordering.
    async fn invoke(&self, call: &ChaincodeCall) -> Result<InvokeOutcome, ClientError>;

    /// Evaluates a read-only call against a single peer.
    async fn query(&self, call: &ChaincodeCall) -> Result<QueryOutcome, ClientError>;
}

impl fmt::Debug for dyn ChaincodeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn ChaincodeClient")
    }
}

/// In-memory client used by wiring code and tests.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use std::collections::HashMap;

    use tokio::sync::RwLock;
    use uuid::Uuid;

    use super::*;
    use crate::health::{ClientHealth, HealthCheckable};

    /// A call recorded by the mock, tagged with how it was submitted.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RecordedCall {
        Invoke(ChaincodeCall),
        Query(ChaincodeCall),
    }

    impl RecordedCall {
        /// The underlying call, regardless of mode
        pub fn call(&self) -> &ChaincodeCall {
            match self {
                Self::Invoke(call) => call,
                Self::Query(call) => call,
            }
        }
    }

    /// Mock chaincode client.
    ///
    /// Records every call and serves canned responses per function name.
    /// Functions without a canned response echo their arguments joined by
    /// commas, which keeps simple tests assertion-friendly.
    #[derive(Default)]
    pub struct MockChaincodeClient {
        responses: RwLock<HashMap<String, Vec<u8>>>,
        failures: RwLock<HashMap<String, String>>,
        calls: RwLock<Vec<RecordedCall>>,
    }

    impl MockChaincodeClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serves `payload` for every call to `function`
        pub async fn respond_with(
            &self,
            function: impl Into<String>,
            payload: impl Into<Vec<u8>>,
        ) {
            self.responses
                .write()
                .await
                .insert(function.into(), payload.into());
        }

        /// Rejects every call to `function` with a chaincode error
        pub async fn fail_with(&self, function: impl Into<String>, message: impl Into<String>) {
            self.failures
                .write()
                .await
                .insert(function.into(), message.into());
        }

        /// Returns every call recorded so far, in order
        pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
            self.calls.read().await.clone()
        }

        /// Returns the number of calls recorded so far
        pub async fn call_count(&self) -> usize {
            self.calls.read().await.len()
        }

        async fn respond(&self, call: &ChaincodeCall) -> Result<Vec<u8>, ClientError> {
            if let Some(message) = self.failures.read().await.get(&call.function) {
                return Err(ClientError::chaincode_rejected(message.clone()));
            }
            let responses = self.responses.read().await;
            Ok(match responses.get(&call.function) {
                Some(payload) => payload.clone(),
                None => call.args.join(",").into_bytes(),
            })
        }
    }

    #[async_trait]
    impl ChaincodeClient for MockChaincodeClient {
        async fn invoke(&self, call: &ChaincodeCall) -> Result<InvokeOutcome, ClientError> {
            self.calls
                .write()
                .await
                .push(RecordedCall::Invoke(call.clone()));
            let payload = self.respond(call).await?;
            Ok(InvokeOutcome {
                transaction_id: Uuid::new_v4(),
                payload,
            })
        }

        async fn query(&self, call: &ChaincodeCall) -> Result<QueryOutcome, ClientError> {
            self.calls
                .write()
                .await
                .push(RecordedCall::Query(call.clone()));
            let payload = self.respond(call).await?;
            Ok(QueryOutcome { payload })
        }
    }

    #[async_trait]
    impl HealthCheckable for MockChaincodeClient {
        async fn health_check(&self) -> ClientHealth {
            ClientHealth::healthy(Some(0))
        }
    }
}
