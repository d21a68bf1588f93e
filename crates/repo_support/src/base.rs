//! Repository base behavior
//!
//! Every built repository delegates its reads and writes to a
//! [`RepositoryBase`]. The default passes calls straight through to the
//! client; applications register alternatives (caching, auditing) under a
//! type name and select one through the configuration's `base_type`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use chaincode_client::{ChaincodeCall, ChaincodeClient, ClientError, InvokeOutcome, QueryOutcome};
use repo_config::TypeRef;

use crate::error::SupportError;

/// Shared call behavior backing repository methods.
#[async_trait]
pub trait RepositoryBase: Send + Sync {
    async fn invoke(
        &self,
        client: &dyn ChaincodeClient,
        call: &ChaincodeCall,
    ) -> Result<InvokeOutcome, ClientError>;

    async fn query(
        &self,
        client: &dyn ChaincodeClient,
        call: &ChaincodeCall,
    ) -> Result<QueryOutcome, ClientError>;
}

impl fmt::Debug for dyn RepositoryBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn RepositoryBase")
    }
}

/// Pass-through base behavior, registered under
/// [`TypeRef::default_base()`].
#[derive(Debug, Default)]
pub struct DefaultRepositoryBase;

#[async_trait]
impl RepositoryBase for DefaultRepositoryBase {
    async fn invoke(
        &self,
        client: &dyn ChaincodeClient,
        call: &ChaincodeCall,
    ) -> Result<InvokeOutcome, ClientError> {
        tracing::debug!(call = %call, "submitting chaincode call");
        client.invoke(call).await
    }

    async fn query(
        &self,
        client: &dyn ChaincodeClient,
        call: &ChaincodeCall,
    ) -> Result<QueryOutcome, ClientError> {
        tracing::debug!(call = %call, "evaluating chaincode call");
        client.query(call).await
    }
}

/// Base behaviors keyed by type name.
///
/// Keyed by the bare name so a reference built with `TypeRef::of::<T>()`
/// and one built with `TypeRef::named` resolve the same entry.
pub struct BaseRegistry {
    bases: BTreeMap<String, Arc<dyn RepositoryBase>>,
}

impl BaseRegistry {
    /// Creates a registry holding only the default base
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a base behavior under a type reference
    pub fn register(&mut self, type_ref: &TypeRef, base: Arc<dyn RepositoryBase>) {
        self.bases.insert(type_ref.name().to_string(), base);
    }

    /// Builder-style registration
    pub fn with_base(mut self, type_ref: &TypeRef, base: Arc<dyn RepositoryBase>) -> Self {
        self.register(type_ref, base);
        self
    }

    /// Resolves the base behavior for a configured type
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<Arc<dyn RepositoryBase>, SupportError> {
        self.bases
            .get(type_ref.name())
            .cloned()
            .ok_or_else(|| SupportError::UnknownBase(type_ref.name().to_string()))
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.bases.keys().map(String::as_str).collect()
    }
}

impl Default for BaseRegistry {
    fn default() -> Self {
        let mut bases: BTreeMap<String, Arc<dyn RepositoryBase>> = BTreeMap::new();
        bases.insert(
            TypeRef::default_base().name().to_string(),
            Arc::new(DefaultRepositoryBase),
        );
        Self { bases }
    }
}
