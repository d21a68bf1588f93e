//! Built repositories
//!
//! What the registrar wires and the registry stores. A repository pairs the
//! candidate's metadata with a resolved client, a base behavior, and the
//! loaded named queries. Custom implementations provide their own behavior
//! and are retrieved through [`ChaincodeRepository::as_any`].

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use chaincode_client::{
    ChaincodeCall, ChaincodeClient, ChaincodeId, InvokeOutcome, QueryOutcome,
};
use repo_config::{PackageRef, PACKAGE_SEPARATOR};

use crate::base::RepositoryBase;
use crate::error::RepositoryError;
use crate::named_queries::NamedQueries;

/// Identity of a wired repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Bare repository name, also its registry key
    pub name: String,
    /// Package the declaration came from
    pub package: PackageRef,
    /// Chaincode the repository talks to
    pub chaincode: ChaincodeId,
    /// Reference name the client was resolved under
    pub client_reference: String,
}

impl RepositoryMetadata {
    /// Package-qualified repository name
    pub fn qualified_name(&self) -> String {
        format!("{}{PACKAGE_SEPARATOR}{}", self.package, self.name)
    }
}

/// A wired repository, as stored in the registry.
pub trait ChaincodeRepository: Send + Sync {
    /// Identity and wiring facts
    fn metadata(&self) -> &RepositoryMetadata;

    /// Downcast support for custom implementations
    fn as_any(&self) -> &dyn Any;
}

/// The repository the default factory builds.
///
/// Exposes the generic call surface; every call goes through the configured
/// base behavior.
pub struct DefaultChaincodeRepository {
    metadata: RepositoryMetadata,
    client: Arc<dyn ChaincodeClient>,
    base: Arc<dyn RepositoryBase>,
    named_queries: Arc<NamedQueries>,
}

impl DefaultChaincodeRepository {
    pub fn new(
        metadata: RepositoryMetadata,
        client: Arc<dyn ChaincodeClient>,
        base: Arc<dyn RepositoryBase>,
        named_queries: Arc<NamedQueries>,
    ) -> Self {
        Self {
            metadata,
            client,
            base,
            named_queries,
        }
    }

    /// Submits a state-changing chaincode function.
    pub async fn invoke<I, S>(
        &self,
        function: &str,
        args: I,
    ) -> Result<InvokeOutcome, RepositoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let call = self.call(function).with_args(args);
        Ok(self.base.invoke(self.client.as_ref(), &call).await?)
    }

    /// Evaluates a read-only chaincode function.
    pub async fn query<I, S>(&self, function: &str, args: I) -> Result<QueryOutcome, RepositoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let call = self.call(function).with_args(args);
        Ok(self.base.query(self.client.as_ref(), &call).await?)
    }

    /// Evaluates a named query.
    ///
    /// The name resolves against the loaded named queries, repository scope
    /// first (`{repository}.{name}`), then globally.
    pub async fn query_named<I, S>(
        &self,
        query: &str,
        args: I,
    ) -> Result<QueryOutcome, RepositoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let function = self
            .named_queries
            .resolve(&self.metadata.name, query)
            .ok_or_else(|| RepositoryError::UnknownNamedQuery {
                repository: self.metadata.name.clone(),
                query: query.to_string(),
            })?
            .to_string();
        self.query(&function, args).await
    }

    /// Named queries visible to this repository
    pub fn named_queries(&self) -> &NamedQueries {
        &self.named_queries
    }

    fn call(&self, function: &str) -> ChaincodeCall {
        ChaincodeCall::new(self.metadata.chaincode.clone(), function)
    }
}

impl ChaincodeRepository for DefaultChaincodeRepository {
    fn metadata(&self) -> &RepositoryMetadata {
        &self.metadata
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
