//! Repository factories and hand-written implementations
//!
//! The registrar builds each admitted candidate through exactly one of two
//! paths: a hand-written constructor registered under
//! `{candidate}{postfix}` in the [`ImplementationRegistry`], or the factory
//! resolved from the configuration's `factory_type` in the
//! [`FactoryRegistry`]. The hand-written path always wins when present.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chaincode_client::ChaincodeClient;
use repo_config::TypeRef;

use crate::base::RepositoryBase;
use crate::candidate::RepositoryCandidate;
use crate::error::{FactoryError, SupportError};
use crate::named_queries::NamedQueries;
use crate::repository::{ChaincodeRepository, DefaultChaincodeRepository, RepositoryMetadata};

/// Everything a factory or constructor receives for one candidate.
#[derive(Clone)]
pub struct RepositoryContext {
    /// The candidate being built
    pub candidate: RepositoryCandidate,
    /// Client resolved from the configured reference
    pub client: Arc<dyn ChaincodeClient>,
    /// The reference name the client was resolved under
    pub client_reference: String,
    /// Base behavior resolved from the configured base type
    pub base: Arc<dyn RepositoryBase>,
    /// Named queries, empty when no location was configured
    pub named_queries: Arc<NamedQueries>,
}

impl RepositoryContext {
    /// Metadata for the repository this context will build
    pub fn metadata(&self) -> RepositoryMetadata {
        RepositoryMetadata {
            name: self.candidate.name().to_string(),
            package: self.candidate.package().clone(),
            chaincode: self.candidate.chaincode().clone(),
            client_reference: self.client_reference.clone(),
        }
    }
}

/// Builds repositories from contexts.
pub trait RepositoryFactory: Send + Sync {
    fn create(&self, context: RepositoryContext)
        -> Result<Arc<dyn ChaincodeRepository>, FactoryError>;
}

impl fmt::Debug for dyn RepositoryFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn RepositoryFactory")
    }
}

/// The default factory, registered under [`TypeRef::default_factory()`].
/// Builds [`DefaultChaincodeRepository`] instances.
#[derive(Debug, Default)]
pub struct ChaincodeRepositoryFactory;

impl RepositoryFactory for ChaincodeRepositoryFactory {
    fn create(
        &self,
        context: RepositoryContext,
    ) -> Result<Arc<dyn ChaincodeRepository>, FactoryError> {
        let metadata = context.metadata();
        Ok(Arc::new(DefaultChaincodeRepository::new(
            metadata,
            context.client,
            context.base,
            context.named_queries,
        )))
    }
}

/// Factories keyed by type name, pre-seeded with the default.
///
/// Keyed by the bare name so a reference built with `TypeRef::of::<T>()`
/// and one built with `TypeRef::named` resolve the same entry.
pub struct FactoryRegistry {
    factories: BTreeMap<String, Arc<dyn RepositoryFactory>>,
}

impl FactoryRegistry {
    /// Creates a registry holding only the default factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under a type reference
    pub fn register(&mut self, type_ref: &TypeRef, factory: Arc<dyn RepositoryFactory>) {
        self.factories.insert(type_ref.name().to_string(), factory);
    }

    /// Builder-style registration
    pub fn with_factory(mut self, type_ref: &TypeRef, factory: Arc<dyn RepositoryFactory>) -> Self {
        self.register(type_ref, factory);
        self
    }

    /// Resolves the factory for a configured type
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<Arc<dyn RepositoryFactory>, SupportError> {
        self.factories
            .get(type_ref.name())
            .cloned()
            .ok_or_else(|| SupportError::UnknownFactory(type_ref.name().to_string()))
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        let mut factories: BTreeMap<String, Arc<dyn RepositoryFactory>> = BTreeMap::new();
        factories.insert(
            TypeRef::default_factory().name().to_string(),
            Arc::new(ChaincodeRepositoryFactory),
        );
        Self { factories }
    }
}

/// A hand-written repository constructor.
pub type Constructor =
    Arc<dyn Fn(RepositoryContext) -> Result<Arc<dyn ChaincodeRepository>, FactoryError> + Send + Sync>;

/// Hand-written implementations keyed by implementation name.
///
/// The registrar consults this with `{candidate}{postfix}` before falling
/// back to the factory, mirroring how a scanned `AssetRepositoryImpl` class
/// overrides generated behavior.
#[derive(Default)]
pub struct ImplementationRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl ImplementationRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor under an implementation name
    pub fn register<F>(&mut self, implementation_name: impl Into<String>, constructor: F)
    where
        F: Fn(RepositoryContext) -> Result<Arc<dyn ChaincodeRepository>, FactoryError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors
            .insert(implementation_name.into(), Arc::new(constructor));
    }

    /// Builder-style registration
    pub fn with_implementation<F>(mut self, implementation_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(RepositoryContext) -> Result<Arc<dyn ChaincodeRepository>, FactoryError>
            + Send
            + Sync
            + 'static,
    {
        self.register(implementation_name, constructor);
        self
    }

    /// Looks up a constructor by implementation name
    pub fn get(&self, implementation_name: &str) -> Option<Constructor> {
        self.constructors.get(implementation_name).cloned()
    }

    /// Returns true when a constructor is registered under the name
    pub fn contains(&self, implementation_name: &str) -> bool {
        self.constructors.contains_key(implementation_name)
    }

    /// Registered implementation names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Number of registered constructors
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns true when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}
