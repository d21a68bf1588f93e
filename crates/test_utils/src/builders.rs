//! Test Data Builders
//!
//! Builders with sensible defaults so tests specify only the fields they
//! care about. Defaults come from the fixtures module.

use std::sync::Arc;

use chaincode_client::{ChaincodeClient, ChaincodeId, ClientRegistry};
use repo_config::PackageRef;
use repo_support::{
    BaseRegistry, CandidateSet, FactoryRegistry, ImplementationRegistry, Registrar,
    RepositoryCandidate,
};

use crate::fixtures::{CandidateFixtures, ChaincodeFixtures, ClientFixtures, PackageFixtures};

/// Builder for a single repository candidate
pub struct TestCandidateBuilder {
    name: String,
    package: PackageRef,
    chaincode: ChaincodeId,
    description: Option<String>,
}

impl Default for TestCandidateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCandidateBuilder {
    /// Creates a builder with fixture defaults
    pub fn new() -> Self {
        Self {
            name: "AssetRepository".to_string(),
            package: PackageFixtures::repositories(),
            chaincode: ChaincodeFixtures::assets(),
            description: None,
        }
    }

    /// Sets the candidate name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the declaring package
    pub fn with_package(mut self, package: PackageRef) -> Self {
        self.package = package;
        self
    }

    /// Sets the target chaincode
    pub fn with_chaincode(mut self, chaincode: ChaincodeId) -> Self {
        self.chaincode = chaincode;
        self
    }

    /// Sets a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the candidate, panicking on invalid test input
    pub fn build(self) -> RepositoryCandidate {
        let candidate = RepositoryCandidate::new(self.name, self.package, self.chaincode)
            .expect("test candidate must be valid");
        match self.description {
            Some(description) => candidate.with_description(description),
            None => candidate,
        }
    }
}

/// Builder for a fully equipped registrar
pub struct TestRegistrarBuilder {
    candidates: CandidateSet,
    clients: ClientRegistry,
    factories: Option<FactoryRegistry>,
    bases: Option<BaseRegistry>,
    implementations: Option<ImplementationRegistry>,
    fallback_package: Option<PackageRef>,
}

impl Default for TestRegistrarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRegistrarBuilder {
    /// Creates a builder with the standard candidate set and a single mock
    /// client under the conventional reference
    pub fn new() -> Self {
        Self {
            candidates: CandidateFixtures::standard_set(),
            clients: ClientFixtures::single(),
            factories: None,
            bases: None,
            implementations: None,
            fallback_package: None,
        }
    }

    /// Replaces the candidate set
    pub fn with_candidates(mut self, candidates: CandidateSet) -> Self {
        self.candidates = candidates;
        self
    }

    /// Replaces the client registry
    pub fn with_clients(mut self, clients: ClientRegistry) -> Self {
        self.clients = clients;
        self
    }

    /// Registers one extra client on top of the current registry
    pub fn with_extra_client(
        mut self,
        name: impl Into<String>,
        client: Arc<dyn ChaincodeClient>,
    ) -> Self {
        self.clients.register(name, client);
        self
    }

    /// Uses a custom factory registry
    pub fn with_factories(mut self, factories: FactoryRegistry) -> Self {
        self.factories = Some(factories);
        self
    }

    /// Uses a custom base registry
    pub fn with_bases(mut self, bases: BaseRegistry) -> Self {
        self.bases = Some(bases);
        self
    }

    /// Uses a custom implementation registry
    pub fn with_implementations(mut self, implementations: ImplementationRegistry) -> Self {
        self.implementations = Some(implementations);
        self
    }

    /// Sets the fallback package for undeclared scans
    pub fn with_fallback_package(mut self, package: PackageRef) -> Self {
        self.fallback_package = Some(package);
        self
    }

    /// Builds the registrar
    pub fn build(self) -> Registrar {
        let mut registrar = Registrar::new(self.candidates, self.clients);
        if let Some(factories) = self.factories {
            registrar = registrar.with_factories(factories);
        }
        if let Some(bases) = self.bases {
            registrar = registrar.with_bases(bases);
        }
        if let Some(implementations) = self.implementations {
            registrar = registrar.with_implementations(implementations);
        }
        if let Some(package) = self.fallback_package {
            registrar = registrar.with_fallback_package(package);
        }
        registrar
    }
}
