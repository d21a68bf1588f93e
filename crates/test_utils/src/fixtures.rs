//! Pre-built Test Fixtures
//!
//! Ready-to-use packages, chaincode coordinates, candidates, and client
//! registries. Fixtures are consistent and predictable so tests can assert
//! on exact names.

use std::sync::Arc;

use chaincode_client::{ChaincodeId, ClientRegistry, MockChaincodeClient};
use repo_config::{PackageRef, DEFAULT_CLIENT_REFERENCE};
use repo_support::{CandidateSet, RepositoryCandidate};

/// Fixture for package paths
pub struct PackageFixtures;

impl PackageFixtures {
    /// The package most candidates are declared in
    pub fn repositories() -> PackageRef {
        PackageRef::parse("app::repositories").expect("valid fixture package")
    }

    /// A second scanned package
    pub fn audit() -> PackageRef {
        PackageRef::parse("app::audit").expect("valid fixture package")
    }

    /// Parent of every fixture package
    pub fn root() -> PackageRef {
        PackageRef::parse("app").expect("valid fixture package")
    }

    /// A package no fixture candidate lives in
    pub fn unrelated() -> PackageRef {
        PackageRef::parse("other::module").expect("valid fixture package")
    }
}

/// Fixture for chaincode coordinates
pub struct ChaincodeFixtures;

impl ChaincodeFixtures {
    /// Asset-tracking chaincode on the trading channel
    pub fn assets() -> ChaincodeId {
        ChaincodeId::new("trading", "assets")
    }

    /// Order chaincode on the trading channel
    pub fn orders() -> ChaincodeId {
        ChaincodeId::new("trading", "orders")
    }

    /// Version-pinned audit chaincode
    pub fn audit() -> ChaincodeId {
        ChaincodeId::new("compliance", "audit").with_version("1.0")
    }
}

/// Fixture for repository candidates
pub struct CandidateFixtures;

impl CandidateFixtures {
    /// `app::repositories::AssetRepository` against the assets chaincode
    pub fn asset_repository() -> RepositoryCandidate {
        RepositoryCandidate::new(
            "AssetRepository",
            PackageFixtures::repositories(),
            ChaincodeFixtures::assets(),
        )
        .expect("valid fixture candidate")
    }

    /// `app::repositories::OrderRepository` against the orders chaincode
    pub fn order_repository() -> RepositoryCandidate {
        RepositoryCandidate::new(
            "OrderRepository",
            PackageFixtures::repositories(),
            ChaincodeFixtures::orders(),
        )
        .expect("valid fixture candidate")
    }

    /// `app::audit::AuditRepository` against the audit chaincode
    pub fn audit_repository() -> RepositoryCandidate {
        RepositoryCandidate::new(
            "AuditRepository",
            PackageFixtures::audit(),
            ChaincodeFixtures::audit(),
        )
        .expect("valid fixture candidate")
    }

    /// All three fixture candidates
    pub fn standard_set() -> CandidateSet {
        CandidateSet::from_candidates([
            Self::asset_repository(),
            Self::order_repository(),
            Self::audit_repository(),
        ])
        .expect("fixture candidates are distinct")
    }
}

/// Fixture for client registries
pub struct ClientFixtures;

impl ClientFixtures {
    /// The conventional client reference name
    pub fn reference() -> &'static str {
        DEFAULT_CLIENT_REFERENCE
    }

    /// A fresh mock client
    pub fn mock() -> Arc<MockChaincodeClient> {
        Arc::new(MockChaincodeClient::new())
    }

    /// One mock registered under the conventional reference
    pub fn single() -> ClientRegistry {
        ClientRegistry::new().with_client(Self::reference(), Self::mock())
    }

    /// One mock registered under a caller-chosen reference
    pub fn single_named(name: &str) -> ClientRegistry {
        ClientRegistry::new().with_client(name, Self::mock())
    }

    /// Two mocks under the conventional reference, for ambiguity tests
    pub fn ambiguous() -> ClientRegistry {
        ClientRegistry::new()
            .with_client(Self::reference(), Self::mock())
            .with_client(Self::reference(), Self::mock())
    }
}
