//! The bootstrap registrar
//!
//! Consumes an [`EnablementConfig`] exactly once and turns declared
//! candidates into a wired [`RepositoryRegistry`].
//!
//! # Architecture
//!
//! A registration run is all-or-nothing and proceeds in a fixed order:
//!
//! 1. validate the configuration;
//! 2. resolve the client reference, which must name exactly one registered
//!    client before anything else is touched;
//! 3. load named queries when a location is configured;
//! 4. resolve the factory and base behavior for the configured types;
//! 5. resolve base packages, falling back to the registrar's fallback
//!    package when nothing was declared;
//! 6. scan the candidate set: package containment first, then include and
//!    exclude filters;
//! 7. build each admitted candidate, hand-written `{name}{postfix}`
//!    constructor first, factory otherwise, and wire it into a fresh
//!    registry.
//!
//! Any failure aborts the run with no registry released, so a failed
//! bootstrap never leaves partially wired repositories behind.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use chaincode_client::{ChaincodeClient, ClientRegistry};
use repo_config::{evaluate_filters, EnablementConfig, FilterDecision, PackageRef, ScanFilter};

use crate::base::{BaseRegistry, RepositoryBase};
use crate::candidate::{CandidateSet, RepositoryCandidate};
use crate::error::SupportError;
use crate::factory::{FactoryRegistry, ImplementationRegistry, RepositoryContext, RepositoryFactory};
use crate::named_queries::NamedQueries;
use crate::registry::RepositoryRegistry;
use crate::repository::ChaincodeRepository;

/// Why a declared candidate was not wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Declared outside every resolved base package
    OutsideBasePackages,
    /// Include filters were declared and none matched
    NotIncluded,
    /// An exclude filter matched
    Excluded,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::OutsideBasePackages => "outside base packages",
            Self::NotIncluded => "not included by filters",
            Self::Excluded => "removed by exclude filter",
        };
        f.write_str(text)
    }
}

/// A candidate the scan left out, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub name: String,
    pub package: PackageRef,
    pub reason: SkipReason,
}

/// Outcome of a successful registration run.
pub struct RegistrationReport {
    registered: Vec<String>,
    skipped: Vec<SkippedCandidate>,
    packages: BTreeSet<PackageRef>,
    registry: RepositoryRegistry,
}

impl RegistrationReport {
    /// Names of wired repositories, in scan order
    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    /// Candidates the scan left out
    pub fn skipped(&self) -> &[SkippedCandidate] {
        &self.skipped
    }

    /// The base packages the scan ran over
    pub fn packages(&self) -> &BTreeSet<PackageRef> {
        &self.packages
    }

    /// The wired registry
    pub fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    /// Consumes the report, keeping only the registry
    pub fn into_registry(self) -> RepositoryRegistry {
        self.registry
    }
}

impl fmt::Debug for RegistrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationReport")
            .field("registered", &self.registered)
            .field("skipped", &self.skipped)
            .field("packages", &self.packages)
            .field("registry", &self.registry.names())
            .finish()
    }
}

/// Wires repositories from declared candidates, once, during bootstrap.
pub struct Registrar {
    candidates: CandidateSet,
    clients: ClientRegistry,
    factories: FactoryRegistry,
    bases: BaseRegistry,
    implementations: ImplementationRegistry,
    fallback_package: Option<PackageRef>,
}

impl Registrar {
    /// Creates a registrar over declared candidates and registered clients,
    /// with default factories and bases and no hand-written implementations.
    pub fn new(candidates: CandidateSet, clients: ClientRegistry) -> Self {
        Self {
            candidates,
            clients,
            factories: FactoryRegistry::default(),
            bases: BaseRegistry::default(),
            implementations: ImplementationRegistry::default(),
            fallback_package: None,
        }
    }

    /// Package scanned when the configuration declares none.
    ///
    /// Stands in for "the package of the declaring unit"; without one, an
    /// empty resolution is a hard error rather than a silent full scan.
    pub fn with_fallback_package(mut self, package: PackageRef) -> Self {
        self.fallback_package = Some(package);
        self
    }

    /// Replaces the factory registry
    pub fn with_factories(mut self, factories: FactoryRegistry) -> Self {
        self.factories = factories;
        self
    }

    /// Replaces the base-behavior registry
    pub fn with_bases(mut self, bases: BaseRegistry) -> Self {
        self.bases = bases;
        self
    }

    /// Replaces the hand-written implementation registry
    pub fn with_implementations(mut self, implementations: ImplementationRegistry) -> Self {
        self.implementations = implementations;
        self
    }

    /// Runs one registration pass over the candidate set.
    pub fn register(&self, config: &EnablementConfig) -> Result<RegistrationReport, SupportError> {
        config.validate()?;

        let client = self.clients.resolve(config.client_reference())?;
        tracing::info!(
            reference = config.client_reference(),
            "chaincode client resolved"
        );

        let named_queries = Arc::new(match config.named_queries_location() {
            Some(location) => {
                let queries = NamedQueries::load(location)?;
                tracing::info!(location, count = queries.len(), "named queries loaded");
                queries
            }
            None => NamedQueries::empty(),
        });

        let factory = self.factories.resolve(config.factory_type())?;
        let base = self.bases.resolve(config.base_type())?;

        let packages = self.resolve_packages(config)?;
        tracing::debug!(count = packages.len(), "base packages resolved");

        let (include, exclude) = config.filters();
        let mut registry = RepositoryRegistry::new();
        let mut registered = Vec::new();
        let mut skipped = Vec::new();

        for candidate in self.candidates.iter() {
            match self.admit(candidate, &packages, include, exclude) {
                Some(reason) => {
                    tracing::debug!(
                        candidate = %candidate.qualified_name(),
                        reason = %reason,
                        "candidate skipped"
                    );
                    skipped.push(SkippedCandidate {
                        name: candidate.name().to_string(),
                        package: candidate.package().clone(),
                        reason,
                    });
                }
                None => {
                    let repository =
                        self.construct(candidate, &client, &base, &named_queries, config, factory.as_ref())?;
                    registry.insert(repository)?;
                    registered.push(candidate.name().to_string());
                    tracing::info!(
                        repository = candidate.name(),
                        package = %candidate.package(),
                        chaincode = %candidate.chaincode(),
                        "repository registered"
                    );
                }
            }
        }

        if registered.is_empty() {
            tracing::warn!(
                candidates = self.candidates.len(),
                packages = packages.len(),
                "registration completed without wiring any repository"
            );
        }

        Ok(RegistrationReport {
            registered,
            skipped,
            packages,
            registry,
        })
    }

    fn resolve_packages(
        &self,
        config: &EnablementConfig,
    ) -> Result<BTreeSet<PackageRef>, SupportError> {
        let mut packages = config.resolve_base_packages();
        if packages.is_empty() {
            match &self.fallback_package {
                Some(fallback) => {
                    tracing::debug!(package = %fallback, "no packages declared, using fallback");
                    packages.insert(fallback.clone());
                }
                None => return Err(SupportError::NoBasePackages),
            }
        }
        Ok(packages)
    }

    fn admit(
        &self,
        candidate: &RepositoryCandidate,
        packages: &BTreeSet<PackageRef>,
        include: &[ScanFilter],
        exclude: &[ScanFilter],
    ) -> Option<SkipReason> {
        let summary = candidate.summary();
        if !packages.iter().any(|package| package.contains(summary.package)) {
            return Some(SkipReason::OutsideBasePackages);
        }
        match evaluate_filters(include, exclude, &summary) {
            FilterDecision::Admitted => None,
            FilterDecision::NotIncluded => Some(SkipReason::NotIncluded),
            FilterDecision::Excluded => Some(SkipReason::Excluded),
        }
    }

    fn construct(
        &self,
        candidate: &RepositoryCandidate,
        client: &Arc<dyn ChaincodeClient>,
        base: &Arc<dyn RepositoryBase>,
        named_queries: &Arc<NamedQueries>,
        config: &EnablementConfig,
        factory: &dyn RepositoryFactory,
    ) -> Result<Arc<dyn ChaincodeRepository>, SupportError> {
        let context = RepositoryContext {
            candidate: candidate.clone(),
            client: Arc::clone(client),
            client_reference: config.client_reference().to_string(),
            base: Arc::clone(base),
            named_queries: Arc::clone(named_queries),
        };

        let implementation_name =
            format!("{}{}", candidate.name(), config.implementation_postfix());
        let built = match self.implementations.get(&implementation_name) {
            Some(constructor) => {
                tracing::debug!(
                    repository = candidate.name(),
                    implementation = %implementation_name,
                    "using hand-written implementation"
                );
                constructor(context)
            }
            None => factory.create(context),
        };

        built.map_err(|source| SupportError::Construction {
            repository: candidate.name().to_string(),
            source,
        })
    }
}
