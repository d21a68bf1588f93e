//! Repository candidates
//!
//! A candidate is a declared repository interface waiting to be wired: its
//! type name, the package it lives in, and the chaincode it talks to.
//! Candidates are declared explicitly into a [`CandidateSet`] during
//! bootstrap; the registrar scans that set instead of walking any classpath.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use chaincode_client::ChaincodeId;
use repo_config::{is_identifier, CandidateSummary, ConfigError, PackageRef, PACKAGE_SEPARATOR};

use crate::error::SupportError;

/// A declared repository interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCandidate {
    name: String,
    package: PackageRef,
    chaincode: ChaincodeId,
    description: Option<String>,
}

impl RepositoryCandidate {
    /// Declares a candidate. The name must be a plain identifier.
    pub fn new(
        name: impl AsRef<str>,
        package: PackageRef,
        chaincode: ChaincodeId,
    ) -> Result<Self, SupportError> {
        let name = name.as_ref().trim();
        if !is_identifier(name) {
            return Err(ConfigError::invalid_type_name(name).into());
        }
        Ok(Self {
            name: name.to_string(),
            package,
            chaincode,
            description: None,
        })
    }

    /// Attaches a human-readable description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Bare type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package the declaration lives in
    pub fn package(&self) -> &PackageRef {
        &self.package
    }

    /// Chaincode this repository talks to
    pub fn chaincode(&self) -> &ChaincodeId {
        &self.chaincode
    }

    /// Description, when one was attached
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Package-qualified name
    pub fn qualified_name(&self) -> String {
        format!("{}{PACKAGE_SEPARATOR}{}", self.package, self.name)
    }

    /// Borrowed view for filter evaluation
    pub fn summary(&self) -> CandidateSummary<'_> {
        CandidateSummary {
            name: &self.name,
            package: &self.package,
        }
    }
}

/// The declared candidates, keyed and iterated by qualified name.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    candidates: BTreeMap<String, RepositoryCandidate>,
}

impl CandidateSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from an iterator, rejecting duplicates.
    pub fn from_candidates(
        candidates: impl IntoIterator<Item = RepositoryCandidate>,
    ) -> Result<Self, SupportError> {
        let mut set = Self::new();
        for candidate in candidates {
            set.declare(candidate)?;
        }
        Ok(set)
    }

    /// Declares one candidate.
    ///
    /// Two declarations with the same qualified name are a bootstrap error;
    /// the same bare name in different packages is fine here and collides
    /// only if both are admitted into the same registry.
    pub fn declare(&mut self, candidate: RepositoryCandidate) -> Result<(), SupportError> {
        let key = candidate.qualified_name();
        if self.candidates.contains_key(&key) {
            return Err(SupportError::DuplicateCandidate(key));
        }
        self.candidates.insert(key, candidate);
        Ok(())
    }

    /// Iterates candidates in qualified-name order
    pub fn iter(&self) -> impl Iterator<Item = &RepositoryCandidate> {
        self.candidates.values()
    }

    /// Looks a candidate up by qualified name
    pub fn get(&self, qualified_name: &str) -> Option<&RepositoryCandidate> {
        self.candidates.get(qualified_name)
    }

    /// Number of declared candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true when nothing is declared
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
