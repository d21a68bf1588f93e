//! The wired repository registry
//!
//! Output of a successful registration run: every admitted candidate, built
//! and keyed by its bare repository name. Lookups come back as the trait
//! object or, through [`RepositoryRegistry::get_as`], downcast to a concrete
//! implementation type.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::SupportError;
use crate::repository::ChaincodeRepository;

/// Repositories keyed by bare name.
#[derive(Default)]
pub struct RepositoryRegistry {
    repositories: BTreeMap<String, Arc<dyn ChaincodeRepository>>,
}

impl RepositoryRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a repository under its metadata name.
    ///
    /// Bare names are the registry key, so two candidates with the same name
    /// in different packages collide here.
    pub fn insert(&mut self, repository: Arc<dyn ChaincodeRepository>) -> Result<(), SupportError> {
        let name = repository.metadata().name.clone();
        if self.repositories.contains_key(&name) {
            return Err(SupportError::DuplicateRepository(name));
        }
        self.repositories.insert(name, repository);
        Ok(())
    }

    /// Looks a repository up by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ChaincodeRepository>> {
        self.repositories.get(name).cloned()
    }

    /// Looks a repository up and downcasts it to a concrete type
    pub fn get_as<T: 'static>(&self, name: &str) -> Option<&T> {
        self.repositories
            .get(name)
            .and_then(|repository| repository.as_any().downcast_ref::<T>())
    }

    /// Returns true when a repository is registered under the name
    pub fn contains(&self, name: &str) -> bool {
        self.repositories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.repositories.keys().map(String::as_str).collect()
    }

    /// Iterates repositories in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn ChaincodeRepository>)> {
        self.repositories
            .iter()
            .map(|(name, repository)| (name.as_str(), repository))
    }

    /// Number of registered repositories
    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    /// Returns true when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}
