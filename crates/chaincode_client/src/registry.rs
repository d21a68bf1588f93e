//! Named-client registry
//!
//! Applications register client instances under reference names during
//! bootstrap; the repository registrar later resolves the configured
//! reference against this registry. Resolution must find exactly one
//! instance.
//!
//! # Architecture
//!
//! Registration never fails: duplicate names are recorded as-is so that
//! ambiguity is observable at resolution time, where it carries the name and
//! the instance count. This mirrors how dependency containers behave, where
//! a second binding under the same name is legal until something asks for it
//! by name.

use std::sync::Arc;

use crate::client::ChaincodeClient;
use crate::error::ResolutionError;

/// Registry of chaincode clients keyed by reference name.
#[derive(Default)]
pub struct ClientRegistry {
    entries: Vec<(String, Arc<dyn ChaincodeClient>)>,
}

impl ClientRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client under a reference name.
    ///
    /// Registering the same name twice is accepted and makes that name
    /// ambiguous until one entry is gone.
    pub fn register(&mut self, name: impl Into<String>, client: Arc<dyn ChaincodeClient>) {
        let name = name.into();
        let duplicates = self.count(&name);
        if duplicates > 0 {
            tracing::warn!(
                reference = %name,
                instances = duplicates + 1,
                "client reference registered more than once"
            );
        } else {
            tracing::debug!(reference = %name, "client registered");
        }
        self.entries.push((name, client));
    }

    /// Builder-style registration
    pub fn with_client(mut self, name: impl Into<String>, client: Arc<dyn ChaincodeClient>) -> Self {
        self.register(name, client);
        self
    }

    /// Resolves a reference name to exactly one client.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ChaincodeClient>, ResolutionError> {
        let mut matches = self
            .entries
            .iter()
            .filter(|(entry_name, _)| entry_name == name);

        let first = matches.next();
        let rest = matches.count();

        match (first, rest) {
            (Some((_, client)), 0) => Ok(Arc::clone(client)),
            (Some(_), extra) => Err(ResolutionError::AmbiguousClient {
                name: name.to_string(),
                count: extra + 1,
            }),
            (None, _) => Err(ResolutionError::UnknownClient {
                name: name.to_string(),
                registered: self.names(),
            }),
        }
    }

    /// Registered reference names, sorted and deduplicated
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|(name, _)| name.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Number of instances registered under a name
    pub fn count(&self, name: &str) -> usize {
        self.entries
            .iter()
            .filter(|(entry_name, _)| entry_name == name)
            .count()
    }

    /// Total number of registered entries, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockChaincodeClient;

    fn mock() -> Arc<dyn ChaincodeClient> {
        Arc::new(MockChaincodeClient::new())
    }

    #[test]
    fn test_resolve_finds_single_instance() {
        let registry = ClientRegistry::new().with_client("chaincodeClient", mock());

        assert!(registry.resolve("chaincodeClient").is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_unknown_lists_registered_names() {
        let registry = ClientRegistry::new()
            .with_client("ledgerClient", mock())
            .with_client("auditClient", mock());

        let err = registry.resolve("chaincodeClient").unwrap_err();
        match err {
            ResolutionError::UnknownClient { name, registered } => {
                assert_eq!(name, "chaincodeClient");
                assert_eq!(registered, vec!["auditClient", "ledgerClient"]);
            }
            other => panic!("expected UnknownClient, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_ambiguous_counts_instances() {
        let registry = ClientRegistry::new()
            .with_client("chaincodeClient", mock())
            .with_client("chaincodeClient", mock());

        let err = registry.resolve("chaincodeClient").unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::AmbiguousClient { count: 2, .. }
        ));
        assert_eq!(registry.count("chaincodeClient"), 2);
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = ClientRegistry::new();
        assert!(registry.is_empty());

        let err = registry.resolve("chaincodeClient").unwrap_err();
        match err {
            ResolutionError::UnknownClient { registered, .. } => {
                assert!(registered.is_empty());
            }
            other => panic!("expected UnknownClient, got {other:?}"),
        }
    }
}
