//! Wiring and repository error types

use thiserror::Error;

use chaincode_client::{ClientError, ResolutionError};
use repo_config::ConfigError;

/// Errors a factory or hand-written constructor can raise while building a
/// repository.
#[derive(Error, Debug)]
pub enum FactoryError {
    /// Construction itself failed
    #[error("repository construction failed: {0}")]
    Construction(String),

    /// The factory does not know how to build this candidate
    #[error("candidate '{0}' is not supported by this factory")]
    UnsupportedCandidate(String),
}

impl FactoryError {
    /// Creates a construction error
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    /// Creates an unsupported-candidate error
    pub fn unsupported(candidate: impl Into<String>) -> Self {
        Self::UnsupportedCandidate(candidate.into())
    }
}

/// Errors raised while wiring repositories during bootstrap.
///
/// Registration is all-or-nothing: any of these aborts the run before the
/// wired registry is released.
#[derive(Error, Debug)]
pub enum SupportError {
    /// The enablement configuration is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configured client reference did not resolve to exactly one client
    #[error("client resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// The configured factory type has no registered factory
    #[error("no repository factory registered for type '{0}'")]
    UnknownFactory(String),

    /// The configured base type has no registered base behavior
    #[error("no repository base registered for type '{0}'")]
    UnknownBase(String),

    /// A candidate with the same qualified name was already declared
    #[error("candidate '{0}' is already declared")]
    DuplicateCandidate(String),

    /// Two admitted candidates resolve to the same repository name
    #[error("repository '{0}' is already registered")]
    DuplicateRepository(String),

    /// No base packages resolved and the registrar has no fallback
    #[error("no base packages resolved and no fallback package was provided")]
    NoBasePackages,

    /// The configured named-queries location could not be loaded
    #[error("failed to load named queries from '{location}': {reason}")]
    NamedQueries { location: String, reason: String },

    /// A factory or constructor failed for one candidate
    #[error("failed to construct repository '{repository}': {source}")]
    Construction {
        repository: String,
        source: FactoryError,
    },
}

impl SupportError {
    /// Creates a named-queries loading error
    pub fn named_queries(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NamedQueries {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error originates in the declared configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if the error is a client-reference resolution failure
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

/// Errors raised by a live repository serving calls.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A named query was requested that neither the repository scope nor the
    /// global scope defines
    #[error("repository '{repository}' has no named query '{query}'")]
    UnknownNamedQuery { repository: String, query: String },

    /// The underlying client failed
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}

impl RepositoryError {
    /// Returns true if retrying the operation may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Client(client) if client.is_transient())
    }
}
