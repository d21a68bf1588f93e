//! Repository wiring for chaincode-backed repositories
//!
//! This crate turns declared repository interfaces into live, client-backed
//! repositories. Applications declare candidates into a [`CandidateSet`],
//! register clients in a `ClientRegistry`, build an `EnablementConfig`, and
//! hand all three to the [`Registrar`]; a successful run yields a
//! [`RepositoryRegistry`] of wired repositories and a report of what was
//! registered and what was skipped.
//!
//! # Architecture
//!
//! - `candidate`: explicit candidate declarations and the scanned set
//! - `factory`: the factory seam, the default factory, and hand-written
//!   implementation overrides
//! - `base`: shared call behavior behind every repository method
//! - `repository`: the built repository and its metadata
//! - `named_queries`: externally defined query-name mappings
//! - `registry`: the wired output
//! - `registrar`: the bootstrap pass tying the above together
//!
//! # Usage
//!
//! ```rust,ignore
//! let report = Registrar::new(candidates, clients)
//!     .register(&config)?;
//! let assets = report.registry().get("AssetRepository");
//! ```

pub mod base;
pub mod candidate;
pub mod error;
pub mod factory;
pub mod named_queries;
pub mod registrar;
pub mod registry;
pub mod repository;

pub use base::{BaseRegistry, DefaultRepositoryBase, RepositoryBase};
pub use candidate::{CandidateSet, RepositoryCandidate};
pub use error::{FactoryError, RepositoryError, SupportError};
pub use factory::{
    ChaincodeRepositoryFactory, Constructor, FactoryRegistry, ImplementationRegistry,
    RepositoryContext, RepositoryFactory,
};
pub use named_queries::NamedQueries;
pub use registrar::{RegistrationReport, Registrar, SkipReason, SkippedCandidate};
pub use registry::RepositoryRegistry;
pub use repository::{ChaincodeRepository, DefaultChaincodeRepository, RepositoryMetadata};
