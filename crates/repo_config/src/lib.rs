//! Declarative enablement surface for chaincode-backed repositories
//!
//! This crate carries everything an application declares to turn repository
//! support on: which packages to scan, which candidates to keep, how
//! hand-written implementations are named, where named queries live, and
//! which factory, base behavior, and chaincode client to wire in. The
//! registrar in `repo_support` consumes a finished [`EnablementConfig`]
//! exactly once during bootstrap.
//!
//! # Modules
//!
//! - `enablement`: the configuration descriptor and its builder
//! - `package_ref`: validated package paths
//! - `type_ref`: package-qualified type names
//! - `filters`: include/exclude candidate filters
//! - `settings`: environment-driven configuration loading
//! - `error`: configuration error taxonomy

pub mod enablement;
pub mod error;
pub mod filters;
pub mod package_ref;
pub mod settings;
pub mod type_ref;

pub use enablement::{
    EnablementConfig, EnablementConfigBuilder, DEFAULT_CLIENT_REFERENCE,
    DEFAULT_IMPLEMENTATION_POSTFIX,
};
pub use error::ConfigError;
pub use filters::{evaluate_filters, passes_filters, CandidateSummary, FilterDecision, ScanFilter};
pub use package_ref::{is_identifier, PackageRef, PACKAGE_SEPARATOR};
pub use settings::{EnablementSettings, ENV_PREFIX};
pub use type_ref::{TypeRef, DEFAULT_BASE_NAME, DEFAULT_FACTORY_NAME};
