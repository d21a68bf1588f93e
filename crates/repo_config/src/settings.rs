//! Environment-driven enablement settings
//!
//! Applications that declare enablement in configuration files or the
//! environment rather than in code load [`EnablementSettings`] and convert
//! them into a builder. Only scalar fields are expressible here; filters and
//! marker types stay code-side.

use serde::Deserialize;
use validator::Validate;

use crate::enablement::{
    EnablementConfigBuilder, DEFAULT_CLIENT_REFERENCE, DEFAULT_IMPLEMENTATION_POSTFIX,
};
use crate::error::ConfigError;
use crate::package_ref::PackageRef;
use crate::type_ref::TypeRef;

/// Environment prefix for enablement variables, e.g.
/// `CHAINCODE_CLIENT_REFERENCE`.
pub const ENV_PREFIX: &str = "CHAINCODE";

/// Enablement values loadable from the environment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnablementSettings {
    /// Comma-separated list of packages to scan
    #[serde(default)]
    pub base_packages: Vec<String>,

    /// Postfix for hand-written implementation lookup
    #[serde(default = "default_postfix")]
    #[validate(length(min = 1))]
    pub implementation_postfix: String,

    /// Location of externally defined named queries
    #[serde(default)]
    pub named_queries_location: Option<String>,

    /// Reference name of the chaincode client to wire in
    #[serde(default = "default_client_reference")]
    #[validate(length(min = 1))]
    pub client_reference: String,

    /// Repository factory type name
    #[serde(default)]
    pub factory_type: Option<String>,

    /// Repository base behavior type name
    #[serde(default)]
    pub base_type: Option<String>,
}

fn default_postfix() -> String {
    DEFAULT_IMPLEMENTATION_POSTFIX.to_string()
}

fn default_client_reference() -> String {
    DEFAULT_CLIENT_REFERENCE.to_string()
}

impl Default for EnablementSettings {
    fn default() -> Self {
        Self {
            base_packages: Vec::new(),
            implementation_postfix: default_postfix(),
            named_queries_location: None,
            client_reference: default_client_reference(),
            factory_type: None,
            base_type: None,
        }
    }
}

impl EnablementSettings {
    /// Loads settings from `CHAINCODE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings: Self = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("base_packages"),
            )
            .build()?
            .try_deserialize()?;
        settings
            .validate()
            .map_err(|e| ConfigError::invalid_settings(e.to_string()))?;
        Ok(settings)
    }

    /// Converts the settings into a builder with every scalar applied.
    ///
    /// The builder can still be extended with filters and marker types
    /// before building.
    pub fn into_builder(self) -> Result<EnablementConfigBuilder, ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::invalid_settings(e.to_string()))?;
        let mut builder = EnablementConfigBuilder::new()
            .with_implementation_postfix(self.implementation_postfix)
            .with_client_reference(self.client_reference);
        for package in &self.base_packages {
            builder = builder.with_base_package(PackageRef::parse(package)?);
        }
        if let Some(location) = self.named_queries_location {
            builder = builder.with_named_queries_location(location);
        }
        if let Some(factory) = self.factory_type {
            builder = builder.with_factory_type(TypeRef::named(factory)?);
        }
        if let Some(base) = self.base_type {
            builder = builder.with_base_type(TypeRef::named(base)?);
        }
        Ok(builder)
    }
}
