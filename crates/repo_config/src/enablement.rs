//! Repository enablement configuration
//!
//! The declarative surface that turns chaincode repository support on for an
//! application. A configuration is assembled once, handed to the registrar
//! during bootstrap, and never consulted again afterwards.
//!
//! # Architecture
//!
//! [`EnablementConfig`] is immutable; all assembly goes through
//! [`EnablementConfigBuilder`]. Every field has a usable default, so
//! `EnablementConfig::default()` is a valid configuration that scans nothing
//! beyond the registrar's fallback package. Scan roots are the union of the
//! declared packages and the packages of the declared marker types, with
//! duplicates collapsing silently.
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = EnablementConfig::builder()
//!     .with_base_package(PackageRef::parse("app::repositories")?)
//!     .with_exclude_filter(ScanFilter::pattern(r"Internal")?)
//!     .with_client_reference("ledgerClient")
//!     .build()?;
//! ```

use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::filters::ScanFilter;
use crate::package_ref::PackageRef;
use crate::type_ref::TypeRef;

/// Postfix appended to a repository name when looking up a hand-written
/// implementation, unless overridden.
pub const DEFAULT_IMPLEMENTATION_POSTFIX: &str = "Impl";

/// Reference name of the chaincode client wired into repositories, unless
/// overridden.
pub const DEFAULT_CLIENT_REFERENCE: &str = "chaincodeClient";

/// Immutable enablement configuration consumed by the registrar.
#[derive(Debug, Clone)]
pub struct EnablementConfig {
    base_packages: BTreeSet<PackageRef>,
    base_package_types: BTreeSet<TypeRef>,
    include_filters: Vec<ScanFilter>,
    exclude_filters: Vec<ScanFilter>,
    implementation_postfix: String,
    named_queries_location: Option<String>,
    factory_type: TypeRef,
    base_type: TypeRef,
    client_reference: String,
}

impl EnablementConfig {
    /// Starts assembling a configuration
    pub fn builder() -> EnablementConfigBuilder {
        EnablementConfigBuilder::new()
    }

    /// Resolves the packages to scan: the union of declared packages and the
    /// packages of declared marker types.
    ///
    /// The result is empty only when nothing was declared, in which case the
    /// registrar falls back to its caller-supplied package.
    pub fn resolve_base_packages(&self) -> BTreeSet<PackageRef> {
        let mut packages = self.base_packages.clone();
        packages.extend(
            self.base_package_types
                .iter()
                .filter_map(|type_ref| type_ref.package().cloned()),
        );
        packages
    }

    /// Packages declared directly
    pub fn declared_packages(&self) -> &BTreeSet<PackageRef> {
        &self.base_packages
    }

    /// Marker types whose packages anchor the scan
    pub fn base_package_types(&self) -> &BTreeSet<TypeRef> {
        &self.base_package_types
    }

    /// Both filter sequences, include first
    pub fn filters(&self) -> (&[ScanFilter], &[ScanFilter]) {
        (&self.include_filters, &self.exclude_filters)
    }

    /// Filters a candidate must match to be admitted, when any are declared
    pub fn include_filters(&self) -> &[ScanFilter] {
        &self.include_filters
    }

    /// Filters that remove a candidate even when included
    pub fn exclude_filters(&self) -> &[ScanFilter] {
        &self.exclude_filters
    }

    /// Postfix for hand-written implementation lookup
    pub fn implementation_postfix(&self) -> &str {
        &self.implementation_postfix
    }

    /// Location of externally defined named queries, when declared
    pub fn named_queries_location(&self) -> Option<&str> {
        self.named_queries_location.as_deref()
    }

    /// Factory type constructing the repositories
    pub fn factory_type(&self) -> &TypeRef {
        &self.factory_type
    }

    /// Base behavior type backing repository method implementations
    pub fn base_type(&self) -> &TypeRef {
        &self.base_type
    }

    /// Reference name of the chaincode client to wire in
    pub fn client_reference(&self) -> &str {
        &self.client_reference
    }

    /// Checks every declared value.
    ///
    /// Builders call this before releasing a configuration, so a held
    /// instance has already passed. The registrar calls it again as its first
    /// step, ahead of client resolution.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.implementation_postfix.is_empty() {
            return Err(ConfigError::EmptyPostfix);
        }
        if !self
            .implementation_postfix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ConfigError::InvalidPostfix(
                self.implementation_postfix.clone(),
            ));
        }
        if self.client_reference.trim().is_empty() {
            return Err(ConfigError::BlankClientReference);
        }
        if let Some(location) = &self.named_queries_location {
            if location.trim().is_empty() {
                return Err(ConfigError::BlankNamedQueriesLocation);
            }
        }
        for type_ref in &self.base_package_types {
            if type_ref.package().is_none() {
                return Err(ConfigError::TypeWithoutPackage(type_ref.name().to_string()));
            }
        }
        Ok(())
    }
}

impl Default for EnablementConfig {
    fn default() -> Self {
        Self {
            base_packages: BTreeSet::new(),
            base_package_types: BTreeSet::new(),
            include_filters: Vec::new(),
            exclude_filters: Vec::new(),
            implementation_postfix: DEFAULT_IMPLEMENTATION_POSTFIX.to_string(),
            named_queries_location: None,
            factory_type: TypeRef::default_factory(),
            base_type: TypeRef::default_base(),
            client_reference: DEFAULT_CLIENT_REFERENCE.to_string(),
        }
    }
}

/// Builder for [`EnablementConfig`].
///
/// Methods consume and return the builder; [`build`](Self::build) validates
/// before releasing the configuration.
#[derive(Debug, Default)]
pub struct EnablementConfigBuilder {
    base_packages: BTreeSet<PackageRef>,
    base_package_types: BTreeSet<TypeRef>,
    include_filters: Vec<ScanFilter>,
    exclude_filters: Vec<ScanFilter>,
    implementation_postfix: Option<String>,
    named_queries_location: Option<String>,
    factory_type: Option<TypeRef>,
    base_type: Option<TypeRef>,
    client_reference: Option<String>,
}

impl EnablementConfigBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a package to scan
    pub fn with_base_package(mut self, package: PackageRef) -> Self {
        self.base_packages.insert(package);
        self
    }

    /// Adds several packages to scan
    pub fn with_base_packages(mut self, packages: impl IntoIterator<Item = PackageRef>) -> Self {
        self.base_packages.extend(packages);
        self
    }

    /// Adds a marker type whose package anchors the scan
    pub fn with_base_package_type(mut self, type_ref: TypeRef) -> Self {
        self.base_package_types.insert(type_ref);
        self
    }

    /// Adds an include filter
    pub fn with_include_filter(mut self, filter: ScanFilter) -> Self {
        self.include_filters.push(filter);
        self
    }

    /// Adds an exclude filter
    pub fn with_exclude_filter(mut self, filter: ScanFilter) -> Self {
        self.exclude_filters.push(filter);
        self
    }

    /// Overrides the implementation postfix
    pub fn with_implementation_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.implementation_postfix = Some(postfix.into());
        self
    }

    /// Declares where externally defined named queries live.
    ///
    /// An empty string means not declared, matching the default.
    pub fn with_named_queries_location(mut self, location: impl Into<String>) -> Self {
        self.named_queries_location = Some(location.into());
        self
    }

    /// Overrides the repository factory type
    pub fn with_factory_type(mut self, factory: TypeRef) -> Self {
        self.factory_type = Some(factory);
        self
    }

    /// Overrides the repository base behavior type
    pub fn with_base_type(mut self, base: TypeRef) -> Self {
        self.base_type = Some(base);
        self
    }

    /// Overrides the chaincode client reference name
    pub fn with_client_reference(mut self, reference: impl Into<String>) -> Self {
        self.client_reference = Some(reference.into());
        self
    }

    /// Validates and releases the configuration.
    pub fn build(self) -> Result<EnablementConfig, ConfigError> {
        let config = EnablementConfig {
            base_packages: self.base_packages,
            base_package_types: self.base_package_types,
            include_filters: self.include_filters,
            exclude_filters: self.exclude_filters,
            implementation_postfix: self
                .implementation_postfix
                .unwrap_or_else(|| DEFAULT_IMPLEMENTATION_POSTFIX.to_string()),
            named_queries_location: self
                .named_queries_location
                .filter(|location| !location.is_empty()),
            factory_type: self.factory_type.unwrap_or_else(TypeRef::default_factory),
            base_type: self.base_type.unwrap_or_else(TypeRef::default_base),
            client_reference: self
                .client_reference
                .unwrap_or_else(|| DEFAULT_CLIENT_REFERENCE.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EnablementConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.implementation_postfix(), "Impl");
        assert_eq!(config.client_reference(), "chaincodeClient");
        assert!(config.named_queries_location().is_none());
        assert!(config.factory_type().is_default_factory());
        assert!(config.base_type().is_default_base());
        assert!(config.resolve_base_packages().is_empty());
    }

    #[test]
    fn test_builder_merges_packages_and_marker_types() {
        let app = PackageRef::parse("app::repos").unwrap();
        let markers = PackageRef::parse("app::markers").unwrap();
        let marker = TypeRef::qualified(markers.clone(), "RepoMarker").unwrap();

        let config = EnablementConfig::builder()
            .with_base_package(app.clone())
            .with_base_package(app.clone())
            .with_base_package_type(marker)
            .build()
            .unwrap();

        let resolved = config.resolve_base_packages();
        assert_eq!(resolved.len(), 2);
        assert!(resolved.contains(&app));
        assert!(resolved.contains(&markers));
    }

    #[test]
    fn test_marker_type_without_package_is_rejected() {
        let marker = TypeRef::named("RepoMarker").unwrap();
        let result = EnablementConfig::builder()
            .with_base_package_type(marker)
            .build();

        assert!(matches!(result, Err(ConfigError::TypeWithoutPackage(name)) if name == "RepoMarker"));
    }

    #[test]
    fn test_postfix_validation() {
        let result = EnablementConfig::builder()
            .with_implementation_postfix("")
            .build();
        assert!(matches!(result, Err(ConfigError::EmptyPostfix)));

        let result = EnablementConfig::builder()
            .with_implementation_postfix("Im pl")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidPostfix(_))));

        let config = EnablementConfig::builder()
            .with_implementation_postfix("Chaincode")
            .build()
            .unwrap();
        assert_eq!(config.implementation_postfix(), "Chaincode");
    }

    #[test]
    fn test_blank_client_reference_is_rejected() {
        let result = EnablementConfig::builder()
            .with_client_reference("   ")
            .build();
        assert!(matches!(result, Err(ConfigError::BlankClientReference)));
    }

    #[test]
    fn test_empty_named_queries_location_means_unset() {
        let config = EnablementConfig::builder()
            .with_named_queries_location("")
            .build()
            .unwrap();
        assert!(config.named_queries_location().is_none());

        let result = EnablementConfig::builder()
            .with_named_queries_location("  ")
            .build();
        assert!(matches!(result, Err(ConfigError::BlankNamedQueriesLocation)));

        let config = EnablementConfig::builder()
            .with_named_queries_location("queries/chaincode.properties")
            .build()
            .unwrap();
        assert_eq!(
            config.named_queries_location(),
            Some("queries/chaincode.properties")
        );
    }

    #[test]
    fn test_filters_accessor_returns_both_sequences() {
        let config = EnablementConfig::builder()
            .with_include_filter(ScanFilter::name("PolicyRepository"))
            .with_exclude_filter(ScanFilter::name("AuditRepository"))
            .with_exclude_filter(ScanFilter::name("InternalRepository"))
            .build()
            .unwrap();

        let (include, exclude) = config.filters();
        assert_eq!(include.len(), 1);
        assert_eq!(exclude.len(), 2);
    }
}
