//! Type references
//!
//! Configuration points at types by name rather than by instance: the factory
//! to construct repositories with, the base behavior to back them, and marker
//! types whose packages anchor a scan. A [`TypeRef`] is that name, optionally
//! qualified by the package it lives in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;
use crate::package_ref::{is_identifier, PackageRef, PACKAGE_SEPARATOR};

/// Conventional name of the default repository factory.
pub const DEFAULT_FACTORY_NAME: &str = "ChaincodeRepositoryFactory";

/// Conventional name of the default repository base behavior.
pub const DEFAULT_BASE_NAME: &str = "DefaultRepositoryBase";

/// A type name, optionally qualified by its package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    package: Option<PackageRef>,
    name: String,
}

impl TypeRef {
    /// Builds a reference from a compile-time type.
    ///
    /// Generic parameters are stripped, so `Vec<Policy>` and `Vec<Claim>`
    /// both resolve to the name `Vec`.
    pub fn of<T: ?Sized>() -> Self {
        let raw = std::any::type_name::<T>();
        let raw = raw.split('<').next().unwrap_or(raw);
        match raw.rsplit_once(PACKAGE_SEPARATOR) {
            Some((prefix, name)) => Self {
                package: PackageRef::parse(prefix).ok(),
                name: name.to_string(),
            },
            None => Self {
                package: None,
                name: raw.to_string(),
            },
        }
    }

    /// Builds an unqualified reference from a bare type name.
    pub fn named(name: impl AsRef<str>) -> Result<Self, ConfigError> {
        let name = name.as_ref().trim();
        if !is_identifier(name) {
            return Err(ConfigError::invalid_type_name(name));
        }
        Ok(Self {
            package: None,
            name: name.to_string(),
        })
    }

    /// Builds a reference qualified by the package it lives in.
    pub fn qualified(package: PackageRef, name: impl AsRef<str>) -> Result<Self, ConfigError> {
        let name = name.as_ref().trim();
        if !is_identifier(name) {
            return Err(ConfigError::invalid_type_name(name));
        }
        Ok(Self {
            package: Some(package),
            name: name.to_string(),
        })
    }

    /// The reference used when no factory type is declared
    pub fn default_factory() -> Self {
        Self {
            package: None,
            name: DEFAULT_FACTORY_NAME.to_string(),
        }
    }

    /// The reference used when no base type is declared
    pub fn default_base() -> Self {
        Self {
            package: None,
            name: DEFAULT_BASE_NAME.to_string(),
        }
    }

    /// Returns the bare type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the package the type lives in, when known
    pub fn package(&self) -> Option<&PackageRef> {
        self.package.as_ref()
    }

    /// Returns the package-qualified name, or the bare name when unqualified
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{package}{PACKAGE_SEPARATOR}{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns true when this names the conventional default factory
    pub fn is_default_factory(&self) -> bool {
        self.name == DEFAULT_FACTORY_NAME
    }

    /// Returns true when this names the conventional default base behavior
    pub fn is_default_base(&self) -> bool {
        self.name == DEFAULT_BASE_NAME
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PolicyRepository;

    #[test]
    fn test_of_captures_package_and_name() {
        let type_ref = TypeRef::of::<PolicyRepository>();
        assert_eq!(type_ref.name(), "PolicyRepository");
        let package = type_ref.package().unwrap();
        assert!(package.as_str().ends_with("type_ref::tests"));
    }

    #[test]
    fn test_of_strips_generic_parameters() {
        let type_ref = TypeRef::of::<Vec<PolicyRepository>>();
        assert_eq!(type_ref.name(), "Vec");
    }

    #[test]
    fn test_named_validates_identifier() {
        assert!(TypeRef::named("CustomFactory").is_ok());
        assert!(TypeRef::named("Custom Factory").is_err());
        assert!(TypeRef::named("").is_err());
    }

    #[test]
    fn test_defaults_carry_conventional_names() {
        assert_eq!(TypeRef::default_factory().name(), DEFAULT_FACTORY_NAME);
        assert_eq!(TypeRef::default_base().name(), DEFAULT_BASE_NAME);
        assert!(TypeRef::default_factory().is_default_factory());
        assert!(TypeRef::default_base().is_default_base());
        assert!(TypeRef::default_factory().package().is_none());
    }

    #[test]
    fn test_qualified_name_formats() {
        let package = PackageRef::parse("app::repos").unwrap();
        let type_ref = TypeRef::qualified(package, "PolicyRepository").unwrap();
        assert_eq!(type_ref.qualified_name(), "app::repos::PolicyRepository");
        assert_eq!(type_ref.to_string(), "app::repos::PolicyRepository");
    }
}
