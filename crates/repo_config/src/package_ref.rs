//! Package references
//!
//! Scan locations are plain module paths, validated at construction so that
//! every [`PackageRef`] held by a configuration is well formed. Ordering and
//! equality are lexical, which keeps resolved package sets deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Separator between package path segments.
pub const PACKAGE_SEPARATOR: &str = "::";

/// Returns true when `value` is a plain identifier: an ASCII letter or
/// underscore followed by letters, digits, or underscores.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A validated package path such as `app::repositories::policy`.
///
/// Construction goes through [`PackageRef::parse`], so an instance always
/// holds a non-empty sequence of valid identifier segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageRef(String);

impl PackageRef {
    /// Parses and validates a package path.
    pub fn parse(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        let path = path.as_ref().trim();
        if path.is_empty() {
            return Err(ConfigError::invalid_package("package path must not be empty"));
        }
        for segment in path.split(PACKAGE_SEPARATOR) {
            if !is_identifier(segment) {
                return Err(ConfigError::invalid_package(format!(
                    "'{path}' contains invalid segment '{segment}'"
                )));
            }
        }
        Ok(Self(path.to_string()))
    }

    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the path segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PACKAGE_SEPARATOR)
    }

    /// Returns true when `other` is this package or nested anywhere below it.
    ///
    /// Containment is segment-aware: `app::repo` does not contain
    /// `app::repository`.
    pub fn contains(&self, other: &PackageRef) -> bool {
        other.0 == self.0 || other.0.starts_with(&format!("{}{}", self.0, PACKAGE_SEPARATOR))
    }

    /// Returns the enclosing package, or `None` for a top-level package
    pub fn parent(&self) -> Option<PackageRef> {
        self.0
            .rfind(PACKAGE_SEPARATOR)
            .map(|idx| PackageRef(self.0[..idx].to_string()))
    }

    /// Appends one segment to the path.
    pub fn join(&self, segment: &str) -> Result<PackageRef, ConfigError> {
        if !is_identifier(segment) {
            return Err(ConfigError::invalid_package(format!(
                "invalid segment '{segment}'"
            )));
        }
        Ok(PackageRef(format!("{}{}{}", self.0, PACKAGE_SEPARATOR, segment)))
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PackageRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PackageRef {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PackageRef> for String {
    fn from(value: PackageRef) -> Self {
        value.0
    }
}
