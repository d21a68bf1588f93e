//! Configuration error types

use thiserror::Error;

/// Errors raised while declaring or loading enablement configuration.
///
/// Every variant is detectable before any repository is constructed, so a
/// failed configuration never leaves partially wired repositories behind.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The implementation postfix was set to an empty string
    #[error("implementation postfix must not be empty")]
    EmptyPostfix,

    /// The implementation postfix is not a usable type-name suffix
    #[error("implementation postfix '{0}' is not a valid identifier")]
    InvalidPostfix(String),

    /// The client reference name was set to a blank string
    #[error("client reference name must not be blank")]
    BlankClientReference,

    /// A named-queries location was declared but blank
    #[error("named queries location must not be blank when set")]
    BlankNamedQueriesLocation,

    /// A package path failed validation
    #[error("invalid package path: {0}")]
    InvalidPackage(String),

    /// A type name failed validation
    #[error("invalid type name: '{0}'")]
    InvalidTypeName(String),

    /// A base-package type carries no package to scan from
    #[error("type '{0}' has no package and cannot anchor a scan")]
    TypeWithoutPackage(String),

    /// A pattern filter expression failed to compile
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(String),

    /// Settings loaded from the environment failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Underlying configuration source error
    #[error("configuration load error: {0}")]
    Load(#[from] config::ConfigError),
}

impl ConfigError {
    /// Creates an invalid-package error
    pub fn invalid_package(message: impl Into<String>) -> Self {
        Self::InvalidPackage(message.into())
    }

    /// Creates an invalid-type-name error
    pub fn invalid_type_name(name: impl Into<String>) -> Self {
        Self::InvalidTypeName(name.into())
    }

    /// Creates an invalid-pattern error
    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::InvalidPattern(message.into())
    }

    /// Creates an invalid-settings error
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings(message.into())
    }

    /// Returns true if the error stems from a declared value rather than a
    /// configuration source failure
    pub fn is_declaration_error(&self) -> bool {
        !matches!(self, Self::Load(_) | Self::InvalidSettings(_))
    }
}
