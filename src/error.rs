//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RequirementError: Issues with versions, declarations and update strategies
//! - ConfigError: Issues with dependency group configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version requirement related errors
    #[error(transparent)]
    Requirement(#[from] RequirementError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while parsing or rewriting version requirements
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    /// Version text is empty or has a non-numeric segment
    #[error("malformed version '{value}'")]
    MalformedVersion { value: String },

    /// Declaration matches none of the supported syntactic forms
    #[error("unsupported constraint: {declaration}")]
    UnsupportedConstraint { declaration: String },

    /// Strategy token is not one of the recognized strategies
    #[error("unknown update strategy: {value}")]
    UnknownUpdateStrategy { value: String },

    /// A rewriting strategy was requested without a target version
    #[error("update strategy '{strategy}' requires a target version")]
    MissingTargetVersion { strategy: String },

    /// No parser is registered for the ecosystem
    #[error("no requirement parser registered for ecosystem '{ecosystem}'")]
    UnsupportedEcosystem { ecosystem: String },
}

/// Errors related to dependency group configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("failed to parse YAML config: {message}")]
    YamlParseError { message: String },

    /// A group entry could not be interpreted
    #[error("invalid group '{group}': {message}")]
    InvalidGroup { group: String, message: String },

    /// A wildcard pattern could not be compiled
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Rendering the configuration back to YAML failed
    #[error("failed to serialize config: {message}")]
    SerializeError { message: String },
}

impl RequirementError {
    /// Creates a new MalformedVersion error
    pub fn malformed_version(value: impl Into<String>) -> Self {
        RequirementError::MalformedVersion {
            value: value.into(),
        }
    }

    /// Creates a new UnsupportedConstraint error
    pub fn unsupported_constraint(declaration: impl Into<String>) -> Self {
        RequirementError::UnsupportedConstraint {
            declaration: declaration.into(),
        }
    }

    /// Creates a new UnknownUpdateStrategy error
    pub fn unknown_update_strategy(value: impl Into<String>) -> Self {
        RequirementError::UnknownUpdateStrategy {
            value: value.into(),
        }
    }

    /// Creates a new MissingTargetVersion error
    pub fn missing_target_version(strategy: impl Into<String>) -> Self {
        RequirementError::MissingTargetVersion {
            strategy: strategy.into(),
        }
    }

    /// Creates a new UnsupportedEcosystem error
    pub fn unsupported_ecosystem(ecosystem: impl Into<String>) -> Self {
        RequirementError::UnsupportedEcosystem {
            ecosystem: ecosystem.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new YamlParseError
    pub fn yaml_parse_error(message: impl Into<String>) -> Self {
        ConfigError::YamlParseError {
            message: message.into(),
        }
    }

    /// Creates a new InvalidGroup error
    pub fn invalid_group(group: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidGroup {
            group: group.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
