//! Dependency information structures

use super::{Declaration, Requirement, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A declaration of a dependency as it appears in one manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRequirement {
    /// Manifest file the declaration was read from (e.g., `Package.swift`)
    pub file: String,
    /// The declaration text and its parsed constraint
    pub declaration: Declaration,
}

impl DependencyRequirement {
    /// Creates a new requirement entry
    pub fn new(file: impl Into<String>, declaration: Declaration) -> Self {
        Self {
            file: file.into(),
            declaration,
        }
    }

    /// Returns the normalized requirement of the declaration
    pub fn requirement(&self) -> &Requirement {
        self.declaration.requirement()
    }

    /// Returns a copy of this entry with the declaration replaced by the
    /// result of `f`; the rendered requirement follows the new declaration
    pub fn map_declaration<E>(
        &self,
        f: impl FnOnce(&Declaration) -> Result<Declaration, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            file: self.file.clone(),
            declaration: f(&self.declaration)?,
        })
    }
}

/// Represents a package dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Currently resolved version, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Whether this is a production (non-development) dependency
    pub production: bool,
    /// Declarations attached to this dependency
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<DependencyRequirement>,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(name: impl Into<String>, production: bool) -> Self {
        Self {
            name: name.into(),
            version: None,
            production,
            requirements: Vec::new(),
        }
    }

    /// Creates a new production dependency
    pub fn production(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Creates a new development dependency
    pub fn development(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Sets the current version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a requirement entry (builder pattern)
    pub fn with_requirement(mut self, requirement: DependencyRequirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    /// Returns the current version if it is present and well-formed
    pub fn parsed_version(&self) -> Option<Version> {
        self.version
            .as_deref()
            .and_then(|v| Version::parse(v).ok())
    }

    /// Returns the declarations of all requirement entries
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.requirements.iter().map(|r| &r.declaration)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.production { "" } else { " (dev)" };
        match &self.version {
            Some(version) => write!(f, "{}@{}{}", self.name, version, dev_marker),
            None => write!(f, "{}{}", self.name, dev_marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequirementError;

    fn from_requirement(raw: &str) -> DependencyRequirement {
        DependencyRequirement::new("Package.swift", Declaration::parse(raw).unwrap())
    }

    #[test]
    fn test_dependency_production() {
        let dep = Dependency::production("swift-nio");
        assert_eq!(dep.name, "swift-nio");
        assert!(dep.production);
        assert!(dep.version.is_none());
    }

    #[test]
    fn test_dependency_development() {
        let dep = Dependency::development("swift-snapshot-testing");
        assert!(!dep.production);
    }

    #[test]
    fn test_parsed_version() {
        let dep = Dependency::production("swift-log").with_version("1.5.3");
        assert_eq!(dep.parsed_version(), Some(Version::parse("1.5.3").unwrap()));

        let branch = Dependency::production("swift-log").with_version("main");
        assert!(branch.parsed_version().is_none());
    }

    #[test]
    fn test_declarations() {
        let dep = Dependency::production("swift-log")
            .with_requirement(from_requirement(r#"from: "1.0.0""#))
            .with_requirement(from_requirement(r#"exact: "1.2.0""#));
        let raws: Vec<&str> = dep.declarations().map(|d| d.raw()).collect();
        assert_eq!(raws, vec![r#"from: "1.0.0""#, r#"exact: "1.2.0""#]);
    }

    #[test]
    fn test_map_declaration_rederives_requirement() {
        let entry = from_requirement(r#"from: "1.0.0""#);
        let target = Version::parse("2.1.0").unwrap();
        let mapped = entry
            .map_declaration(|d| d.bump_to_satisfy(&target))
            .unwrap();
        assert_eq!(mapped.file, "Package.swift");
        assert_eq!(mapped.declaration.raw(), r#"from: "2.0.0""#);
        assert_eq!(mapped.requirement().to_string(), ">= 2.0.0, < 3.0.0");
    }

    #[test]
    fn test_map_declaration_propagates_error() {
        let entry = from_requirement(r#"from: "1.0.0""#);
        let result: Result<DependencyRequirement, RequirementError> =
            entry.map_declaration(|_| Err(RequirementError::unsupported_constraint("x")));
        assert!(result.is_err());
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::production("swift-nio").with_version("2.40.0");
        assert_eq!(dep.to_string(), "swift-nio@2.40.0");
        let dev = Dependency::development("quick");
        assert_eq!(dev.to_string(), "quick (dev)");
    }

    #[test]
    fn test_serde_dependency() {
        let dep = Dependency::production("swift-nio")
            .with_version("2.40.0")
            .with_requirement(from_requirement(r#"from: "2.0.0""#));
        let json = serde_json::to_string(&dep).unwrap();
        let parsed: Dependency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dep);
    }
}
