//! Ignore conditions derived from allowed update types
//!
//! An ignore condition turns a dependency's current version into the
//! version ranges that must not be proposed. For a current version `M.m.p`:
//! - patch updates: `>= M.m.(p+1), < M.(m+1)`
//! - minor updates: `>= M.(m+1), < (M+1)`
//! - major updates: `>= (M+1)`

use super::WildcardPattern;
use crate::domain::{Comparator, Dependency, Requirement, Version, VersionRange};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A semantic version update type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    #[serde(alias = "version-update:semver-major")]
    Major,
    #[serde(alias = "version-update:semver-minor")]
    Minor,
    #[serde(alias = "version-update:semver-patch")]
    Patch,
}

impl UpdateType {
    /// Every recognized version update type
    pub const ALL: [UpdateType; 3] = [UpdateType::Major, UpdateType::Minor, UpdateType::Patch];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Major => "major",
            UpdateType::Minor => "minor",
            UpdateType::Patch => "patch",
        }
    }

    /// The update types from [`UpdateType::ALL`] that are not in `allowed`
    pub fn complement(allowed: &[UpdateType]) -> Vec<UpdateType> {
        Self::ALL
            .into_iter()
            .filter(|t| !allowed.contains(t))
            .collect()
    }

    /// The range of versions this kind of update moves `current` into
    ///
    /// Returns `None` when a bound would overflow a segment.
    pub fn range_from(&self, current: &Version) -> Option<VersionRange> {
        let (major, minor, patch) = (current.major(), current.minor(), current.patch());
        let v = Version::from_segments;
        let range = match self {
            UpdateType::Major => {
                Requirement::new(vec![Comparator::gte(v(vec![major.checked_add(1)?]))])
            }
            UpdateType::Minor => Requirement::new(vec![
                Comparator::gte(v(vec![major, minor.checked_add(1)?])),
                Comparator::lt(v(vec![major.checked_add(1)?])),
            ]),
            UpdateType::Patch => Requirement::new(vec![
                Comparator::gte(v(vec![major, minor, patch.checked_add(1)?])),
                Comparator::lt(v(vec![major, minor.checked_add(1)?])),
            ]),
        };
        Some(range)
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ignore rule for dependencies whose name matches a wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    dependency_name: WildcardPattern,
    update_types: Vec<UpdateType>,
    versions: Vec<VersionRange>,
}

impl IgnoreRule {
    /// Create a rule ignoring `update_types` for dependencies matching `dependency_name`
    pub fn new(dependency_name: &str, update_types: Vec<UpdateType>) -> Result<Self, ConfigError> {
        Ok(Self {
            dependency_name: WildcardPattern::new(dependency_name)?,
            update_types,
            versions: Vec::new(),
        })
    }

    /// Additionally ignore explicit version ranges (builder pattern)
    pub fn with_versions(mut self, versions: Vec<VersionRange>) -> Self {
        self.versions = versions;
        self
    }

    pub fn dependency_name(&self) -> &str {
        self.dependency_name.as_str()
    }

    pub fn update_types(&self) -> &[UpdateType] {
        &self.update_types
    }
}

/// Decides which version ranges are excluded for a dependency
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IgnoreCondition {
    /// Never ignores anything
    #[default]
    Null,
    /// Ignores according to a rule
    Rule(IgnoreRule),
}

impl IgnoreCondition {
    /// Version ranges that must be excluded for `dependency`
    ///
    /// Security-only runs skip update-type ranges and keep explicit versions.
    pub fn ignored_versions(
        &self,
        dependency: &Dependency,
        security_updates_only: bool,
    ) -> Vec<VersionRange> {
        let rule = match self {
            IgnoreCondition::Null => return Vec::new(),
            IgnoreCondition::Rule(rule) => rule,
        };

        if security_updates_only || !rule.dependency_name.matches(&dependency.name) {
            return rule.versions.clone();
        }

        let mut ranges: Vec<VersionRange> = match dependency.parsed_version() {
            Some(current) => rule
                .update_types
                .iter()
                .filter_map(|t| {
                    let range = t.range_from(&current);
                    if range.is_none() {
                        warn!(
                            dependency = %dependency.name,
                            update_type = %t,
                            "skipping ignore range that overflows the current version"
                        );
                    }
                    range
                })
                .collect(),
            None => Vec::new(),
        };
        ranges.extend(rule.versions.iter().cloned());
        ranges
    }

    pub fn is_null(&self) -> bool {
        matches!(self, IgnoreCondition::Null)
    }
}
