//! Requirement update strategies

use crate::error::RequirementError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How aggressively declarations are rewritten towards a target version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// Leave declarations untouched, only the lockfile moves
    LockfileOnly,
    /// Always rewrite declarations to the target
    BumpVersions,
    /// Rewrite only declarations that do not admit the target
    #[default]
    BumpVersionsIfNecessary,
}

impl UpdateStrategy {
    /// All recognized strategies
    pub const ALL: [UpdateStrategy; 3] = [
        UpdateStrategy::LockfileOnly,
        UpdateStrategy::BumpVersions,
        UpdateStrategy::BumpVersionsIfNecessary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateStrategy::LockfileOnly => "lockfile_only",
            UpdateStrategy::BumpVersions => "bump_versions",
            UpdateStrategy::BumpVersionsIfNecessary => "bump_versions_if_necessary",
        }
    }

    /// Returns true if this strategy may change declarations
    pub fn unlocks_requirements(&self) -> bool {
        !matches!(self, UpdateStrategy::LockfileOnly)
    }
}

impl fmt::Display for UpdateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateStrategy {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| RequirementError::unknown_update_strategy(s))
    }
}
