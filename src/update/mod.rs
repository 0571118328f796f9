//! Requirement update logic for dependencies
//!
//! This module provides:
//! - Update strategies that control how declarations move
//! - The requirements updater that applies a strategy towards a target version

mod strategy;

pub use strategy::UpdateStrategy;

use crate::domain::{Declaration, Dependency, DependencyRequirement, Version};
use crate::error::RequirementError;
use tracing::{debug, warn};

/// Rewrites a set of declarations towards a target version
#[derive(Debug, Clone)]
pub struct RequirementsUpdater {
    requirements: Vec<Declaration>,
    strategy: UpdateStrategy,
    target_version: Option<Version>,
}

impl RequirementsUpdater {
    /// Create a new updater
    ///
    /// A target version that does not parse is dropped, leaving the updater
    /// without a target.
    pub fn new(
        requirements: Vec<Declaration>,
        strategy: UpdateStrategy,
        target_version: Option<&str>,
    ) -> Self {
        let target_version = target_version.and_then(|raw| match Version::parse(raw) {
            Ok(version) => Some(version),
            Err(e) => {
                warn!(target_version = raw, error = %e, "ignoring malformed target version");
                None
            }
        });

        Self {
            requirements,
            strategy,
            target_version,
        }
    }

    /// Create a new updater from a strategy token such as `bump_versions`
    pub fn from_token(
        requirements: Vec<Declaration>,
        strategy: &str,
        target_version: Option<&str>,
    ) -> Result<Self, RequirementError> {
        Ok(Self::new(requirements, strategy.parse()?, target_version))
    }

    /// Create an updater over every declaration attached to `dependency`
    pub fn for_dependency(
        dependency: &Dependency,
        strategy: UpdateStrategy,
        target_version: Option<&str>,
    ) -> Self {
        Self::new(
            dependency.declarations().cloned().collect(),
            strategy,
            target_version,
        )
    }

    pub fn strategy(&self) -> UpdateStrategy {
        self.strategy
    }

    pub fn target_version(&self) -> Option<&Version> {
        self.target_version.as_ref()
    }

    /// Returns the declarations after applying the strategy
    pub fn updated_requirements(&self) -> Result<Vec<Declaration>, RequirementError> {
        if self.strategy == UpdateStrategy::LockfileOnly {
            return Ok(self.requirements.clone());
        }

        self.requirements
            .iter()
            .map(|declaration| self.rewrite(declaration))
            .collect()
    }

    /// Applies the strategy to each requirement entry of `dependency`,
    /// keeping the manifest file of every entry
    pub fn updated_dependency_requirements(
        &self,
        dependency: &Dependency,
    ) -> Result<Vec<DependencyRequirement>, RequirementError> {
        if self.strategy == UpdateStrategy::LockfileOnly {
            return Ok(dependency.requirements.clone());
        }

        dependency
            .requirements
            .iter()
            .map(|entry| entry.map_declaration(|declaration| self.rewrite(declaration)))
            .collect()
    }

    fn rewrite(&self, declaration: &Declaration) -> Result<Declaration, RequirementError> {
        let target = self
            .target_version
            .as_ref()
            .ok_or_else(|| RequirementError::missing_target_version(self.strategy.as_str()))?;

        debug!(
            declaration = %declaration,
            strategy = %self.strategy,
            target_version = %target,
            "updating requirement"
        );

        match self.strategy {
            UpdateStrategy::BumpVersionsIfNecessary => declaration.bump_to_satisfy(target),
            UpdateStrategy::BumpVersions => declaration.update(target),
            UpdateStrategy::LockfileOnly => Ok(declaration.clone()),
        }
    }
}
