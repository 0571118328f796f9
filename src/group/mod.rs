//! Dependency groups
//!
//! A group batches dependencies into one update. Membership is decided by
//! explicit registration or by the group's rules (name patterns and
//! dependency type); the group's allowed update types are turned into an
//! ignore condition once, when the group is built.
//!
//! Registration ([`DependencyGroup::add_dependency`]) is the only mutation.
//! [`DependencyGroup::contains`] is a pure query that never registers;
//! registered dependencies only short-circuit it.

mod config;
mod ignore;
mod rules;
mod wildcard;

pub use config::GroupConfig;
pub use ignore::{IgnoreCondition, IgnoreRule, UpdateType};
pub use rules::{DependencyType, GroupRules};
pub use wildcard::WildcardPattern;

use crate::domain::{Dependency, VersionRange};
use crate::error::ConfigError;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Dependency name matched by the derived ignore condition
pub const ANY_DEPENDENCY_NAME: &str = "*";

/// Groups only ever compute ignores for regular version updates
const SECURITY_UPDATES_ONLY: bool = false;

/// A named batch of dependencies
#[derive(Debug, Clone)]
pub struct DependencyGroup {
    name: String,
    rules: GroupRules,
    dependencies: Vec<Dependency>,
    patterns: Vec<WildcardPattern>,
    exclude_patterns: Vec<WildcardPattern>,
    ignore_condition: IgnoreCondition,
}

impl DependencyGroup {
    /// Build a group, compiling its patterns and deriving its ignore condition
    pub fn new(name: impl Into<String>, rules: GroupRules) -> Result<Self, ConfigError> {
        let name = name.into();
        let patterns = WildcardPattern::compile_all(rules.patterns.as_deref().unwrap_or_default())?;
        let exclude_patterns =
            WildcardPattern::compile_all(rules.exclude_patterns.as_deref().unwrap_or_default())?;
        let ignore_condition = Self::generate_ignore_condition(&rules)?;

        debug!(group = %name, ?ignore_condition, "built dependency group");

        Ok(Self {
            name,
            rules,
            dependencies: Vec::new(),
            patterns,
            exclude_patterns,
            ignore_condition,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &GroupRules {
        &self.rules
    }

    /// Dependencies explicitly registered with this group
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn ignore_condition(&self) -> &IgnoreCondition {
        &self.ignore_condition
    }

    /// Register a dependency with the group regardless of its rules
    pub fn add_dependency(&mut self, dependency: Dependency) {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
    }

    /// Returns true if `dependency` belongs to the group
    pub fn contains(&self, dependency: &Dependency) -> bool {
        if self.dependencies.contains(dependency) {
            return true;
        }

        self.matches_pattern(&dependency.name) && self.matches_dependency_type(dependency)
    }

    /// Returns true if `name` passes the pattern and exclude-pattern rules
    pub fn matches_pattern(&self, name: &str) -> bool {
        // No patterns means every name passes
        if !self.rules.has_pattern_rules() {
            return true;
        }

        let positive = self.patterns.iter().any(|p| p.matches(name));
        let negative = self.exclude_patterns.iter().any(|p| p.matches(name));

        positive && !negative
    }

    /// Returns true if the dependency's type is admitted by the group
    pub fn matches_dependency_type(&self, dependency: &Dependency) -> bool {
        match self.rules.dependency_type {
            Some(required) => required == DependencyType::of(dependency.production),
            None => true,
        }
    }

    /// Version ranges the group never proposes for `dependency`
    pub fn ignored_versions_for(&self, dependency: &Dependency) -> Vec<VersionRange> {
        self.ignore_condition
            .ignored_versions(dependency, SECURITY_UPDATES_ONLY)
    }

    /// Debug view of the group: `{"name": <group name>}`
    pub fn to_summary(&self) -> HashMap<String, String> {
        HashMap::from([("name".to_string(), self.name.clone())])
    }

    /// Renders the group as it appears in a configuration file
    pub fn to_config_yaml(&self) -> Result<String, ConfigError> {
        let document = BTreeMap::from([("groups", BTreeMap::from([(&self.name, &self.rules)]))]);
        let yaml = serde_yaml::to_string(&document).map_err(|e| ConfigError::SerializeError {
            message: e.to_string(),
        })?;
        Ok(yaml.strip_prefix("---\n").unwrap_or(&yaml).to_string())
    }

    fn generate_ignore_condition(rules: &GroupRules) -> Result<IgnoreCondition, ConfigError> {
        let Some(allowed) = rules.allowed_update_types() else {
            return Ok(IgnoreCondition::Null);
        };

        let rule = IgnoreRule::new(ANY_DEPENDENCY_NAME, UpdateType::complement(allowed))?;
        Ok(IgnoreCondition::Rule(rule))
    }
}
