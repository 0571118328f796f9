//! Dependency group rule configuration
//!
//! This module provides the GroupRules struct that mirrors one entry of the
//! `groups:` section of a dependabot-style configuration file.

use super::UpdateType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of dependency a group admits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    Production,
    Development,
}

impl DependencyType {
    /// The dependency type of a dependency with the given production flag
    pub fn of(production: bool) -> Self {
        if production {
            DependencyType::Production
        } else {
            DependencyType::Development
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyType::Production => "production",
            DependencyType::Development => "development",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rules deciding group membership and allowed update types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GroupRules {
    /// Wildcard patterns a dependency name must match (any of)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
    /// Wildcard patterns that remove a dependency from the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_patterns: Option<Vec<String>>,
    /// Restrict the group to production or development dependencies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<DependencyType>,
    /// Update types the group may propose; everything else is ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_types: Option<Vec<UpdateType>>,
}

impl GroupRules {
    /// Create empty rules (every dependency matches)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name patterns
    pub fn with_patterns<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set exclude patterns
    pub fn with_exclude_patterns<S: Into<String>>(
        mut self,
        patterns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.exclude_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the dependency type
    pub fn with_dependency_type(mut self, dependency_type: DependencyType) -> Self {
        self.dependency_type = Some(dependency_type);
        self
    }

    /// Set the allowed update types
    pub fn with_update_types(mut self, update_types: Vec<UpdateType>) -> Self {
        self.update_types = Some(update_types);
        self
    }

    /// Returns true if at least one name pattern is configured
    pub fn has_pattern_rules(&self) -> bool {
        self.patterns.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Returns true if a dependency type restriction is configured
    pub fn has_dependency_type_rule(&self) -> bool {
        self.dependency_type.is_some()
    }

    /// Allowed update types, if any are configured
    pub fn allowed_update_types(&self) -> Option<&[UpdateType]> {
        self.update_types.as_deref().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rules() {
        let rules = GroupRules::new();
        assert!(rules.patterns.is_none());
        assert!(rules.exclude_patterns.is_none());
        assert!(rules.dependency_type.is_none());
        assert!(rules.update_types.is_none());
        assert!(!rules.has_pattern_rules());
        assert!(!rules.has_dependency_type_rule());
        assert!(rules.allowed_update_types().is_none());
    }

    #[test]
    fn test_chained_builders() {
        let rules = GroupRules::new()
            .with_patterns(["aws-*"])
            .with_exclude_patterns(["aws-sdk-legacy"])
            .with_dependency_type(DependencyType::Production)
            .with_update_types(vec![UpdateType::Minor, UpdateType::Patch]);

        assert_eq!(rules.patterns, Some(vec!["aws-*".to_string()]));
        assert_eq!(rules.exclude_patterns, Some(vec!["aws-sdk-legacy".to_string()]));
        assert_eq!(rules.dependency_type, Some(DependencyType::Production));
        assert_eq!(
            rules.allowed_update_types(),
            Some(&[UpdateType::Minor, UpdateType::Patch][..])
        );
    }

    #[test]
    fn test_empty_lists_count_as_absent() {
        let rules = GroupRules::new()
            .with_patterns(Vec::<String>::new())
            .with_update_types(vec![]);
        assert!(!rules.has_pattern_rules());
        assert!(rules.allowed_update_types().is_none());
    }

    #[test]
    fn test_dependency_type_of() {
        assert_eq!(DependencyType::of(true), DependencyType::Production);
        assert_eq!(DependencyType::of(false), DependencyType::Development);
    }

    #[test]
    fn test_deserialize_kebab_case_keys() {
        let yaml = "patterns:\n  - \"aws-*\"\nexclude-patterns:\n  - aws-legacy\ndependency-type: development\nupdate-types:\n  - minor\n";
        let rules: GroupRules = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules.patterns, Some(vec!["aws-*".to_string()]));
        assert_eq!(rules.exclude_patterns, Some(vec!["aws-legacy".to_string()]));
        assert_eq!(rules.dependency_type, Some(DependencyType::Development));
        assert_eq!(rules.update_types, Some(vec![UpdateType::Minor]));
    }

    #[test]
    fn test_deserialize_rejects_unknown_dependency_type() {
        let result: Result<GroupRules, _> = serde_yaml::from_str("dependency-type: all\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_absent_keys() {
        let rules = GroupRules::new().with_patterns(["swift-*"]);
        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(json, r#"{"patterns":["swift-*"]}"#);
    }
}
