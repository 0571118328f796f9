//! Loading dependency groups from YAML configuration
//!
//! The expected document shape is:
//!
//! ```yaml
//! groups:
//!   aws:
//!     patterns:
//!       - "aws-*"
//!     update-types:
//!       - minor
//!       - patch
//! ```
//!
//! Groups keep the order in which they appear in the document.

use super::{DependencyGroup, GroupRules};
use crate::domain::Dependency;
use crate::error::ConfigError;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    groups: Option<Mapping>,
}

/// The dependency groups defined by a configuration document
#[derive(Debug, Clone, Default)]
pub struct GroupConfig {
    groups: Vec<DependencyGroup>,
}

impl GroupConfig {
    /// Parse groups from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let document: Option<ConfigDocument> = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::yaml_parse_error(e.to_string()))?;
        let entries = document.and_then(|d| d.groups).unwrap_or_default();

        let groups = entries
            .into_iter()
            .map(|(key, value)| {
                let name = key
                    .as_str()
                    .ok_or_else(|| {
                        ConfigError::invalid_group(format!("{:?}", key), "name must be a string")
                    })?
                    .to_string();
                let rules = match value {
                    Value::Null => GroupRules::default(),
                    other => serde_yaml::from_value(other)
                        .map_err(|e| ConfigError::invalid_group(&name, e.to_string()))?,
                };
                DependencyGroup::new(name, rules)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { groups })
    }

    /// Read and parse groups from a YAML file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn groups(&self) -> &[DependencyGroup] {
        &self.groups
    }

    /// Find a group by name
    pub fn find(&self, name: &str) -> Option<&DependencyGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Groups that contain `dependency`, in document order
    pub fn groups_containing<'a>(
        &'a self,
        dependency: &'a Dependency,
    ) -> impl Iterator<Item = &'a DependencyGroup> + 'a {
        self.groups.iter().filter(move |g| g.contains(dependency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{DependencyType, UpdateType};

    const CONFIG: &str = r#"
groups:
  swift-server:
    patterns:
      - "swift-*"
    exclude-patterns:
      - "swift-format"
    dependency-type: production
  everything-else:
    update-types:
      - minor
      - patch
"#;

    #[test]
    fn test_parse_groups_in_order() {
        let config = GroupConfig::from_yaml_str(CONFIG).unwrap();
        let names: Vec<&str> = config.groups().iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["swift-server", "everything-else"]);

        let server = config.find("swift-server").unwrap();
        assert_eq!(server.rules().dependency_type, Some(DependencyType::Production));
        assert_eq!(
            config.find("everything-else").unwrap().rules().update_types,
            Some(vec![UpdateType::Minor, UpdateType::Patch])
        );
    }

    #[test]
    fn test_groups_containing() {
        let config = GroupConfig::from_yaml_str(CONFIG).unwrap();

        let nio = Dependency::production("swift-nio");
        let names: Vec<&str> = config.groups_containing(&nio).map(|g| g.name()).collect();
        assert_eq!(names, vec!["swift-server", "everything-else"]);

        let format = Dependency::production("swift-format");
        let names: Vec<&str> = config.groups_containing(&format).map(|g| g.name()).collect();
        assert_eq!(names, vec!["everything-else"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(GroupConfig::from_yaml_str("").unwrap().groups().is_empty());
        assert!(GroupConfig::from_yaml_str("version: 2\n").unwrap().groups().is_empty());
    }

    #[test]
    fn test_group_without_rules() {
        let config = GroupConfig::from_yaml_str("groups:\n  all:\n").unwrap();
        assert_eq!(config.groups()[0].rules(), &GroupRules::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = GroupConfig::from_yaml_str("groups: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::YamlParseError { .. }));
    }

    #[test]
    fn test_invalid_update_type() {
        let err = GroupConfig::from_yaml_str("groups:\n  g:\n    update-types: [huge]\n")
            .unwrap_err();
        match err {
            ConfigError::InvalidGroup { group, .. } => assert_eq!(group, "g"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = GroupConfig::from_path(Path::new("/nonexistent/dependabot.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
