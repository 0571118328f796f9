//! Command orchestrator for coordinating a single CLI invocation
//!
//! This module provides:
//! - Dispatch of the parsed command to the requirement and group engines
//! - Report structures consumed by the output formatters

use crate::cli::{CliArgs, Command};
use crate::domain::{Declaration, DeclarationKind, Dependency};
use crate::error::{AppError, RequirementError};
use crate::group::GroupConfig;
use crate::parser::ParserRegistry;
use crate::update::{RequirementsUpdater, UpdateStrategy};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Orchestrator for one command invocation
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Declaration parsers keyed by ecosystem
    parsers: ParserRegistry,
}

/// Result of running a command
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Report {
    Parse(ParseReport),
    Update(UpdateReport),
    Group(GroupReport),
}

/// Parsed form of each declaration
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub declarations: Vec<ParsedDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedDeclaration {
    pub declaration: String,
    pub kind: DeclarationKind,
    pub min: String,
    pub max: String,
    pub requirement: String,
}

impl From<&Declaration> for ParsedDeclaration {
    fn from(declaration: &Declaration) -> Self {
        Self {
            declaration: declaration.raw().to_string(),
            kind: declaration.kind(),
            min: declaration.min().to_string(),
            max: declaration.max().to_string(),
            requirement: declaration.requirement().to_string(),
        }
    }
}

/// Declarations before and after applying an update strategy
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub strategy: UpdateStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub changes: Vec<RequirementChange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementChange {
    pub from: String,
    pub to: String,
    pub requirement: String,
    pub changed: bool,
}

impl UpdateReport {
    /// Number of declarations that were rewritten
    pub fn changed_count(&self) -> usize {
        self.changes.iter().filter(|c| c.changed).count()
    }
}

/// Group membership of one dependency
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub dependency: Dependency,
    pub groups: Vec<GroupMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupMatch {
    pub name: String,
    pub contains: bool,
    /// Ranges the group ignores; only computed for groups that contain the dependency
    pub ignored_versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_yaml: Option<String>,
}

impl GroupReport {
    /// Groups that contain the dependency
    pub fn matching(&self) -> impl Iterator<Item = &GroupMatch> {
        self.groups.iter().filter(|g| g.contains)
    }
}

impl Orchestrator {
    /// Create a new orchestrator with the built-in parsers
    pub fn new(args: CliArgs) -> Self {
        Self::with_registry(args, ParserRegistry::with_defaults())
    }

    /// Create an orchestrator with an explicit parser registry
    pub fn with_registry(args: CliArgs, parsers: ParserRegistry) -> Self {
        Self { args, parsers }
    }

    /// Run the command
    pub fn run(&self) -> Result<Report, AppError> {
        match &self.args.command {
            Command::Parse { declarations } => Ok(Report::Parse(self.run_parse(declarations)?)),
            Command::Update {
                declarations,
                target,
                strategy,
            } => Ok(Report::Update(self.run_update(
                declarations,
                target.as_deref(),
                *strategy,
            )?)),
            Command::Group {
                name,
                config,
                development,
                current_version,
                show_config,
            } => {
                let mut dependency = Dependency::new(name.clone(), !development);
                dependency.version = current_version.clone();
                Ok(Report::Group(self.run_group(config, &dependency, *show_config)?))
            }
        }
    }

    fn parse_declarations(&self, raws: &[String]) -> Result<Vec<Declaration>, RequirementError> {
        raws.iter()
            .map(|raw| self.parsers.parse(&self.args.ecosystem, raw))
            .collect()
    }

    fn run_parse(&self, raws: &[String]) -> Result<ParseReport, RequirementError> {
        let declarations = self.parse_declarations(raws)?;
        Ok(ParseReport {
            declarations: declarations.iter().map(ParsedDeclaration::from).collect(),
        })
    }

    fn run_update(
        &self,
        raws: &[String],
        target: Option<&str>,
        strategy: UpdateStrategy,
    ) -> Result<UpdateReport, RequirementError> {
        let declarations = self.parse_declarations(raws)?;
        let updater = RequirementsUpdater::new(declarations.clone(), strategy, target);
        let updated = updater.updated_requirements()?;

        let changes = declarations
            .iter()
            .zip(updated.iter())
            .map(|(old, new)| RequirementChange {
                from: old.raw().to_string(),
                to: new.raw().to_string(),
                requirement: new.requirement().to_string(),
                changed: old.raw() != new.raw(),
            })
            .collect();

        Ok(UpdateReport {
            strategy,
            target: updater.target_version().map(|v| v.to_string()),
            changes,
        })
    }

    fn run_group(
        &self,
        config_path: &Path,
        dependency: &Dependency,
        show_config: bool,
    ) -> Result<GroupReport, AppError> {
        let config = GroupConfig::from_path(config_path)?;
        debug!(
            path = %config_path.display(),
            groups = config.groups().len(),
            "loaded group config"
        );

        let groups = config
            .groups()
            .iter()
            .map(|group| -> Result<GroupMatch, AppError> {
                let contains = group.contains(dependency);
                let ignored_versions = if contains {
                    group
                        .ignored_versions_for(dependency)
                        .iter()
                        .map(|r| r.to_string())
                        .collect()
                } else {
                    Vec::new()
                };
                let config_yaml = if show_config {
                    Some(group.to_config_yaml()?)
                } else {
                    None
                };
                Ok(GroupMatch {
                    name: group.name().to_string(),
                    contains,
                    ignored_versions,
                    config_yaml,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GroupReport {
            dependency: dependency.clone(),
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn run(argv: &[&str]) -> Result<Report, AppError> {
        let args = CliArgs::parse_from(argv);
        Orchestrator::new(args).run()
    }

    #[test]
    fn test_run_parse() {
        let report = run(&["depbump", "parse", r#"from: "1.0.0""#, r#""1.0.0"..."2.0.0""#]).unwrap();
        let Report::Parse(parse) = report else {
            panic!("expected parse report");
        };
        assert_eq!(parse.declarations.len(), 2);
        assert_eq!(parse.declarations[0].kind, DeclarationKind::UpToNextMajor);
        assert_eq!(parse.declarations[0].requirement, ">= 1.0.0, < 2.0.0");
        assert_eq!(parse.declarations[1].requirement, ">= 1.0.0, <= 2.0.0");
    }

    #[test]
    fn test_run_parse_unsupported() {
        let err = run(&["depbump", "parse", r#"branch: "main""#]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Requirement(RequirementError::UnsupportedConstraint { .. })
        ));
    }

    #[test]
    fn test_run_parse_unknown_ecosystem() {
        let err = run(&["depbump", "--ecosystem", "npm", "parse", "^1.0.0"]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Requirement(RequirementError::UnsupportedEcosystem { .. })
        ));
    }

    #[test]
    fn test_run_update() {
        let report = run(&[
            "depbump",
            "update",
            r#"from: "1.0.0""#,
            r#"exact: "1.0.0""#,
            "--target",
            "2.5.0",
        ])
        .unwrap();
        let Report::Update(update) = report else {
            panic!("expected update report");
        };
        assert_eq!(update.strategy, UpdateStrategy::BumpVersionsIfNecessary);
        assert_eq!(update.target.as_deref(), Some("2.5.0"));
        assert_eq!(update.changes[0].to, r#"from: "2.0.0""#);
        assert_eq!(update.changes[1].to, r#"exact: "2.5.0""#);
        assert_eq!(update.changed_count(), 2);
    }

    #[test]
    fn test_run_update_lockfile_only() {
        let report = run(&[
            "depbump",
            "update",
            r#"from: "1.0.0""#,
            "--strategy",
            "lockfile_only",
        ])
        .unwrap();
        let Report::Update(update) = report else {
            panic!("expected update report");
        };
        assert_eq!(update.changed_count(), 0);
    }

    #[test]
    fn test_run_group() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dependabot.yml");
        fs::write(
            &path,
            "groups:\n  aws:\n    patterns:\n      - \"aws-*\"\n    update-types:\n      - major\n  dev:\n    dependency-type: development\n",
        )
        .unwrap();

        let report = run(&[
            "depbump",
            "group",
            "aws-sdk",
            "--config",
            path.to_str().unwrap(),
            "--current-version",
            "1.2.3",
        ])
        .unwrap();
        let Report::Group(group) = report else {
            panic!("expected group report");
        };
        let matching: Vec<&str> = group.matching().map(|g| g.name.as_str()).collect();
        assert_eq!(matching, vec!["aws"]);
        assert_eq!(
            group.groups[0].ignored_versions,
            vec![">= 1.3, < 2", ">= 1.2.4, < 1.3"]
        );
        assert!(group.groups[1].ignored_versions.is_empty());
    }

    #[test]
    fn test_report_json_tag() {
        let report = run(&["depbump", "parse", r#"exact: "1.0.0""#]).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["command"], "parse");
        assert_eq!(json["declarations"][0]["kind"], "exact");
        assert_eq!(json["declarations"][0]["requirement"], "= 1.0.0");
    }
}
