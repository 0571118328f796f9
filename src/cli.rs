//! CLI argument parsing module for depbump

use crate::update::UpdateStrategy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Requirement declaration parser, updater and dependency group matcher
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depbump",
    version,
    about = "Requirement declaration updater and dependency group matcher"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    // General options
    /// Enable verbose output (debug logging on stderr)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Ecosystem whose declaration syntax is parsed
    #[arg(long, global = true, default_value = "swift")]
    pub ecosystem: String,

    // Output options
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse declarations and print the requirement each one denotes
    Parse {
        /// Declarations such as `from: "1.0.0"` or `"1.0.0"..<"2.0.0"`
        #[arg(required = true)]
        declarations: Vec<String>,
    },

    /// Rewrite declarations so they admit a target version
    Update {
        /// Declarations to rewrite
        #[arg(required = true)]
        declarations: Vec<String>,

        /// Version the declarations should admit
        #[arg(long)]
        target: Option<String>,

        /// Update strategy (lockfile_only, bump_versions, bump_versions_if_necessary)
        #[arg(long, default_value_t = UpdateStrategy::default())]
        strategy: UpdateStrategy,
    },

    /// Show which configured groups contain a dependency
    Group {
        /// Dependency name
        name: String,

        /// YAML file with a top-level `groups:` mapping
        #[arg(short, long)]
        config: PathBuf,

        /// Treat the dependency as a development dependency
        #[arg(long)]
        development: bool,

        /// Currently resolved version, used to compute ignored ranges
        #[arg(long)]
        current_version: Option<String>,

        /// Print each group's rules back as configuration YAML
        #[arg(long)]
        show_config: bool,
    },
}
