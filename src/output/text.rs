//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Parsed declarations with the requirement they denote
//! - Before/after view of rewritten declarations
//! - Group membership with ignored version ranges

use crate::orchestrator::{GroupReport, ParseReport, Report, UpdateReport};
use crate::output::{OutputFormatter, Verbosity};
use colored::{ColoredString, Colorize};
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_parse(&self, report: &ParseReport, writer: &mut dyn Write) -> std::io::Result<()> {
        for parsed in &report.declarations {
            if self.verbosity == Verbosity::Quiet {
                writeln!(writer, "{}", parsed.requirement)?;
                continue;
            }

            writeln!(
                writer,
                "{}  {}  {}",
                self.paint(&parsed.declaration, |s| s.bold()),
                self.paint("->", |s| s.dimmed()),
                self.paint(&parsed.requirement, |s| s.green()),
            )?;

            if self.verbosity == Verbosity::Verbose {
                writeln!(
                    writer,
                    "    {} {}, {} {}, {} {}",
                    self.paint("kind:", |s| s.dimmed()),
                    parsed.kind,
                    self.paint("min:", |s| s.dimmed()),
                    parsed.min,
                    self.paint("max:", |s| s.dimmed()),
                    parsed.max,
                )?;
            }
        }
        Ok(())
    }

    fn format_update(&self, report: &UpdateReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            for change in &report.changes {
                writeln!(writer, "{}", change.to)?;
            }
            return Ok(());
        }

        let target = report.target.as_deref().unwrap_or("none");
        writeln!(
            writer,
            "{} {} (target: {})",
            self.paint("Strategy:", |s| s.bold()),
            report.strategy,
            target
        )?;

        for change in &report.changes {
            if change.changed {
                writeln!(
                    writer,
                    "  {} {} {}",
                    change.from,
                    self.paint("->", |s| s.dimmed()),
                    self.paint(&change.to, |s| s.green()),
                )?;
            } else {
                writeln!(
                    writer,
                    "  {} {}",
                    change.from,
                    self.paint("(unchanged)", |s| s.dimmed()),
                )?;
            }

            if self.verbosity == Verbosity::Verbose {
                writeln!(
                    writer,
                    "    {} {}",
                    self.paint("requirement:", |s| s.dimmed()),
                    change.requirement
                )?;
            }
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "{} of {} declaration(s) updated",
            report.changed_count(),
            report.changes.len()
        )
    }

    fn format_group(&self, report: &GroupReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            for group in report.matching() {
                writeln!(writer, "{}", group.name)?;
            }
            return Ok(());
        }

        writeln!(
            writer,
            "{} {}",
            self.paint("Dependency:", |s| s.bold()),
            report.dependency
        )?;

        if report.matching().next().is_none() {
            let message = "No groups contain this dependency";
            writeln!(writer, "  {}", self.paint(message, |s| s.yellow()))?;
        }

        for group in &report.groups {
            if group.contains {
                writeln!(writer, "  {} {}", self.paint("✓", |s| s.green()), group.name)?;
                for range in &group.ignored_versions {
                    writeln!(
                        writer,
                        "      {} {}",
                        self.paint("ignores", |s| s.dimmed()),
                        range
                    )?;
                }
            } else if self.verbosity == Verbosity::Verbose {
                writeln!(writer, "  {} {}", self.paint("✗", |s| s.red()), group.name)?;
            } else {
                continue;
            }

            if let Some(yaml) = &group.config_yaml {
                for line in yaml.lines() {
                    writeln!(writer, "      {}", self.paint(line, |s| s.cyan()))?;
                }
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        match report {
            Report::Parse(parse) => self.format_parse(parse, writer),
            Report::Update(update) => self.format_update(update, writer),
            Report::Group(group) => self.format_group(group, writer),
        }
    }
}
