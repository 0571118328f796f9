//! JSON output formatter for machine processing

use crate::orchestrator::Report;
use crate::output::{OutputFormatter, Verbosity};
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet output is written on a single line
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let json = if self.verbosity == Verbosity::Quiet {
            serde_json::to_string(report)
        } else {
            serde_json::to_string_pretty(report)
        }
        .map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}
