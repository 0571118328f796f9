//! Wildcard patterns for dependency names
//!
//! `*` matches any run of characters (including none). Every other character
//! matches itself, case-sensitively, and the pattern must cover the whole name.

use crate::error::ConfigError;
use regex::Regex;
use std::fmt;

/// A compiled wildcard pattern such as `aws-*`
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compile a wildcard pattern
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^{}$", body))
            .map_err(|e| ConfigError::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Compile every pattern in `patterns`
    pub fn compile_all(patterns: &[String]) -> Result<Vec<Self>, ConfigError> {
        patterns.iter().map(|p| Self::new(p)).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the whole of `name` matches the pattern
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for WildcardPattern {}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
