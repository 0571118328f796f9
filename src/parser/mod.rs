//! Requirement declaration parsers keyed by ecosystem
//!
//! Parsers are collected in an explicit [`ParserRegistry`] that the caller
//! builds and passes to whatever needs to parse declarations.

mod swift;

pub use swift::SwiftRequirementParser;

use crate::domain::Declaration;
use crate::error::RequirementError;
use std::collections::HashMap;

/// Trait for parsing requirement declarations
pub trait RequirementParser: Send + Sync {
    /// Parse a raw declaration string
    fn parse(&self, raw: &str) -> Result<Declaration, RequirementError>;

    /// Returns the ecosystem identifier this parser handles
    fn ecosystem(&self) -> &'static str;
}

/// Mapping from ecosystem identifier to its declaration parser
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<&'static str, Box<dyn RequirementParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in parser
    pub fn with_defaults() -> Self {
        Self::new().with_parser(SwiftRequirementParser)
    }

    /// Register a parser under its ecosystem, replacing any previous one
    pub fn with_parser(mut self, parser: impl RequirementParser + 'static) -> Self {
        self.register(parser);
        self
    }

    pub fn register(&mut self, parser: impl RequirementParser + 'static) {
        self.parsers.insert(parser.ecosystem(), Box::new(parser));
    }

    /// Get the parser for an ecosystem
    pub fn get(&self, ecosystem: &str) -> Option<&dyn RequirementParser> {
        self.parsers.get(ecosystem).map(|p| p.as_ref())
    }

    /// Parse a declaration with the parser registered for `ecosystem`
    pub fn parse(&self, ecosystem: &str, raw: &str) -> Result<Declaration, RequirementError> {
        self.get(ecosystem)
            .ok_or_else(|| RequirementError::unsupported_ecosystem(ecosystem))?
            .parse(raw)
    }

    /// Registered ecosystem identifiers, sorted
    pub fn ecosystems(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.parsers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
