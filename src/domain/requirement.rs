//! Normalized comparator sets
//!
//! A requirement is an ordered list of `(operator, version)` comparators
//! that must all hold. It renders as `">= 1.0.0, < 2.0.0"` and parses back
//! from the same form.

use super::Version;
use crate::error::RequirementError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A range of versions, expressed as a requirement
pub type VersionRange = Requirement;

/// Comparison operator of a single comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `=`
    Equal,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "=",
        }
    }

    /// Two-character operators come first so `<=` is not read as `<`
    const PARSE_ORDER: [Operator; 4] = [
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Less,
        Operator::Equal,
    ];
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(operator, version)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    pub op: Operator,
    pub version: Version,
}

impl Comparator {
    pub fn new(op: Operator, version: Version) -> Self {
        Self { op, version }
    }

    pub fn gte(version: Version) -> Self {
        Self::new(Operator::GreaterOrEqual, version)
    }

    pub fn lt(version: Version) -> Self {
        Self::new(Operator::Less, version)
    }

    pub fn lte(version: Version) -> Self {
        Self::new(Operator::LessOrEqual, version)
    }

    pub fn exact(version: Version) -> Self {
        Self::new(Operator::Equal, version)
    }

    /// Returns true if `version` satisfies this comparator
    pub fn matches(&self, version: &Version) -> bool {
        match self.op {
            Operator::GreaterOrEqual => version >= &self.version,
            Operator::Less => version < &self.version,
            Operator::LessOrEqual => version <= &self.version,
            Operator::Equal => version == &self.version,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.version)
    }
}

impl FromStr for Comparator {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (op, rest) = Operator::PARSE_ORDER
            .iter()
            .find_map(|op| trimmed.strip_prefix(op.as_str()).map(|rest| (*op, rest)))
            .unwrap_or((Operator::Equal, trimmed));
        Ok(Self::new(op, Version::parse(rest.trim())?))
    }
}

/// An ordered list of comparators, all of which must hold
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement {
    comparators: Vec<Comparator>,
}

impl Requirement {
    pub fn new(comparators: Vec<Comparator>) -> Self {
        Self { comparators }
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    /// Returns true if every comparator holds for `version`
    pub fn satisfied_by(&self, version: &Version) -> bool {
        self.comparators.iter().all(|c| c.matches(version))
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comparator) in self.comparators.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", comparator)?;
        }
        Ok(())
    }
}

impl FromStr for Requirement {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(RequirementError::unsupported_constraint(s));
        }
        let comparators = s
            .split(',')
            .map(|part| part.parse::<Comparator>())
            .collect::<Result<Vec<Comparator>, _>>()?;
        Ok(Self::new(comparators))
    }
}

impl TryFrom<String> for Requirement {
    type Error = RequirementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Requirement> for String {
    fn from(requirement: Requirement) -> Self {
        requirement.to_string()
    }
}
