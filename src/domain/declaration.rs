//! Swift Package Manager requirement declarations
//!
//! Handles the declaration forms found in `Package.swift`:
//! - Up to next major: `from: "1.2.3"`, `.upToNextMajor(from: "1.2.3")`
//! - Up to next minor: `.upToNextMinor(from: "1.2.3")`
//! - Closed range: `"1.2.3"..."2.0.0"`
//! - Half-open range: `"1.2.3"..<"2.0.0"`
//! - Exact: `exact: "1.2.3"`, `.exact("1.2.3")`
//!
//! Rewrites substitute the bound that needs to move inside the author's
//! text, so quoting, wrappers and whitespace survive untouched.

use super::{Comparator, Requirement, Version};
use crate::error::RequirementError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const FROM_PREFIX: &str = "from:";
const UP_TO_NEXT_MAJOR_PREFIX: &str = ".upToNextMajor(from:";
const UP_TO_NEXT_MINOR_PREFIX: &str = ".upToNextMinor(from:";
const EXACT_LABEL_PREFIX: &str = "exact:";
const EXACT_CALL_PREFIX: &str = ".exact(";
const CLOSED_RANGE_SEPARATOR: &str = "...";
const HALF_OPEN_RANGE_SEPARATOR: &str = "..<";

/// The syntactic family of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// `from: "1.2.3"` or `.upToNextMajor(from: "1.2.3")`
    UpToNextMajor,
    /// `.upToNextMinor(from: "1.2.3")`
    UpToNextMinor,
    /// `"1.2.3"..."2.0.0"`
    InclusiveRange,
    /// `"1.2.3"..<"2.0.0"`
    ExclusiveRange,
    /// `exact: "1.2.3"` or `.exact("1.2.3")`
    Exact,
}

fn is_up_to_next_major(raw: &str) -> bool {
    raw.starts_with(FROM_PREFIX) || raw.starts_with(UP_TO_NEXT_MAJOR_PREFIX)
}

fn is_up_to_next_minor(raw: &str) -> bool {
    raw.starts_with(UP_TO_NEXT_MINOR_PREFIX)
}

fn is_inclusive_range(raw: &str) -> bool {
    raw.contains(CLOSED_RANGE_SEPARATOR)
}

fn is_exclusive_range(raw: &str) -> bool {
    raw.contains(HALF_OPEN_RANGE_SEPARATOR)
}

fn is_exact(raw: &str) -> bool {
    raw.starts_with(EXACT_CALL_PREFIX) || raw.starts_with(EXACT_LABEL_PREFIX)
}

/// Form probes in precedence order. The probes overlap (a range bound may
/// itself look like anything), so the first match wins and this table is the
/// only place that precedence is defined.
static CLASSIFIERS: [(fn(&str) -> bool, DeclarationKind); 5] = [
    (is_up_to_next_major, DeclarationKind::UpToNextMajor),
    (is_up_to_next_minor, DeclarationKind::UpToNextMinor),
    (is_inclusive_range, DeclarationKind::InclusiveRange),
    (is_exclusive_range, DeclarationKind::ExclusiveRange),
    (is_exact, DeclarationKind::Exact),
];

impl DeclarationKind {
    /// Classifies a raw declaration, or returns None if no form matches
    pub fn classify(raw: &str) -> Option<Self> {
        CLASSIFIERS
            .iter()
            .find(|(probe, _)| probe(raw))
            .map(|(_, kind)| *kind)
    }

    /// Returns true if this kind pins a single version
    pub fn is_pinned(&self) -> bool {
        matches!(self, DeclarationKind::Exact)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclarationKind::UpToNextMajor => "up to next major",
            DeclarationKind::UpToNextMinor => "up to next minor",
            DeclarationKind::InclusiveRange => "inclusive range",
            DeclarationKind::ExclusiveRange => "exclusive range",
            DeclarationKind::Exact => "exact",
        };
        f.write_str(name)
    }
}

/// A raw requirement declaration together with its parsed constraint
///
/// `min` and `max` are the literal substrings taken from `raw` (without
/// quotes). For the up-to-next forms `max` is derived, since it does not
/// appear in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Declaration {
    raw: String,
    kind: DeclarationKind,
    min: String,
    max: String,
    requirement: Requirement,
}

impl Declaration {
    /// Parses a declaration in one of the supported forms
    pub fn parse(raw: &str) -> Result<Self, RequirementError> {
        let kind = DeclarationKind::classify(raw)
            .ok_or_else(|| RequirementError::unsupported_constraint(raw))?;

        let (min, max, requirement) = match kind {
            DeclarationKind::UpToNextMajor => {
                let inner = raw.strip_prefix(FROM_PREFIX).unwrap_or(raw);
                let min = unquote(delete_around(inner, UP_TO_NEXT_MAJOR_PREFIX, ")").trim());
                let lower = Version::parse(min)?;
                let upper = lower.bump_major()?;
                let max = upper.to_string();
                let requirement =
                    Requirement::new(vec![Comparator::gte(lower), Comparator::lt(upper)]);
                (min.to_string(), max, requirement)
            }
            DeclarationKind::UpToNextMinor => {
                let min = unquote(delete_around(raw, UP_TO_NEXT_MINOR_PREFIX, ")").trim());
                let lower = Version::parse(min)?;
                let upper = lower.bump_minor()?;
                let max = upper.to_string();
                let requirement =
                    Requirement::new(vec![Comparator::gte(lower), Comparator::lt(upper)]);
                (min.to_string(), max, requirement)
            }
            DeclarationKind::InclusiveRange => {
                let (min, max) = split_range(raw, CLOSED_RANGE_SEPARATOR);
                let requirement = Requirement::new(vec![
                    Comparator::gte(Version::parse(min)?),
                    Comparator::lte(Version::parse(max)?),
                ]);
                (min.to_string(), max.to_string(), requirement)
            }
            DeclarationKind::ExclusiveRange => {
                let (min, max) = split_range(raw, HALF_OPEN_RANGE_SEPARATOR);
                let requirement = Requirement::new(vec![
                    Comparator::gte(Version::parse(min)?),
                    Comparator::lt(Version::parse(max)?),
                ]);
                (min.to_string(), max.to_string(), requirement)
            }
            DeclarationKind::Exact => {
                let inner = raw.strip_prefix(EXACT_LABEL_PREFIX).unwrap_or(raw);
                let min = unquote(delete_around(inner, EXACT_CALL_PREFIX, ")").trim());
                let requirement = Requirement::new(vec![Comparator::exact(Version::parse(min)?)]);
                (min.to_string(), min.to_string(), requirement)
            }
        };

        debug!(declaration = raw, %kind, %requirement, "parsed declaration");

        Ok(Self {
            raw: raw.to_string(),
            kind,
            min,
            max,
            requirement,
        })
    }

    /// Builds the closed range `"<current>"..."<latest>"`, used to unlock a
    /// requirement before resolution
    pub fn unlocked_range(current: &Version, latest: &Version) -> Result<Self, RequirementError> {
        Self::parse(&format!("\"{}\"...\"{}\"", current, latest))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn min(&self) -> &str {
        &self.min
    }

    pub fn max(&self) -> &str {
        &self.max
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Returns this declaration if it already admits `target`, otherwise
    /// the rewritten declaration
    pub fn bump_to_satisfy(&self, target: &Version) -> Result<Self, RequirementError> {
        if self.requirement.satisfied_by(target) {
            debug!(declaration = %self.raw, target_version = %target, "declaration already satisfied");
            return Ok(self.clone());
        }
        self.update(target)
    }

    /// Rewrites the declaration towards `target` regardless of whether the
    /// current requirement already admits it
    pub fn update(&self, target: &Version) -> Result<Self, RequirementError> {
        let rendered = target.to_string();
        let (from, to) = match self.kind {
            DeclarationKind::UpToNextMajor => {
                let to = if self.min.ends_with(".0.0") {
                    format!("{}.0.0", target.major())
                } else {
                    rendered
                };
                (&self.min, to)
            }
            DeclarationKind::UpToNextMinor => {
                let to = if self.min.ends_with(".0") {
                    format!("{}.{}.0", target.major(), target.minor())
                } else {
                    rendered
                };
                (&self.min, to)
            }
            DeclarationKind::InclusiveRange => (&self.max, rendered),
            DeclarationKind::ExclusiveRange => (&self.max, target.bump_major()?.to_string()),
            DeclarationKind::Exact => (&self.min, rendered),
        };

        let new_raw = self.raw.replacen(from.as_str(), &to, 1);
        debug!(old = %self.raw, new = %new_raw, target_version = %target, "rewrote declaration");
        Self::parse(&new_raw)
    }
}

fn delete_around<'a>(s: &'a str, prefix: &str, suffix: &str) -> &'a str {
    let s = s.strip_prefix(prefix).unwrap_or(s);
    s.strip_suffix(suffix).unwrap_or(s)
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

fn split_range<'a>(raw: &'a str, separator: &str) -> (&'a str, &'a str) {
    let (left, right) = raw.split_once(separator).unwrap_or((raw, ""));
    (unquote(left.trim()), unquote(right.trim()))
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Declaration {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Declaration {
    type Error = RequirementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Declaration> for String {
    fn from(declaration: Declaration) -> Self {
        declaration.raw
    }
}
