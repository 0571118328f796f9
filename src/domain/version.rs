//! Numeric dot-separated version values
//!
//! A version is a non-empty sequence of unsigned integer segments
//! (`1`, `1.2`, `1.2.3`, ...). Comparison pads the shorter sequence with
//! zeros, so `1.2` and `1.2.0` are equal.

use crate::error::RequirementError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A parsed version with the segment count of its source text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    /// Parses a version such as `1.2.3`
    pub fn parse(s: &str) -> Result<Self, RequirementError> {
        if s.is_empty() {
            return Err(RequirementError::malformed_version(s));
        }

        let segments = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(RequirementError::malformed_version(s));
                }
                part.parse::<u64>().map_err(|_| RequirementError::malformed_version(s))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Builds a version directly from segments; `segments` must not be empty
    pub(crate) fn from_segments(segments: Vec<u64>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    /// Returns the i-th segment, or 0 if absent
    pub fn segment(&self, i: usize) -> u64 {
        self.segments.get(i).copied().unwrap_or(0)
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    pub fn patch(&self) -> u64 {
        self.segment(2)
    }

    /// Increments the first segment and zeroes the rest, keeping the segment count
    pub fn bump_major(&self) -> Result<Self, RequirementError> {
        self.bump_segment(0)
    }

    /// Increments the second segment and zeroes the rest, keeping the segment count
    ///
    /// A single-segment version has no minor segment and is returned as is.
    pub fn bump_minor(&self) -> Result<Self, RequirementError> {
        self.bump_segment(1)
    }

    /// Fails with `MalformedVersion` when the segment is already `u64::MAX`
    fn bump_segment(&self, index: usize) -> Result<Self, RequirementError> {
        let Some(current) = self.segments.get(index) else {
            return Ok(self.clone());
        };
        let bumped = current
            .checked_add(1)
            .ok_or_else(|| RequirementError::malformed_version(self.to_string()))?;

        let segments = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, s)| match i.cmp(&index) {
                Ordering::Less => *s,
                Ordering::Equal => bumped,
                Ordering::Greater => 0,
            })
            .collect();
        Ok(Self { segments })
    }

    fn significant_segments(&self) -> &[u64] {
        let len = self
            .segments
            .iter()
            .rposition(|s| *s != 0)
            .map_or(0, |i| i + 1);
        &self.segments[..len]
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Trailing zeros do not affect equality
        self.significant_segments().hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = RequirementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_three_segments() {
        let version = v("1.2.3");
        assert_eq!(version.segments(), &[1, 2, 3]);
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(
            Version::parse(""),
            Err(RequirementError::malformed_version(""))
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_segment() {
        assert!(Version::parse("1.x.0").is_err());
        assert!(Version::parse("v1.0.0").is_err());
        assert!(Version::parse("1.0.0-beta").is_err());
        assert!(Version::parse("1..0").is_err());
        assert!(Version::parse("1.0.").is_err());
        assert!(Version::parse(" 1.0").is_err());
    }

    #[test]
    fn test_segment_out_of_range_is_zero() {
        let version = v("4");
        assert_eq!(version.segment(0), 4);
        assert_eq!(version.segment(1), 0);
        assert_eq!(version.segment(7), 0);
    }

    #[test]
    fn test_compare_simple() {
        assert_eq!(v("1.0.0").cmp(&v("2.0.0")), Ordering::Less);
        assert_eq!(v("2.0.0").cmp(&v("1.0.0")), Ordering::Greater);
        assert_eq!(v("1.9.0").cmp(&v("1.10.0")), Ordering::Less);
    }

    #[test]
    fn test_compare_pads_missing_segments() {
        assert_eq!(v("1.2").cmp(&v("1.2.0")), Ordering::Equal);
        assert_eq!(v("1.2"), v("1.2.0.0"));
        assert!(v("1.2") < v("1.2.1"));
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(v("1.2"));
        assert!(set.contains(&v("1.2.0")));
    }

    #[test]
    fn test_display_preserves_segment_count() {
        assert_eq!(v("1.2").to_string(), "1.2");
        assert_eq!(v("1.2.3").to_string(), "1.2.3");
    }

    #[test]
    fn test_bump_major() {
        assert_eq!(v("1.2.3").bump_major().unwrap().to_string(), "2.0.0");
        assert_eq!(v("1.2").bump_major().unwrap().to_string(), "2.0");
        assert_eq!(v("9").bump_major().unwrap().to_string(), "10");
    }

    #[test]
    fn test_bump_minor() {
        assert_eq!(v("1.2.3").bump_minor().unwrap().to_string(), "1.3.0");
        assert_eq!(v("1.2").bump_minor().unwrap().to_string(), "1.3");
        assert_eq!(v("1").bump_minor().unwrap().to_string(), "1");
    }

    #[test]
    fn test_bump_overflowing_segment_fails() {
        let max = u64::MAX.to_string();
        let major = v(&format!("{}.0.0", max));
        assert_eq!(
            major.bump_major(),
            Err(RequirementError::malformed_version(format!("{}.0.0", max)))
        );

        let minor = v(&format!("1.{}.0", max));
        assert!(minor.bump_minor().is_err());
        assert_eq!(minor.bump_major().unwrap().to_string(), "2.0.0");
    }

    #[test]
    fn test_version_sorting() {
        let mut versions = vec![v("2.0.0"), v("1.0.0"), v("1.5"), v("1.0.1")];
        versions.sort();
        let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["1.0.0", "1.0.1", "1.5", "2.0.0"]);
    }

    #[test]
    fn test_serde_version() {
        let json = serde_json::to_string(&v("1.2.3")).unwrap();
        assert_eq!(json, "\"1.2.3\"");
        let parsed: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v("1.2.3"));
        assert!(serde_json::from_str::<Version>("\"one\"").is_err());
    }
}
