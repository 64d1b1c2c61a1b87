//! Four-part collection version numbers (`major.minor.patch.enums`).
//!
//! The trailing segment is not a build counter: it selects the enumerator
//! revision that schemas of this version resolve `msmEnums` directives
//! against.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version assumed for a collection that has never been migrated.
pub const INITIAL_VERSION: &str = "0.0.0.0";

/// A parsed `major.minor.patch.enums` version.
///
/// Ordering is lexicographic over the four segments, which is exactly the
/// derived ordering given the field order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub enums: u32,
}

impl VersionNumber {
    /// Build a version from its four segments.
    pub fn new(major: u32, minor: u32, patch: u32, enums: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            enums,
        }
    }

    /// Parse a version string, requiring exactly four integer segments.
    pub fn parse(value: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidVersion {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() != 4 {
            return Err(invalid("expected 4 dot-separated segments"));
        }

        let mut numbers = [0u32; 4];
        for (slot, segment) in numbers.iter_mut().zip(&segments) {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("segments must be non-negative integers"));
            }
            *slot = segment
                .parse()
                .map_err(|_| invalid("segment out of range"))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2], numbers[3]))
    }

    /// Enumerator revision bound to this version.
    pub fn enums_revision(&self) -> u32 {
        self.enums
    }

    /// `major.minor.patch`, used to locate schema files.
    pub fn short_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Whether this version is strictly newer than `other`.
    pub fn is_newer_than(&self, other: &VersionNumber) -> bool {
        self > other
    }
}

impl Default for VersionNumber {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.enums
        )
    }
}

impl FromStr for VersionNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionNumber {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<VersionNumber> for String {
    fn from(v: VersionNumber) -> Self {
        v.to_string()
    }
}

#[cfg(test)]
#[path = "version_number_test.rs"]
mod tests;
