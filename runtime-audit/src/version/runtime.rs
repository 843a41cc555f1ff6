//! Runtime label versions.

use super::VersionError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A `(major, minor)` language version.
///
/// Ordering is lexicographic on `(major, minor)`, so `3.9 < 3.10 < 4.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeVersion {
    /// Major version.
    pub major: u32,

    /// Minor version.
    pub minor: u32,
}

impl RuntimeVersion {
    /// Creates a version from its parts.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parses the version out of a runtime label for the given language.
    ///
    /// The grammar, matched ASCII case-insensitively:
    ///
    /// ```text
    /// label   := <anything> language version <anything>
    /// version := dotted | compact
    /// dotted  := NUM "." NUM ("." NUM)*      -> (first, second)
    /// compact := DIGIT DIGIT*                -> (first digit, remaining digits or 0)
    /// ```
    ///
    /// The version text is the longest run of digits and dots directly after
    /// the first occurrence of `language`, with trailing dots dropped. The
    /// compact form assumes single-digit majors, which holds for the tracked
    /// languages (`python312` is `3.12`, `python39` is `3.9`).
    ///
    /// Returns `None` when the label does not mention `language`, when no
    /// digits follow it, or when the version text is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use runtime_audit::RuntimeVersion;
    ///
    /// assert_eq!(RuntimeVersion::parse_label("python3.9", "python"), Some(RuntimeVersion::new(3, 9)));
    /// assert_eq!(RuntimeVersion::parse_label("python312", "python"), Some(RuntimeVersion::new(3, 12)));
    /// assert_eq!(RuntimeVersion::parse_label("nodejs18.x", "python"), None);
    /// ```
    #[must_use]
    pub fn parse_label(label: &str, language: &str) -> Option<Self> {
        if language.is_empty() {
            return None;
        }

        let lowered = label.to_ascii_lowercase();
        let start = lowered.find(&language.to_ascii_lowercase())? + language.len();
        let rest = &lowered[start..];

        let end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let text = rest[..end].trim_end_matches('.');

        if text.is_empty() || text.starts_with('.') {
            return None;
        }

        if text.contains('.') {
            parse_dotted(text)
        } else {
            parse_compact(text)
        }
    }
}

/// `N.N(.N)*`, keeping the first two components.
fn parse_dotted(text: &str) -> Option<RuntimeVersion> {
    let mut parts = text.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;

    // Remaining components only need to be well formed.
    if parts.any(|part| part.is_empty()) {
        return None;
    }

    Some(RuntimeVersion::new(major, minor))
}

/// Single-digit major followed by the minor.
fn parse_compact(text: &str) -> Option<RuntimeVersion> {
    let (major, minor) = text.split_at(1);
    let major = major.parse().ok()?;
    let minor = if minor.is_empty() {
        0
    } else {
        minor.parse().ok()?
    };

    Some(RuntimeVersion::new(major, minor))
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for RuntimeVersion {
    type Err = VersionError;

    /// Parses a bare `MAJOR.MINOR` string, as used in configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidRuntime(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(invalid)?;

        Ok(Self::new(
            major.parse().map_err(|_| invalid())?,
            minor.parse().map_err(|_| invalid())?,
        ))
    }
}

impl Serialize for RuntimeVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RuntimeVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
