//! Expected module versions keyed by source origin.

use super::ModuleVersion;
use std::collections::BTreeMap;

/// Maps module origins (for example `github.com/acme/terraform-modules`) to
/// the version every reference to that origin should pin.
///
/// An origin matches a source URL when it is a substring of it. When several
/// origins match, the longest one wins; equal lengths fall back to the
/// lexicographically smallest origin. The result never depends on insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedVersions {
    origins: BTreeMap<String, ModuleVersion>,
}

impl ExpectedVersions {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the expected version for an origin.
    pub fn insert(&mut self, origin: impl Into<String>, version: ModuleVersion) {
        self.origins.insert(origin.into(), version);
    }

    /// Returns the expected version for `url`, if any origin matches.
    #[must_use]
    pub fn lookup(&self, url: &str) -> Option<ModuleVersion> {
        self.origins
            .iter()
            .filter(|(origin, _)| url.contains(origin.as_str()))
            // BTreeMap yields ascending keys, so `max_by_key` keeping the last
            // maximum would prefer the larger key; reverse to keep the smallest.
            .rev()
            .max_by_key(|(origin, _)| origin.len())
            .map(|(_, version)| *version)
    }

    /// Number of configured origins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Returns true when no origins are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Iterates origins in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ModuleVersion)> {
        self.origins
            .iter()
            .map(|(origin, version)| (origin.as_str(), *version))
    }
}

impl FromIterator<(String, ModuleVersion)> for ExpectedVersions {
    fn from_iter<T: IntoIterator<Item = (String, ModuleVersion)>>(iter: T) -> Self {
        Self {
            origins: iter.into_iter().collect(),
        }
    }
}
