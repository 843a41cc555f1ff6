//! `source = "git::..."` module references.

use crate::version::{ExpectedVersions, ModuleStatus, ModuleVersion};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Matches `source = "git::<url>"`.
static SOURCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"source\s*=\s*"git::([^"]+)""#).expect("SOURCE_REGEX must compile")
});

/// Matches the `ref=vX.Y.Z` tag inside a source URL.
static REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ref=(v\d+\.\d+\.\d+)").expect("REF_REGEX must compile"));

/// A pinned external module reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDeclaration {
    /// Module URL without the `git::` prefix, including any query.
    pub url: String,

    /// Version from the `ref=` tag, if present.
    pub current: Option<ModuleVersion>,

    /// Version expected for the URL's origin, if one is configured.
    pub expected: Option<ModuleVersion>,
}

impl SourceDeclaration {
    /// Builds a declaration from a source URL, reading its ref tag and
    /// resolving the expected version.
    #[must_use]
    pub fn new(url: impl Into<String>, expected: &ExpectedVersions) -> Self {
        let url = url.into();
        let current = REF_REGEX
            .captures(&url)
            .and_then(|captures| captures[1].parse().ok());
        let expected = expected.lookup(&url);

        Self {
            url,
            current,
            expected,
        }
    }

    /// Compares the pinned ref against the expected version.
    #[must_use]
    pub fn status(&self) -> ModuleStatus {
        ModuleStatus::classify(self.current, self.expected)
    }
}

/// Extracts every git module source from `content`, in document order.
#[must_use]
pub fn extract_sources(content: &str, expected: &ExpectedVersions) -> Vec<SourceDeclaration> {
    SOURCE_REGEX
        .captures_iter(content)
        .map(|captures| SourceDeclaration::new(&captures[1], expected))
        .collect()
}
