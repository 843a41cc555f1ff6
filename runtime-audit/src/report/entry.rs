//! Per-file and per-repository findings.

use crate::contents::FileMatch;
use crate::discovery::RepositoryDescriptor;
use crate::extract::{extract_runtimes, extract_sources, RuntimeDeclaration, SourceDeclaration};
use crate::version::{ExpectedVersions, RuntimeVersion};
use serde::Serialize;

/// Findings for one tracked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// The scanned file.
    pub file: FileMatch,

    /// Runtime declarations, in document order.
    pub runtimes: Vec<RuntimeDeclaration>,

    /// Git module sources, in document order.
    pub sources: Vec<SourceDeclaration>,

    /// True when any runtime or source in the file is outdated.
    pub outdated: bool,
}

impl ReportEntry {
    /// Builds an entry from extracted declarations.
    #[must_use]
    pub fn new(
        file: FileMatch,
        runtimes: Vec<RuntimeDeclaration>,
        sources: Vec<SourceDeclaration>,
        recommended: RuntimeVersion,
    ) -> Self {
        let outdated = runtimes
            .iter()
            .any(|runtime| runtime.status(recommended).is_outdated())
            || sources.iter().any(|source| source.status().is_outdated());

        Self {
            file,
            runtimes,
            sources,
            outdated,
        }
    }

    /// Extracts declarations from `content` and builds the entry.
    #[must_use]
    pub fn from_content(
        file: FileMatch,
        content: &str,
        language: &str,
        recommended: RuntimeVersion,
        expected: &ExpectedVersions,
    ) -> Self {
        Self::new(
            file,
            extract_runtimes(content, language),
            extract_sources(content, expected),
            recommended,
        )
    }

    /// Returns true when the file declares nothing of interest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty() && self.sources.is_empty()
    }

    /// Number of outdated runtime declarations.
    #[must_use]
    pub fn outdated_runtimes(&self, recommended: RuntimeVersion) -> usize {
        self.runtimes
            .iter()
            .filter(|runtime| runtime.status(recommended).is_outdated())
            .count()
    }

    /// Number of outdated module sources.
    #[must_use]
    pub fn outdated_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|source| source.status().is_outdated())
            .count()
    }
}

/// Findings for one matched repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryReport {
    /// The repository as listed.
    pub repository: RepositoryDescriptor,

    /// One entry per tracked file that could be read.
    pub entries: Vec<ReportEntry>,
}

impl RepositoryReport {
    /// Creates a report with no entries yet.
    #[must_use]
    pub fn new(repository: RepositoryDescriptor) -> Self {
        Self {
            repository,
            entries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::ModuleVersion;

    fn file() -> FileMatch {
        FileMatch {
            repository: "orders-lambda".to_string(),
            path: "main.tf".to_string(),
        }
    }

    #[test]
    fn outdated_runtime_marks_entry() {
        let entry = ReportEntry::from_content(
            file(),
            r#"runtime = "python3.9""#,
            "python",
            RuntimeVersion::new(3, 12),
            &ExpectedVersions::new(),
        );

        assert!(entry.outdated);
        assert_eq!(entry.outdated_runtimes(RuntimeVersion::new(3, 12)), 1);
    }

    #[test]
    fn outdated_source_marks_entry() {
        let mut expected = ExpectedVersions::new();
        expected.insert("github.com/acme/modules", ModuleVersion::new(4, 0, 0));

        let entry = ReportEntry::from_content(
            file(),
            r#"source = "git::https://github.com/acme/modules.git?ref=v3.0.0""#,
            "python",
            RuntimeVersion::new(3, 12),
            &expected,
        );

        assert!(entry.outdated);
        assert_eq!(entry.outdated_sources(), 1);
    }

    #[test]
    fn current_and_foreign_runtimes_are_not_outdated() {
        let entry = ReportEntry::from_content(
            file(),
            "runtime = \"python3.12\"\nruntime = \"nodejs18.x\"\n",
            "python",
            RuntimeVersion::new(3, 12),
            &ExpectedVersions::new(),
        );

        assert!(!entry.outdated);
        assert!(!entry.is_empty());
    }

    #[test]
    fn empty_file_has_no_declarations() {
        let entry = ReportEntry::from_content(
            file(),
            "",
            "python",
            RuntimeVersion::new(3, 12),
            &ExpectedVersions::new(),
        );

        assert!(entry.is_empty());
        assert!(!entry.outdated);
    }
}
