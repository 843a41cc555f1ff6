//! Scan run summary.

use crate::report::Report;
use serde::Serialize;

/// Counters for a complete scan run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Repositories returned by the listing.
    pub repositories_listed: usize,

    /// Repositories whose name matched the filter.
    pub repositories_matched: usize,

    /// Matched repositories whose file tree could not be read.
    pub repositories_skipped: usize,

    /// Tracked files whose content was read and analysed.
    pub files_scanned: usize,

    /// Tracked files that could not be fetched or decoded.
    pub files_skipped: usize,

    /// Runtime declarations below the recommended version.
    pub runtimes_outdated: usize,

    /// Module sources pinned to an unexpected version.
    pub sources_outdated: usize,

    /// Where the report was written.
    pub output: String,
}

impl ScanSummary {
    /// Fills the outdated counters from a finished report.
    pub fn record_report(&mut self, report: &Report) {
        self.runtimes_outdated = report
            .entries()
            .map(|entry| entry.outdated_runtimes(report.recommended))
            .sum();
        self.sources_outdated = report.entries().map(|entry| entry.outdated_sources()).sum();
    }

    /// Returns true if anything outdated was found.
    #[must_use]
    pub fn has_outdated(&self) -> bool {
        self.runtimes_outdated > 0 || self.sources_outdated > 0
    }

    /// Returns true if any repository or file was skipped.
    #[must_use]
    pub fn has_skips(&self) -> bool {
        self.repositories_skipped > 0 || self.files_skipped > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contents::FileMatch;
    use crate::discovery::RepositoryDescriptor;
    use crate::report::{ReportEntry, RepositoryReport};
    use crate::version::{ExpectedVersions, RuntimeVersion};
    use chrono::Utc;

    #[test]
    fn can_record_report() {
        let repository = RepositoryDescriptor {
            name: "orders-lambda".to_string(),
            full_name: "acme/orders-lambda".to_string(),
            html_url: "https://github.com/acme/orders-lambda".to_string(),
            description: None,
            default_branch: "main".to_string(),
            updated_at: None,
        };
        let mut repo = RepositoryReport::new(repository);
        repo.entries.push(ReportEntry::from_content(
            FileMatch {
                repository: "orders-lambda".to_string(),
                path: "main.tf".to_string(),
            },
            "runtime = \"python3.8\"\nruntime = \"python3.9\"\nruntime = \"python3.13\"\n",
            "python",
            RuntimeVersion::new(3, 12),
            &ExpectedVersions::new(),
        ));
        let report = Report {
            owner: "acme".to_string(),
            name_filter: "lambda".to_string(),
            language: "python".to_string(),
            recommended: RuntimeVersion::new(3, 12),
            generated_at: Utc::now(),
            repositories: vec![repo],
        };

        let mut summary = ScanSummary::default();
        summary.record_report(&report);

        assert_eq!(summary.runtimes_outdated, 2);
        assert_eq!(summary.sources_outdated, 0);
        assert!(summary.has_outdated());
        assert!(!summary.has_skips());
    }
}
