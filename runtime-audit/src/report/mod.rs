//! Report model and rendering.

mod entry;
mod renderer;

pub use entry::{ReportEntry, RepositoryReport};
pub use renderer::render_markdown;

use crate::version::RuntimeVersion;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Content type used when a report is uploaded.
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Everything found in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Account whose repositories were listed.
    pub owner: String,

    /// Keyword repositories were filtered on.
    pub name_filter: String,

    /// Tracked runtime language.
    pub language: String,

    /// Runtime version below which declarations are outdated.
    pub recommended: RuntimeVersion,

    /// When the run started.
    pub generated_at: DateTime<Utc>,

    /// Matched repositories, in listing order.
    pub repositories: Vec<RepositoryReport>,
}

impl Report {
    /// Number of files with an entry.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.repositories.iter().map(|repo| repo.entries.len()).sum()
    }

    /// Number of outdated runtime and module declarations.
    #[must_use]
    pub fn outdated_count(&self) -> usize {
        self.entries()
            .map(|entry| entry.outdated_runtimes(self.recommended) + entry.outdated_sources())
            .sum()
    }

    /// Iterates all entries across repositories.
    pub fn entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.repositories.iter().flat_map(|repo| repo.entries.iter())
    }
}
