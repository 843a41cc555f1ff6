//! Listed repository information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a repository as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// Web URL of the repository.
    pub html_url: String,

    /// Free-form description, if set.
    #[serde(default)]
    pub description: Option<String>,

    /// Default branch name (e.g., "main").
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Time of the last update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_branch() -> String {
    "main".to_string()
}

impl RepositoryDescriptor {
    /// Owner login, taken from `full_name`.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.full_name
            .split_once('/')
            .map_or(self.full_name.as_str(), |(owner, _)| owner)
    }

    /// Returns true if the name contains `keyword`, ignoring case.
    #[must_use]
    pub fn name_matches(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(&keyword.to_lowercase())
    }
}
