//! Orchestrates a repository scan from listing to written report.

mod error;

pub use error::RunnerError;

use crate::config::ScanConfig;
use crate::contents::{fetch_file, list_tree, matching_files};
use crate::discovery::{filter_by_name, list_repositories, RepositoryDescriptor};
use crate::github::build_client;
use crate::rate_limit::log_core_rate_limit;
use crate::report::{render_markdown, Report, ReportEntry, RepositoryReport, MARKDOWN_CONTENT_TYPE};
use crate::summary::ScanSummary;
use chrono::Utc;
use octocrab::Octocrab;
use tracing::{debug, info, info_span, warn, Instrument};

/// Runs one scan over the repositories of a configured owner.
///
/// Every request is issued one at a time, in listing order.
pub struct ScanRunner {
    config: ScanConfig,
    octocrab: Octocrab,
    http: reqwest::Client,
}

impl ScanRunner {
    /// Builds a runner, authenticating with `token` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid or a client
    /// cannot be built.
    pub fn new(config: ScanConfig, token: Option<String>) -> Result<Self, RunnerError> {
        config.validate()?;
        Self::with_octocrab(config, build_client(token, None)?)
    }

    /// Builds a runner around an existing GitHub client.
    ///
    /// The client should come from [`build_client`]; one built with octocrab's
    /// defaults retries failed requests.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid or the upload
    /// client cannot be built.
    pub fn with_octocrab(config: ScanConfig, octocrab: Octocrab) -> Result<Self, RunnerError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            config,
            octocrab,
            http,
        })
    }

    /// Returns the configuration this runner scans with.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Executes the full scan and writes the report.
    ///
    /// Repositories and files that cannot be read are skipped and counted.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the listing fails or the report cannot be
    /// written.
    pub async fn run(&self) -> Result<ScanSummary, RunnerError> {
        let config = &self.config;
        let generated_at = Utc::now();
        let mut summary = ScanSummary::default();

        let repositories =
            list_repositories(&self.octocrab, &config.owner, config.request_timeout).await?;
        summary.repositories_listed = repositories.len();

        let repositories = filter_by_name(repositories, &config.name_filter);
        summary.repositories_matched = repositories.len();
        info!(
            owner = %config.owner,
            filter = %config.name_filter,
            listed = summary.repositories_listed,
            matched = summary.repositories_matched,
            "Filtered repositories"
        );

        if !repositories.is_empty() {
            let needed = u32::try_from(repositories.len().saturating_mul(2)).unwrap_or(u32::MAX);
            log_core_rate_limit(&self.octocrab, needed, config.request_timeout).await;
        }

        let mut report = Report {
            owner: config.owner.clone(),
            name_filter: config.name_filter.clone(),
            language: config.language.clone(),
            recommended: config.recommended,
            generated_at,
            repositories: Vec::with_capacity(repositories.len()),
        };

        for repository in repositories {
            let span = info_span!("scan_repository", repo = %repository.full_name);
            if let Some(scanned) = self
                .scan_repository(repository, &mut summary)
                .instrument(span)
                .await
            {
                report.repositories.push(scanned);
            }
        }

        summary.record_report(&report);

        let markdown = render_markdown(&report);
        config
            .output
            .write(&self.http, &markdown, MARKDOWN_CONTENT_TYPE)
            .await?;
        summary.output = config.output.to_string();

        info!(
            files = report.file_count(),
            outdated = report.outdated_count(),
            "Scan complete"
        );
        Ok(summary)
    }

    /// Scans the tracked files of one repository.
    ///
    /// Returns `None` when the tree cannot be listed.
    async fn scan_repository(
        &self,
        repository: RepositoryDescriptor,
        summary: &mut ScanSummary,
    ) -> Option<RepositoryReport> {
        let config = &self.config;
        let owner = repository.owner().to_string();
        let name = repository.name.clone();
        let branch = repository.default_branch.clone();

        let paths = match list_tree(
            &self.octocrab,
            &owner,
            &name,
            &branch,
            config.request_timeout,
        )
        .await
        {
            Ok(paths) => paths,
            Err(e) => {
                warn!(branch = %branch, error = %e, "Failed to list tree, skipping repository");
                summary.repositories_skipped += 1;
                return None;
            }
        };

        let files = matching_files(&name, &paths, &config.extensions);
        debug!(count = files.len(), "Tracked files");

        let mut scanned = RepositoryReport::new(repository);
        for file in files {
            match fetch_file(
                &self.octocrab,
                &owner,
                &name,
                &file.path,
                &branch,
                config.request_timeout,
            )
            .await
            {
                Ok(Some(content)) => {
                    summary.files_scanned += 1;
                    scanned.entries.push(ReportEntry::from_content(
                        file,
                        &content,
                        &config.language,
                        config.recommended,
                        &config.expected_modules,
                    ));
                }
                Ok(None) => {
                    warn!(path = %file.path, "File has no readable content, skipping");
                    summary.files_skipped += 1;
                }
                Err(e) => {
                    warn!(path = %file.path, error = %e, "Failed to fetch file, skipping");
                    summary.files_skipped += 1;
                }
            }
        }

        Some(scanned)
    }
}
