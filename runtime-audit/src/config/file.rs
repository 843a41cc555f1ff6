//! Settings file deserialization.

use super::{ConfigError, ScanConfig, SpanExportConfig};
use crate::output::OutputTarget;
use crate::version::{ExpectedVersions, ModuleVersion, RuntimeVersion};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Parsed contents of a `runtime-audit.toml` settings file.
///
/// Every scan setting is optional; unset values keep the defaults of
/// [`ScanConfig::new`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    /// GitHub user or organization whose repositories are listed.
    pub owner: Option<String>,

    /// Keyword a repository name must contain (case-insensitive).
    pub name_filter: Option<String>,

    /// Where the Markdown report is written.
    pub output: Option<OutputTarget>,

    /// File suffixes that are scanned (e.g. `.tf`).
    pub extensions: Option<Vec<String>>,

    /// Language marker looked for in runtime labels.
    pub language: Option<String>,

    /// Minimum runtime version considered up to date.
    pub recommended_version: Option<RuntimeVersion>,

    /// Per-request timeout for GitHub calls.
    pub request_timeout_secs: Option<u64>,

    /// Expected module versions keyed by origin.
    #[serde(default)]
    pub module_versions: BTreeMap<String, ModuleVersion>,

    /// Span export settings.
    pub spans: Option<SpanExportConfig>,
}

impl ConfigFile {
    /// Loads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config file");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Builds a scan configuration, preferring `owner` over the file's owner.
    ///
    /// The result is not validated; call [`ScanConfig::validate`] after
    /// applying any further overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOwner`] if neither source names an owner.
    pub fn scan_config(&self, owner: Option<String>) -> Result<ScanConfig, ConfigError> {
        let owner = owner
            .or_else(|| self.owner.clone())
            .ok_or(ConfigError::MissingOwner)?;

        let mut config = ScanConfig::new(owner);
        if let Some(filter) = &self.name_filter {
            config.name_filter = filter.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(extensions) = &self.extensions {
            config.extensions = extensions.clone();
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(recommended) = self.recommended_version {
            config.recommended = recommended;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.expected_modules = self
            .module_versions
            .iter()
            .map(|(origin, version)| (origin.clone(), *version))
            .collect::<ExpectedVersions>();

        Ok(config)
    }

    /// Returns the span export settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSpans`] if the file has no `[spans]` table.
    pub fn span_config(&self) -> Result<SpanExportConfig, ConfigError> {
        self.spans.clone().ok_or(ConfigError::MissingSpans)
    }
}
