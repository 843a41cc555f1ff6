//! Repository scan configuration.

use super::ConfigError;
use crate::output::OutputTarget;
use crate::version::{ExpectedVersions, RuntimeVersion};
use std::path::PathBuf;
use std::time::Duration;

/// Default keyword repository names are filtered on.
pub const DEFAULT_NAME_FILTER: &str = "lambda";

/// Default report file.
pub const DEFAULT_OUTPUT_FILE: &str = "resultados.md";

/// Default scanned file suffix.
pub const DEFAULT_EXTENSION: &str = ".tf";

/// Default tracked language.
pub const DEFAULT_LANGUAGE: &str = "python";

/// Default recommended runtime version.
pub const DEFAULT_RECOMMENDED: RuntimeVersion = RuntimeVersion::new(3, 12);

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything a scan run needs, passed explicitly into each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// GitHub user or organization whose repositories are listed.
    pub owner: String,

    /// Keyword a repository name must contain (case-insensitive).
    pub name_filter: String,

    /// Where the Markdown report is written.
    pub output: OutputTarget,

    /// File suffixes that are scanned.
    pub extensions: Vec<String>,

    /// Language marker looked for in runtime labels.
    pub language: String,

    /// Minimum runtime version considered up to date.
    pub recommended: RuntimeVersion,

    /// Expected module versions keyed by origin.
    pub expected_modules: ExpectedVersions,

    /// Upper bound for each GitHub request.
    pub request_timeout: Duration,
}

impl ScanConfig {
    /// Creates a configuration for `owner` with default settings.
    #[must_use]
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name_filter: DEFAULT_NAME_FILTER.to_string(),
            output: OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_FILE)),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            language: DEFAULT_LANGUAGE.to_string(),
            recommended: DEFAULT_RECOMMENDED,
            expected_modules: ExpectedVersions::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(invalid("owner", "must not be empty"));
        }

        if self.owner.contains('/') {
            return Err(invalid("owner", "must be a user or organization name, not a path"));
        }

        if self.name_filter.trim().is_empty() {
            return Err(invalid("name-filter", "must not be empty"));
        }

        if self.extensions.is_empty() {
            return Err(invalid("extensions", "at least one extension is required"));
        }

        if let Some(ext) = self.extensions.iter().find(|ext| !ext.starts_with('.') || ext.len() < 2) {
            return Err(invalid(
                "extensions",
                format!("'{ext}' must start with '.' and name a suffix"),
            ));
        }

        if self.language.trim().is_empty() {
            return Err(invalid("language", "must not be empty"));
        }

        if self.expected_modules.iter().any(|(origin, _)| origin.trim().is_empty()) {
            return Err(invalid("module-versions", "origins must not be empty"));
        }

        if self.request_timeout.is_zero() {
            return Err(invalid("request-timeout-secs", "must be greater than zero"));
        }

        self.output.validate()
    }
}

pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::ModuleVersion;

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::new("acme");

        assert_eq!(config.name_filter, "lambda");
        assert_eq!(config.extensions, [".tf"]);
        assert_eq!(config.recommended, RuntimeVersion::new(3, 12));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_owner() {
        let config = ScanConfig::new(" ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { field: "owner", .. })
        ));
    }

    #[test]
    fn rejects_extension_without_dot() {
        let mut config = ScanConfig::new("acme");
        config.extensions = vec!["tf".to_string()];

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { field: "extensions", .. })
        ));
    }

    #[test]
    fn rejects_empty_module_origin() {
        let mut config = ScanConfig::new("acme");
        config
            .expected_modules
            .insert("", ModuleVersion::new(1, 0, 0));

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { field: "module-versions", .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = ScanConfig::new("acme");
        config.request_timeout = Duration::ZERO;

        assert!(config.validate().is_err());
    }
}
