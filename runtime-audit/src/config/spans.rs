//! Span export configuration.

use super::scan::invalid;
use super::ConfigError;
use crate::output::OutputTarget;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default Datadog API host.
pub const DEFAULT_SITE: &str = "https://api.datadoghq.com";

/// Default span query.
pub const DEFAULT_QUERY: &str = "service:(meu_app OR app) @http.status_code:*";

/// Default grouping facet.
pub const DEFAULT_FACET: &str = "@http.status_code";

/// Default span export file.
pub const DEFAULT_SPANS_FILE: &str = "status_codes.txt";

/// Environment variable holding the Datadog API key.
pub const API_KEY_ENV: &str = "DD_API_KEY";

/// Environment variable holding the Datadog application key.
pub const APP_KEY_ENV: &str = "DD_APP_KEY";

/// Time window a span aggregation covers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SpanWindow {
    /// Datadog relative expressions such as `now-2w` .. `now`.
    Relative { from: String, to: String },

    /// From one month ago to today, both at `hour`:00:00 UTC.
    PreviousMonth {
        #[serde(default = "default_hour")]
        hour: u32,
    },
}

fn default_hour() -> u32 {
    3
}

impl Default for SpanWindow {
    fn default() -> Self {
        Self::Relative {
            from: "now-2w".to_string(),
            to: "now".to_string(),
        }
    }
}

/// Settings for one span aggregation export.
///
/// When `output` is a blob URL it is treated as a prefix: each export is
/// uploaded to `<url>/datadog_spans/spans_<timestamp>.txt`. A file output is
/// overwritten in place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SpanExportConfig {
    /// API host, e.g. `https://api.datadoghq.eu`.
    #[serde(default = "default_site")]
    pub site: Url,

    /// Span search query.
    #[serde(default = "default_query")]
    pub query: String,

    /// Facet to group counts by; `None` yields totals only.
    #[serde(default = "default_facet")]
    pub facet: Option<String>,

    /// Count all matching spans without grouping, ignoring `facet`.
    #[serde(default)]
    pub totals: bool,

    /// Aggregation window.
    #[serde(default)]
    pub window: SpanWindow,

    /// Export destination.
    #[serde(default = "default_output")]
    pub output: OutputTarget,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_site() -> Url {
    Url::parse(DEFAULT_SITE).expect("DEFAULT_SITE must be a valid URL")
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_facet() -> Option<String> {
    Some(DEFAULT_FACET.to_string())
}

fn default_output() -> OutputTarget {
    OutputTarget::File(PathBuf::from(DEFAULT_SPANS_FILE))
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SpanExportConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
            query: default_query(),
            facet: default_facet(),
            totals: false,
            window: SpanWindow::default(),
            output: default_output(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SpanExportConfig {
    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Facet counts are grouped by, or `None` for a totals-only export.
    #[must_use]
    pub fn group_by(&self) -> Option<&str> {
        if self.totals {
            None
        } else {
            self.facet.as_deref()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.site.scheme(), "http" | "https") {
            return Err(invalid("site", "must be an http or https URL"));
        }

        if self.query.trim().is_empty() {
            return Err(invalid("query", "must not be empty"));
        }

        if matches!(&self.facet, Some(facet) if facet.trim().is_empty()) {
            return Err(invalid("facet", "must not be empty when set"));
        }

        if let SpanWindow::PreviousMonth { hour } = self.window {
            if hour > 23 {
                return Err(invalid("window", format!("hour {hour} is out of range")));
            }
        }

        if self.timeout_secs == 0 {
            return Err(invalid("timeout-secs", "must be greater than zero"));
        }

        self.output.validate()
    }
}

/// Datadog API credentials.
#[derive(Clone)]
pub struct SpanCredentials {
    /// Value of the `DD-API-KEY` header.
    pub api_key: String,

    /// Value of the `DD-APPLICATION-KEY` header.
    pub app_key: String,
}

impl SpanCredentials {
    /// Reads credentials from `DD_API_KEY` and `DD_APP_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] for the first unset or empty variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: read_env(API_KEY_ENV)?,
            app_key: read_env(APP_KEY_ENV)?,
        })
    }
}

// Keys never show up in logs.
impl std::fmt::Debug for SpanCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanCredentials")
            .field("api_key", &"<redacted>")
            .field("app_key", &"<redacted>")
            .finish()
    }
}

fn read_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv { name }),
    }
}
