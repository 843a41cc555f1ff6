//! Configuration loading and validation.
//!
//! A run is driven by an explicit [`ScanConfig`] or [`SpanExportConfig`].
//! Both can be read from an optional TOML settings file ([`ConfigFile`]) and
//! then overridden from the command line. Defaults scan `lambda`
//! repositories for `.tf` files against Python 3.12.

mod error;
mod file;
mod scan;
mod spans;

pub use error::ConfigError;
pub use file::ConfigFile;
pub use scan::{
    ScanConfig, DEFAULT_EXTENSION, DEFAULT_LANGUAGE, DEFAULT_NAME_FILTER, DEFAULT_OUTPUT_FILE,
    DEFAULT_RECOMMENDED, DEFAULT_REQUEST_TIMEOUT,
};
pub use spans::{
    SpanCredentials, SpanExportConfig, SpanWindow, API_KEY_ENV, APP_KEY_ENV, DEFAULT_FACET,
    DEFAULT_QUERY, DEFAULT_SITE, DEFAULT_SPANS_FILE,
};
