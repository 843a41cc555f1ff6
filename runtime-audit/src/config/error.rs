//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting holds an unusable value.
    #[error("Invalid value for '{field}': {message}")]
    ValidationError { field: &'static str, message: String },

    /// No account to scan was given on the command line or in the file.
    #[error("No owner configured; pass --owner or set 'owner' in the config file")]
    MissingOwner,

    /// No span export settings were given.
    #[error("No [spans] table in the config file")]
    MissingSpans,

    /// A required environment variable is not set.
    #[error("Environment variable {name} is not set")]
    MissingEnv { name: &'static str },
}
