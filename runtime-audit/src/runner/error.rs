//! Runner error types.

/// Errors that abort a scan run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// HTTP client initialization errors.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    /// The repository listing failed.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),

    /// The report could not be written.
    #[error(transparent)]
    Output(#[from] crate::output::OutputError),
}
