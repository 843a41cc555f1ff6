//! Span export error types.

use crate::output::OutputError;
use thiserror::Error;

/// Errors that can occur while exporting span counts.
#[derive(Debug, Error)]
pub enum SpanError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The aggregation request could not be sent or decoded.
    #[error("Span aggregation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Span aggregation returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The previous-month window could not be computed.
    #[error("Cannot compute aggregation window: {0}")]
    Window(String),

    /// Writing the export failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}
