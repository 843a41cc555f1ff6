//! Output error types.

use thiserror::Error;

/// Errors that can occur while writing a report or export.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to write a local file.
    #[error("Failed to write '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The upload request could not be sent.
    #[error("Failed to upload to '{url}': {source}")]
    UploadFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The blob store rejected the upload.
    #[error("Blob store rejected upload to '{url}' with status {status}")]
    UploadRejected { url: String, status: u16 },
}
