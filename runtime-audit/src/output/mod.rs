//! Report destinations.
//!
//! Output is either a local file, overwritten unconditionally, or an object
//! uploaded with a single HTTP `PUT` (pre-signed or otherwise writable blob
//! store URL).

mod error;

pub use error::OutputError;

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// A local file path.
    File(PathBuf),

    /// A blob store object URL.
    Blob(Url),
}

impl OutputTarget {
    /// Checks that the target is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for an empty path or a
    /// non-http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::File(path) if path.as_os_str().is_empty() => {
                Err(ConfigError::ValidationError {
                    field: "output",
                    message: "file path must not be empty".to_string(),
                })
            }
            Self::Blob(url) if !matches!(url.scheme(), "http" | "https") => {
                Err(ConfigError::ValidationError {
                    field: "output",
                    message: format!("blob URL must use http or https: {url}"),
                })
            }
            _ => Ok(()),
        }
    }

    /// Returns the blob target for `key` under this prefix URL.
    ///
    /// File targets are returned unchanged.
    #[must_use]
    pub fn with_key(&self, key: &str) -> Self {
        match self {
            Self::File(path) => Self::File(path.clone()),
            Self::Blob(prefix) => {
                let mut base = prefix.clone();
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                // `key` is a relative path, so joining cannot fail on an http(s) base.
                Self::Blob(base.join(key).unwrap_or(base))
            }
        }
    }

    /// Writes `body`, replacing whatever is at the target.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the file cannot be written or the upload fails.
    pub async fn write(
        &self,
        client: &reqwest::Client,
        body: &str,
        content_type: &str,
    ) -> Result<(), OutputError> {
        match self {
            Self::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| OutputError::IoError {
                            path: parent.display().to_string(),
                            source: e,
                        })?;
                }

                tokio::fs::write(path, body)
                    .await
                    .map_err(|e| OutputError::IoError {
                        path: path.display().to_string(),
                        source: e,
                    })?;
            }
            Self::Blob(url) => {
                debug!(url = %url, bytes = body.len(), "Uploading output");

                let response = client
                    .put(url.clone())
                    .header(reqwest::header::CONTENT_TYPE, content_type)
                    .body(body.to_string())
                    .send()
                    .await
                    .map_err(|e| OutputError::UploadFailed {
                        url: url.to_string(),
                        source: e,
                    })?;

                if !response.status().is_success() {
                    return Err(OutputError::UploadRejected {
                        url: url.to_string(),
                        status: response.status().as_u16(),
                    });
                }
            }
        }

        info!(destination = %self, "Output written");
        Ok(())
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Blob(url) => write!(f, "{url}"),
        }
    }
}
