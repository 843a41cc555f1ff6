//! Thin request helpers over [`Octocrab`].
//!
//! Every GitHub call in the crate goes through [`get_json`], which bounds the
//! request with the configured timeout. Clients come from [`build_client`],
//! which turns off octocrab's retry layer, so each call is a single attempt.

use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors from a single GitHub request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// GitHub API or transport error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The request did not complete in time.
    #[error("Request to '{route}' timed out after {secs}s")]
    Timeout { route: String, secs: u64 },
}

impl RequestError {
    /// Returns true when GitHub answered with a non-success status.
    ///
    /// Such responses mean "no data" for the unit being fetched, whereas
    /// transport failures and timeouts mean the API could not be reached.
    #[must_use]
    pub fn is_status_error(&self) -> bool {
        matches!(self, Self::GitHubError(octocrab::Error::GitHub { .. }))
    }
}

/// Builds a GitHub client that never retries.
///
/// `base_uri` replaces `https://api.github.com` (GitHub Enterprise or a test
/// server).
///
/// # Errors
///
/// Returns an error if `base_uri` is not a valid URI or the client cannot be
/// built.
pub fn build_client(
    token: Option<String>,
    base_uri: Option<&str>,
) -> Result<Octocrab, octocrab::Error> {
    let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
    if let Some(token) = token {
        builder = builder.personal_token(token);
    }
    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri)?;
    }

    builder.build()
}

/// Performs a GET request and deserializes the JSON body.
pub(crate) async fn get_json<R, P>(
    octocrab: &Octocrab,
    route: &str,
    parameters: Option<&P>,
    timeout: Duration,
) -> Result<R, RequestError>
where
    R: DeserializeOwned,
    P: Serialize + ?Sized,
{
    debug!(route, "GET");

    tokio::time::timeout(timeout, octocrab.get(route, parameters))
        .await
        .map_err(|_| RequestError::Timeout {
            route: route.to_string(),
            secs: timeout.as_secs(),
        })?
        .map_err(RequestError::from)
}

/// Builds an API route from raw segments, percent-encoding each one.
///
/// Segments may contain `/` (file paths); those are split so that the
/// separators survive while everything else is escaped.
pub(crate) fn api_route<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut url = Url::parse("http://api.invalid/").expect("static base URL must parse");
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear();
        for segment in segments {
            path.extend(segment.split('/').filter(|part| !part.is_empty()));
        }
    }
    url.path().to_string()
}
