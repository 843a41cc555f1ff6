//! Spans analytics API client.

use super::request::{SpanAggregateRequest, SpanAggregateResponse, SpanBucket};
use super::SpanError;
use crate::config::SpanCredentials;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Path of the aggregate endpoint, relative to the site URL.
const AGGREGATE_PATH: &str = "api/v2/spans/analytics/aggregate";

/// Authenticated client for the spans aggregate endpoint.
#[derive(Debug, Clone)]
pub struct SpansClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: SpanCredentials,
}

impl SpansClient {
    /// Creates a client for `site` (e.g. `https://api.datadoghq.com`).
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(
        site: &Url,
        credentials: SpanCredentials,
        timeout: Duration,
    ) -> Result<Self, SpanError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SpanError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: endpoint(site),
            credentials,
        })
    }

    /// The HTTP client, shared with output uploads.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Runs an aggregation and returns its buckets.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::Request`] on transport or decoding failures and
    /// [`SpanError::Api`] on a non-success status.
    pub async fn aggregate(
        &self,
        request: &SpanAggregateRequest,
    ) -> Result<Vec<SpanBucket>, SpanError> {
        debug!(endpoint = %self.endpoint, "Aggregating spans");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("DD-API-KEY", &self.credentials.api_key)
            .header("DD-APPLICATION-KEY", &self.credentials.app_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpanError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SpanAggregateResponse = response.json().await?;
        debug!(buckets = parsed.data.len(), "Aggregation complete");
        Ok(parsed.data)
    }
}

/// Joins the aggregate path onto the site URL, keeping any base path.
fn endpoint(site: &Url) -> Url {
    let mut base = site.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(AGGREGATE_PATH).unwrap_or(base)
}
