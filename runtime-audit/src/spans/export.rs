//! Span count export.

use super::request::{SpanAggregateRequest, SpanBucket};
use super::window::resolve_window;
use super::{SpanError, SpansClient};
use crate::config::SpanExportConfig;
use crate::output::OutputTarget;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, info_span, Instrument};

/// Content type of exported counts.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Separator line under the column header.
const RULE: &str = "----------------------";

/// Result of an export, shaped like an HTTP response.
///
/// Exports never raise: every failure is folded into a 500 outcome carrying
/// the error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    /// 200 on success, 500 on failure.
    pub status_code: u16,

    /// Success or failure details.
    pub body: ExportBody,
}

/// Payload of an [`ExportOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExportBody {
    /// The export was written.
    Exported { message: String, file: String },

    /// The export failed.
    Failed { error: String },
}

impl ExportOutcome {
    fn exported(target: &OutputTarget) -> Self {
        Self {
            status_code: 200,
            body: ExportBody::Exported {
                message: "Span counts exported".to_string(),
                file: target.to_string(),
            },
        }
    }

    fn failed(error: &SpanError) -> Self {
        Self {
            status_code: 500,
            body: ExportBody::Failed {
                error: error.to_string(),
            },
        }
    }

    /// Returns true for a 200 outcome.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Object key for an export made at `now`.
#[must_use]
pub fn export_key(now: DateTime<Utc>) -> String {
    format!("datadog_spans/spans_{}.txt", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Column header for a facet: `@http.status_code` becomes `StatusCode`.
#[must_use]
pub fn facet_label(facet: &str) -> String {
    let name = facet.trim_start_matches('@');
    let last = name.rsplit('.').next().unwrap_or(name);

    last.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect()
}

/// Renders bucket counts as a plain-text table.
///
/// With a facet every line is `<value> | <count>` (`N/A` when the bucket has
/// no value for the facet); without one, each line is a bare count.
#[must_use]
pub fn render_counts(buckets: &[SpanBucket], facet: Option<&str>) -> String {
    let mut out = String::new();

    match facet {
        Some(facet) => {
            out.push_str(&format!("{} | Total\n{RULE}\n", facet_label(facet)));
            for bucket in buckets {
                let value = bucket.group_value(facet);
                out.push_str(&format!(
                    "{} | {}\n",
                    value.as_deref().unwrap_or("N/A"),
                    bucket.count()
                ));
            }
        }
        None => {
            out.push_str(&format!("total\n{RULE}\n"));
            for bucket in buckets {
                out.push_str(&format!("{}\n", bucket.count()));
            }
        }
    }

    out
}

/// Aggregates spans and writes the counts to the configured output.
///
/// Blob outputs receive a timestamped key under the configured prefix; file
/// outputs are overwritten.
pub async fn export_spans(
    config: &SpanExportConfig,
    client: &SpansClient,
    now: DateTime<Utc>,
) -> ExportOutcome {
    let span = info_span!("export_spans", query = %config.query);

    async {
        match run_export(config, client, now).await {
            Ok(target) => {
                info!(destination = %target, "Span export complete");
                ExportOutcome::exported(&target)
            }
            Err(e) => {
                error!(error = %e, "Span export failed");
                ExportOutcome::failed(&e)
            }
        }
    }
    .instrument(span)
    .await
}

async fn run_export(
    config: &SpanExportConfig,
    client: &SpansClient,
    now: DateTime<Utc>,
) -> Result<OutputTarget, SpanError> {
    let (from, to) = resolve_window(&config.window, now)?;
    info!(from = %from, to = %to, "Aggregating span counts");

    let facet = config.group_by();
    let request = SpanAggregateRequest::count(&config.query, &from, &to, facet);
    let buckets = client.aggregate(&request).await?;

    let body = render_counts(&buckets, facet);
    let target = config.output.with_key(&export_key(now));
    target.write(client.http(), &body, TEXT_CONTENT_TYPE).await?;

    Ok(target)
}
