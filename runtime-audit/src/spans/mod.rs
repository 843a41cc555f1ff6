//! Span count export from the Datadog spans analytics API.
//!
//! One aggregation request (count, optionally grouped by a facet) over a
//! time window; the buckets are rendered as a plain-text table and written
//! to a file or blob store.

mod client;
mod error;
mod export;
mod request;
mod window;

pub use client::SpansClient;
pub use error::SpanError;
pub use export::{
    export_key, export_spans, facet_label, render_counts, ExportBody, ExportOutcome,
    TEXT_CONTENT_TYPE,
};
pub use request::{BucketAttributes, SpanAggregateRequest, SpanAggregateResponse, SpanBucket};
pub use window::resolve_window;
