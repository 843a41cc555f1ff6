//! Wire types of the spans aggregate endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of `POST /api/v2/spans/analytics/aggregate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanAggregateRequest {
    data: RequestData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RequestData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: RequestAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RequestAttributes {
    compute: Vec<Compute>,
    filter: Filter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    group_by: Vec<GroupBy>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Compute {
    aggregation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Filter {
    from: String,
    to: String,
    query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct GroupBy {
    facet: String,
}

impl SpanAggregateRequest {
    /// Builds a count aggregation over `[from, to]`, optionally grouped by
    /// `facet`.
    #[must_use]
    pub fn count(query: &str, from: &str, to: &str, facet: Option<&str>) -> Self {
        Self {
            data: RequestData {
                kind: "aggregate_request",
                attributes: RequestAttributes {
                    compute: vec![Compute {
                        aggregation: "count",
                    }],
                    filter: Filter {
                        from: from.to_string(),
                        to: to.to_string(),
                        query: query.to_string(),
                    },
                    group_by: facet
                        .map(|facet| GroupBy {
                            facet: facet.to_string(),
                        })
                        .into_iter()
                        .collect(),
                },
            },
        }
    }
}

/// Response of the aggregate endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpanAggregateResponse {
    /// Result buckets; absent when nothing matched.
    #[serde(default)]
    pub data: Vec<SpanBucket>,
}

/// One aggregation bucket.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpanBucket {
    /// Bucket attributes.
    #[serde(default)]
    pub attributes: BucketAttributes,
}

/// Group values and computed aggregates of a bucket.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BucketAttributes {
    /// Facet values this bucket groups on.
    #[serde(default)]
    pub by: BTreeMap<String, Value>,

    /// Computed aggregates keyed `c0`, `c1`, ...
    #[serde(default)]
    pub compute: BTreeMap<String, Value>,
}

impl SpanBucket {
    /// The first computed aggregate (`c0`), or 0 when absent.
    #[must_use]
    pub fn count(&self) -> u64 {
        match self.attributes.compute.get("c0") {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| f.max(0.0).round() as u64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// The value of `facet` as text, if the bucket groups on it.
    #[must_use]
    pub fn group_value(&self, facet: &str) -> Option<String> {
        self.attributes.by.get(facet).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
