use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use runtime_audit::{
    export_spans, ConfigFile, ExportBody, OutputTarget, SpanCredentials, SpanExportConfig,
    SpanWindow, SpansClient,
};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;

const AGGREGATE_PATH: &str = "/api/v2/spans/analytics/aggregate";

fn credentials() -> SpanCredentials {
    SpanCredentials {
        api_key: "api-key".to_string(),
        app_key: "app-key".to_string(),
    }
}

fn client_for(server: &MockServer) -> SpansClient {
    SpansClient::new(
        &Url::parse(&server.base_url()).unwrap(),
        credentials(),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn exports_previous_month_counts_to_blob() {
    let server = MockServer::start_async().await;
    let now = Utc.with_ymd_and_hms(2024, 5, 20, 14, 5, 9).unwrap();

    let aggregate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(AGGREGATE_PATH)
                .header("dd-api-key", "api-key")
                .header("dd-application-key", "app-key")
                .body_includes(r#""from":"2024-04-20T03:00:00Z""#)
                .body_includes(r#""to":"2024-05-20T03:00:00Z""#)
                .body_includes(r#""group_by":[{"facet":"@http.status_code"}]"#);
            then.status(200).json_body(json!({
                "data": [
                    { "attributes": { "by": { "@http.status_code": "200" }, "compute": { "c0": 42 } } },
                    { "attributes": { "by": { "@http.status_code": "404" }, "compute": { "c0": 5 } } }
                ]
            }));
        })
        .await;

    let upload = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/exports/datadog_spans/spans_2024-05-20_14-05-09.txt")
                .body("StatusCode | Total\n----------------------\n200 | 42\n404 | 5\n");
            then.status(201);
        })
        .await;

    let config = SpanExportConfig {
        site: Url::parse(&server.base_url()).unwrap(),
        window: SpanWindow::PreviousMonth { hour: 3 },
        output: OutputTarget::Blob(Url::parse(&server.url("/exports")).unwrap()),
        ..SpanExportConfig::default()
    };

    let outcome = export_spans(&config, &client_for(&server), now).await;

    aggregate.assert_async().await;
    upload.assert_async().await;
    assert!(outcome.is_success());
    assert_eq!(
        outcome.body,
        ExportBody::Exported {
            message: "Span counts exported".to_string(),
            file: server.url("/exports/datadog_spans/spans_2024-05-20_14-05-09.txt"),
        }
    );
}

#[tokio::test]
async fn exports_totals_to_file() {
    let server = MockServer::start_async().await;
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("status_codes.txt");
    std::fs::write(&path, "previous export").unwrap();

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(AGGREGATE_PATH)
                .body_excludes("group_by");
            then.status(200).json_body(json!({
                "data": [{ "attributes": { "compute": { "c0": 1234 } } }]
            }));
        })
        .await;

    let config = SpanExportConfig {
        site: Url::parse(&server.base_url()).unwrap(),
        totals: true,
        output: OutputTarget::File(path.clone()),
        ..SpanExportConfig::default()
    };

    let outcome = export_spans(&config, &client_for(&server), Utc::now()).await;

    assert!(outcome.is_success());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "total\n----------------------\n1234\n"
    );
}

#[tokio::test]
async fn api_failure_becomes_failed_outcome() {
    let server = MockServer::start_async().await;
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("status_codes.txt");

    server
        .mock_async(|when, then| {
            when.method(POST).path(AGGREGATE_PATH);
            then.status(403).body("Forbidden");
        })
        .await;

    let config = SpanExportConfig {
        site: Url::parse(&server.base_url()).unwrap(),
        output: OutputTarget::File(path.clone()),
        ..SpanExportConfig::default()
    };

    let outcome = export_spans(&config, &client_for(&server), Utc::now()).await;

    assert_eq!(outcome.status_code, 500);
    assert!(matches!(
        outcome.body,
        ExportBody::Failed { ref error } if error.contains("403")
    ));
    assert!(!path.exists());
}

#[tokio::test]
async fn rejected_upload_becomes_failed_outcome() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(AGGREGATE_PATH);
            then.status(200).json_body(json!({ "data": [] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT);
            then.status(403);
        })
        .await;

    let config = SpanExportConfig {
        site: Url::parse(&server.base_url()).unwrap(),
        output: OutputTarget::Blob(Url::parse(&server.url("/exports")).unwrap()),
        ..SpanExportConfig::default()
    };

    let outcome = export_spans(&config, &client_for(&server), Utc::now()).await;

    assert!(!outcome.is_success());
    assert_eq!(
        serde_json::to_value(&outcome).unwrap()["status_code"],
        json!(500)
    );
}

#[test]
fn settings_fixture_builds_span_config() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/runtime-audit.toml");
    let config = ConfigFile::load(&path).unwrap().span_config().unwrap();

    config.validate().unwrap();
    assert_eq!(config.query, "service:orders @http.status_code:*");
    assert_eq!(config.window, SpanWindow::PreviousMonth { hour: 3 });
    assert_eq!(
        config.output,
        OutputTarget::Blob(Url::parse("https://storage.example.com/exports").unwrap())
    );
}
