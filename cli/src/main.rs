//! CLI for runtime-audit.
//!
//! `scan` lists a GitHub account's repositories, reads their tracked
//! infrastructure files and writes a Markdown report of outdated runtimes and
//! module pins. `spans` exports Datadog span counts to a file or blob store.

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use runtime_audit::{
    export_spans, ConfigError, ConfigFile, ExportOutcome, OutputTarget, RunnerError,
    ScanConfig, ScanRunner, ScanSummary, SpanCredentials, SpanError, SpanExportConfig, SpansClient,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Runtime audit - find outdated Lambda runtimes and module pins across GitHub repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan repositories and write a Markdown report.
    Scan(ScanArgs),

    /// Export span counts from the Datadog spans API.
    Spans(SpansArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub user or organization to scan.
    #[arg(long)]
    owner: Option<String>,

    /// Keyword repository names must contain.
    #[arg(long)]
    filter: Option<String>,

    /// Report file path.
    #[arg(long, conflicts_with = "blob_url")]
    output: Option<PathBuf>,

    /// Upload the report to this URL instead of writing a file.
    #[arg(long)]
    blob_url: Option<Url>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Args, Debug)]
struct SpansArgs {
    /// Path to a TOML settings file with a `[spans]` table.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Span search query.
    #[arg(long)]
    query: Option<String>,

    /// Facet to group counts by.
    #[arg(long, conflicts_with = "totals")]
    facet: Option<String>,

    /// Count all matching spans without grouping.
    #[arg(long)]
    totals: bool,

    /// Export file path.
    #[arg(long, conflicts_with = "blob_url")]
    output: Option<PathBuf>,

    /// Blob URL prefix the export is uploaded under.
    #[arg(long)]
    blob_url: Option<Url>,
}

/// Errors that stop a command before it produces a result.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Spans(#[from] SpanError),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        error!("Failed to install the TLS crypto provider");
        return ExitCode::from(2);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Scan(args) => scan(args).await.map(|summary| {
            print_summary(&summary);
            summary.has_outdated()
        }),
        Command::Spans(args) => spans(args).await.map(|outcome| {
            print_outcome(&outcome);
            !outcome.is_success()
        }),
    };

    match result {
        Ok(false) => ExitCode::from(0),
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with a compact format and `RUST_LOG` filtering.
///
/// Falls back to the `info` level when `RUST_LOG` is unset or invalid.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn output_override(output: Option<PathBuf>, blob_url: Option<Url>) -> Option<OutputTarget> {
    blob_url
        .map(OutputTarget::Blob)
        .or_else(|| output.map(OutputTarget::File))
}

fn load_file(path: Option<&PathBuf>) -> Result<ConfigFile, ConfigError> {
    path.map_or_else(|| Ok(ConfigFile::default()), |path| ConfigFile::load(path))
}

/// Runs a repository scan.
async fn scan(args: ScanArgs) -> Result<ScanSummary, CliError> {
    let file = load_file(args.config.as_ref())?;

    let mut config: ScanConfig = file.scan_config(args.owner)?;
    if let Some(filter) = args.filter {
        config.name_filter = filter;
    }
    if let Some(output) = output_override(args.output, args.blob_url) {
        config.output = output;
    }

    let runner = ScanRunner::new(config, args.token)?;
    Ok(runner.run().await?)
}

/// Runs a span export.
async fn spans(args: SpansArgs) -> Result<ExportOutcome, CliError> {
    let mut config: SpanExportConfig = match args.config.as_ref() {
        Some(path) => ConfigFile::load(path)?.span_config()?,
        None => SpanExportConfig::default(),
    };
    if let Some(query) = args.query {
        config.query = query;
    }
    if args.totals {
        config.totals = true;
    } else if let Some(facet) = args.facet {
        config.facet = Some(facet);
        config.totals = false;
    }
    if let Some(output) = output_override(args.output, args.blob_url) {
        config.output = output;
    }
    config.validate()?;

    let credentials = SpanCredentials::from_env()?;
    let client = SpansClient::new(&config.site, credentials, config.timeout())?;
    Ok(export_spans(&config, &client, Utc::now()).await)
}

/// Prints the final scan summary.
fn print_summary(summary: &ScanSummary) {
    println!("\nSummary:");
    println!("  Repositories listed: {}", summary.repositories_listed);
    println!("  Repositories matched: {}", summary.repositories_matched);
    println!("  Repositories skipped: {}", summary.repositories_skipped);
    println!("  Files scanned: {}", summary.files_scanned);
    println!("  Files skipped: {}", summary.files_skipped);
    println!("  Outdated runtimes: {}", summary.runtimes_outdated);
    println!("  Outdated module pins: {}", summary.sources_outdated);
    println!("  Report: {}", summary.output);
}

/// Prints the export outcome as JSON.
fn print_outcome(outcome: &ExportOutcome) {
    match serde_json::to_string_pretty(outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(error = %e, "Failed to serialize export outcome"),
    }
}
