#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod contents;
pub mod discovery;
pub mod extract;
pub mod github;
pub mod output;
pub mod rate_limit;
pub mod report;
pub mod runner;
pub mod spans;
pub mod summary;
pub mod version;

pub use config::{ConfigError, ConfigFile, ScanConfig, SpanCredentials, SpanExportConfig, SpanWindow};
pub use contents::{decode_content, fetch_file, list_tree, matching_files, FileMatch};
pub use discovery::{filter_by_name, list_repositories, DiscoveryError, RepositoryDescriptor};
pub use extract::{extract_runtimes, extract_sources, RuntimeDeclaration, SourceDeclaration};
pub use github::{build_client, RequestError};
pub use output::{OutputError, OutputTarget};
pub use rate_limit::{check_core_rate_limit, log_core_rate_limit, RateLimitInfo};
pub use report::{render_markdown, Report, ReportEntry, RepositoryReport};
pub use runner::{RunnerError, ScanRunner};
pub use spans::{export_spans, ExportBody, ExportOutcome, SpanError, SpansClient};
pub use summary::ScanSummary;
pub use version::{
    ExpectedVersions, ModuleStatus, ModuleVersion, RuntimeStatus, RuntimeVersion, VersionError,
};
