//! `runtime = "..."` declarations.

use crate::version::{RuntimeStatus, RuntimeVersion};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Matches `runtime = "python3.12"` with either quote style.
static RUNTIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"runtime\s*=\s*["']([^"']+)["']"#).expect("RUNTIME_REGEX must compile")
});

/// A runtime string declared for a deployable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeDeclaration {
    /// The declared runtime exactly as written (e.g. `python3.10`).
    pub raw: String,

    /// Parsed version, `None` for other languages or unreadable versions.
    pub version: Option<RuntimeVersion>,
}

impl RuntimeDeclaration {
    /// Parses a raw runtime label for the tracked language.
    #[must_use]
    pub fn new(raw: impl Into<String>, language: &str) -> Self {
        let raw = raw.into();
        let version = RuntimeVersion::parse_label(&raw, language);
        Self { raw, version }
    }

    /// Compares this declaration against the recommended version.
    #[must_use]
    pub fn status(&self, recommended: RuntimeVersion) -> RuntimeStatus {
        RuntimeStatus::classify(self.version, recommended)
    }
}

/// Extracts every runtime declaration from `content`, in document order.
///
/// All runtimes are returned, including those of other languages; their
/// version is `None`.
#[must_use]
pub fn extract_runtimes(content: &str, language: &str) -> Vec<RuntimeDeclaration> {
    RUNTIME_REGEX
        .captures_iter(content)
        .map(|captures| RuntimeDeclaration::new(&captures[1], language))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_TF: &str = r#"
resource "aws_lambda_function" "api" {
  function_name = "api"
  runtime       = "python3.9"
  handler       = "main.handler"
}

resource "aws_lambda_function" "edge" {
  runtime = "nodejs18.x"
}

resource "aws_lambda_function" "worker" {
  runtime='python3.12'
}
"#;

    #[test]
    fn extracts_runtimes_in_order() {
        let runtimes = extract_runtimes(MAIN_TF, "python");

        let raw: Vec<_> = runtimes.iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(raw, ["python3.9", "nodejs18.x", "python3.12"]);
        assert_eq!(runtimes[0].version, Some(RuntimeVersion::new(3, 9)));
        assert_eq!(runtimes[1].version, None);
        assert_eq!(runtimes[2].version, Some(RuntimeVersion::new(3, 12)));
    }

    #[test]
    fn classifies_against_recommended() {
        let recommended = RuntimeVersion::new(3, 12);
        let runtimes = extract_runtimes(MAIN_TF, "python");

        assert!(runtimes[0].status(recommended).is_outdated());
        assert_eq!(runtimes[1].status(recommended), RuntimeStatus::NotApplicable);
        assert!(!runtimes[2].status(recommended).is_outdated());
    }

    #[test]
    fn content_without_runtimes_yields_nothing() {
        assert!(extract_runtimes("variable \"region\" {}", "python").is_empty());
        assert!(extract_runtimes("", "python").is_empty());
    }
}
