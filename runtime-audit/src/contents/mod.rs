//! Repository tree listing and file content retrieval.

mod decode;
mod file_match;

pub use decode::{decode_content, ContentEnvelope};
pub use file_match::{matching_files, FileMatch};

use crate::github::{api_route, get_json, RequestError};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// One entry of a git tree listing.
#[derive(Debug, Clone, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Response of the git trees endpoint.
#[derive(Debug, Clone, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Serialize)]
struct TreeParams {
    recursive: u8,
}

#[derive(Serialize)]
struct ContentParams<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
}

/// Lists every file path in `repo` at `branch`, recursively.
///
/// Directories and submodules are left out. A truncated listing is logged and
/// used as is.
///
/// # Errors
///
/// Returns [`RequestError`] if the tree cannot be fetched.
pub async fn list_tree(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    branch: &str,
    timeout: Duration,
) -> Result<Vec<String>, RequestError> {
    let route = api_route(["repos", owner, repo, "git", "trees", branch]);
    let response: TreeResponse =
        get_json(octocrab, &route, Some(&TreeParams { recursive: 1 }), timeout).await?;

    if response.truncated {
        warn!(repo, branch, "Tree listing truncated by GitHub, some files are not scanned");
    }

    let paths: Vec<String> = response
        .tree
        .into_iter()
        .filter(|entry| entry.kind == "blob")
        .map(|entry| entry.path)
        .collect();

    debug!(repo, count = paths.len(), "Listed tree");
    Ok(paths)
}

/// Fetches the text of one file at `branch`.
///
/// Returns `Ok(None)` when GitHub answers without base64 content, as it does
/// for files too large for the contents API (`encoding: none`).
///
/// # Errors
///
/// Returns [`RequestError`] if the request fails.
pub async fn fetch_file(
    octocrab: &Octocrab,
    owner: &str,
    repo: &str,
    path: &str,
    branch: &str,
    timeout: Duration,
) -> Result<Option<String>, RequestError> {
    let route = api_route(["repos", owner, repo, "contents", path]);
    let envelope: ContentEnvelope = get_json(
        octocrab,
        &route,
        Some(&ContentParams { reference: branch }),
        timeout,
    )
    .await?;

    Ok(decode_content(&envelope))
}
