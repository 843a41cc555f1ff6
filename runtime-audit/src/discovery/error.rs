//! Repository discovery error types.

use crate::github::RequestError;
use thiserror::Error;

/// Errors that abort repository discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The repository listing could not be fetched at all.
    #[error("Failed to list repositories for '{owner}': {source}")]
    ListingFailed {
        owner: String,
        #[source]
        source: RequestError,
    },

    /// GitHub rejected the first page, e.g. an unknown owner or a bad token.
    #[error("GitHub rejected the repository listing for '{owner}' (check the owner and token): {source}")]
    ListingRejected {
        owner: String,
        #[source]
        source: RequestError,
    },

    /// The listing succeeded but the owner has no repositories.
    #[error("No repositories returned for '{owner}' (check the owner and token)")]
    NoRepositories { owner: String },
}
