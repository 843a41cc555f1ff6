//! Repository discovery through the "list repositories for a user" endpoint.
//!
//! Listing pages through `/users/{owner}/repos` until a short page comes
//! back, then keeps the repositories whose name contains the keyword.

mod error;
mod pagination;
mod repository;

pub use error::DiscoveryError;
pub use pagination::paginate;
pub use repository::RepositoryDescriptor;

use crate::github::{api_route, get_json, RequestError};
use octocrab::Octocrab;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

/// Repositories requested per page (the API maximum).
pub const PAGE_SIZE: u8 = 100;

/// Query parameters of the listing endpoint.
#[derive(Debug, Serialize)]
struct ListParams {
    per_page: u8,
    page: u32,
}

/// Lists every repository of `owner`.
///
/// A non-success response on a later page ends pagination early and keeps
/// what was already collected.
///
/// # Errors
///
/// Returns [`DiscoveryError::ListingRejected`] when the first page gets a
/// non-success response, [`DiscoveryError::NoRepositories`] when nothing is
/// listed, and [`DiscoveryError::ListingFailed`] when the API cannot be
/// reached.
pub async fn list_repositories(
    octocrab: &Octocrab,
    owner: &str,
    timeout: Duration,
) -> Result<Vec<RepositoryDescriptor>, DiscoveryError> {
    let span = info_span!("list_repositories", owner);

    async {
        info!("Listing repositories");

        let route = api_route(["users", owner, "repos"]);
        let repositories = paginate(usize::from(PAGE_SIZE), |page| {
            fetch_page(octocrab, &route, page, timeout)
        })
        .await
        .map_err(|source| {
            if source.is_status_error() {
                DiscoveryError::ListingRejected {
                    owner: owner.to_string(),
                    source,
                }
            } else {
                DiscoveryError::ListingFailed {
                    owner: owner.to_string(),
                    source,
                }
            }
        })?;

        if repositories.is_empty() {
            return Err(DiscoveryError::NoRepositories {
                owner: owner.to_string(),
            });
        }

        info!(count = repositories.len(), "Listing complete");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Fetches one listing page.
///
/// Status errors after the first page map to an empty page, which ends
/// pagination.
async fn fetch_page(
    octocrab: &Octocrab,
    route: &str,
    page: u32,
    timeout: Duration,
) -> Result<Vec<RepositoryDescriptor>, RequestError> {
    let params = ListParams {
        per_page: PAGE_SIZE,
        page,
    };

    match get_json::<Vec<RepositoryDescriptor>, _>(octocrab, route, Some(&params), timeout).await {
        Ok(repositories) => {
            debug!(page, count = repositories.len(), "Fetched page");
            Ok(repositories)
        }
        Err(e) if page > 1 && e.is_status_error() => {
            warn!(page, error = %e, "Listing page rejected, stopping pagination");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Keeps repositories whose name contains `keyword`, ignoring case.
///
/// Listing order is preserved.
#[must_use]
pub fn filter_by_name(
    repositories: Vec<RepositoryDescriptor>,
    keyword: &str,
) -> Vec<RepositoryDescriptor> {
    repositories
        .into_iter()
        .filter(|repo| repo.name_matches(keyword))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> RepositoryDescriptor {
        RepositoryDescriptor {
            name: name.to_string(),
            full_name: format!("acme/{name}"),
            html_url: format!("https://github.com/acme/{name}"),
            description: None,
            default_branch: "main".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn filters_by_keyword() {
        let repos = vec![repo("orders-lambda"), repo("website"), repo("Lambda-Auth")];

        let matched = filter_by_name(repos, "lambda");

        let names: Vec<_> = matched.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["orders-lambda", "Lambda-Auth"]);
    }

    #[test]
    fn filter_on_empty_listing() {
        assert!(filter_by_name(Vec::new(), "lambda").is_empty());
    }
}
