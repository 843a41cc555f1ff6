//! Rate limit reporting for the GitHub core API.
//!
//! Runs never wait or retry. The quota is checked once before scanning so a
//! run that is about to exhaust it (unauthenticated clients get 60 requests
//! per hour) is flagged in the log.

mod info;

pub use info::{RateLimitInfo, MIN_REMAINING_THRESHOLD};

use crate::github::{get_json, RequestError};
use chrono::Utc;
use octocrab::models::RateLimit;
use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Checks the current rate limit status for the core API.
///
/// The call is bounded by `timeout` like every other GitHub request.
///
/// # Errors
///
/// Returns [`RequestError`] if the rate limit API call fails or times out.
pub async fn check_core_rate_limit(
    octocrab: &Octocrab,
    timeout: Duration,
) -> Result<RateLimitInfo, RequestError> {
    let rate_limit: RateLimit = get_json(octocrab, "/rate_limit", None::<&()>, timeout).await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: u32::try_from(core.remaining).unwrap_or(u32::MAX),
        reset: core.reset,
        limit: u32::try_from(core.limit).unwrap_or(u32::MAX),
    })
}

/// Logs the core quota, warning when fewer than `needed` requests remain.
///
/// Returns the fetched information, or `None` if the check itself failed.
pub async fn log_core_rate_limit(
    octocrab: &Octocrab,
    needed: u32,
    timeout: Duration,
) -> Option<RateLimitInfo> {
    match check_core_rate_limit(octocrab, timeout).await {
        Ok(quota) => {
            if quota.is_low(needed) {
                let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
                warn!(
                    remaining = quota.remaining,
                    needed,
                    resets_in_secs = quota.resets_in(now),
                    "GitHub rate limit nearly exhausted; requests may be rejected"
                );
            } else {
                info!(
                    remaining = quota.remaining,
                    limit = quota.limit,
                    "GitHub rate limit"
                );
            }
            Some(quota)
        }
        Err(e) => {
            warn!(error = %e, "Failed to check GitHub rate limit");
            None
        }
    }
}
