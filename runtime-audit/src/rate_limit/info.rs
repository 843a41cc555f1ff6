//! Rate limit information.

/// Minimum remaining requests below which a warning is logged.
pub const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for the core API.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns true when fewer than `needed` requests remain, or the quota is
    /// nearly exhausted.
    #[must_use]
    pub fn is_low(&self, needed: u32) -> bool {
        self.remaining < needed.max(MIN_REMAINING_THRESHOLD)
    }

    /// Seconds until the window resets, relative to `now` (Unix seconds).
    #[must_use]
    pub fn resets_in(&self, now: u64) -> u64 {
        self.reset.saturating_sub(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_when_below_threshold() {
        let info = RateLimitInfo {
            remaining: 3,
            reset: 100,
            limit: 60,
        };

        assert!(info.is_low(0));
        assert!(info.is_low(1));
    }

    #[test]
    fn low_when_fewer_than_needed() {
        let info = RateLimitInfo {
            remaining: 40,
            reset: 100,
            limit: 60,
        };

        assert!(!info.is_low(10));
        assert!(info.is_low(41));
    }

    #[test]
    fn resets_in_saturates() {
        let info = RateLimitInfo {
            remaining: 0,
            reset: 100,
            limit: 60,
        };

        assert_eq!(info.resets_in(40), 60);
        assert_eq!(info.resets_in(500), 0);
    }
}
