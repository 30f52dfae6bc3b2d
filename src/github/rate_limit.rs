//! Quota snapshot attached to rate-limited listing failures.
//!
//! GitHub refuses the listing endpoint once the account's hourly quota is
//! spent. The gateway then asks `/rate_limit` for the current quota so the
//! failure can say how long the user has to wait.

use chrono::{DateTime, Utc};

/// Core REST quota as reported by the `rate_limit` endpoint.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use repo_pulse::github::rate_limit::RateLimitInfo;
///
/// let quota = RateLimitInfo::new(5000, 0, 1_700_000_090);
/// let now = Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid timestamp");
/// assert_eq!(quota.seconds_until_reset(now), 90);
/// assert_eq!(
///     quota.describe(now),
///     "0 of 5000 requests left, resets in 90s (at 1700000090)"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    limit: u32,
    remaining: u32,
    reset_at: u64,
}

impl RateLimitInfo {
    /// Captures a quota snapshot; `reset_at` is a Unix timestamp.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Unix timestamp at which the quota refills.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Seconds between `now` and the reset, saturating at zero.
    #[must_use]
    pub fn seconds_until_reset(&self, now: DateTime<Utc>) -> u64 {
        let now_secs = u64::try_from(now.timestamp()).unwrap_or(0);
        self.reset_at.saturating_sub(now_secs)
    }

    /// Human-readable quota state relative to `now`.
    #[must_use]
    pub fn describe(&self, now: DateTime<Utc>) -> String {
        format!(
            "{remaining} of {limit} requests left, resets in {wait}s (at {reset_at})",
            remaining = self.remaining,
            limit = self.limit,
            wait = self.seconds_until_reset(now),
            reset_at = self.reset_at,
        )
    }
}
