use std::time::Duration;

/// Configuration for the Cricbet client.
#[derive(Debug, Clone)]
pub struct CricbetConfig {
    /// Base URL for the CricBet backend (e.g. `https://api.cricbet.example`).
    pub base_url: String,
    /// Per-request timeout for HTTP calls.
    pub request_timeout: Duration,
    /// Poll interval when watching scores for the full match listing.
    pub listing_poll_interval: Duration,
    /// Poll interval when watching a single match detail.
    pub detail_poll_interval: Duration,
    /// Clear the stored session when the user-data fan-out fails.
    /// Disable to keep tokens and let the caller decide how to recover.
    pub logout_on_fetch_failure: bool,
}

impl CricbetConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(10),
            listing_poll_interval: Duration::from_secs(5),
            detail_poll_interval: Duration::from_secs(15),
            logout_on_fetch_failure: true,
        }
    }
}
