//! Shared retry policy for upstream HTTP calls (AI and payment providers).

use std::time::Duration;

use rand::Rng;

/// Total attempts per upstream call, including the first.
pub const MAX_ATTEMPTS: u32 = 4;

/// Delay before retry number `attempt` (zero-based): exponential with up to
/// half a second of jitter to spread concurrent clients apart.
pub fn retry_delay(attempt: u32) -> Duration {
    let base = Duration::from_secs(1u64 << attempt.min(6));
    let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..500));
    base + jitter
}

/// Whether an upstream status is worth retrying.
pub fn is_retryable(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_grows_exponentially_with_bounded_jitter() {
        for attempt in 0..MAX_ATTEMPTS {
            let delay = retry_delay(attempt);
            let base = Duration::from_secs(1 << attempt);
            assert!(delay >= base);
            assert!(delay < base + Duration::from_millis(500));
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(reqwest::StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_retryable(reqwest::StatusCode::BAD_REQUEST));
        assert!(!is_retryable(reqwest::StatusCode::UNAUTHORIZED));
    }
}
