//! Retry policy for API requests
//!
//! Rate-limited responses (429) are always retried. Server errors (425 and
//! 5xx) and transport failures are retried only when the client was
//! configured with `retry_server_errors`.

use std::time::Duration;

use rand::Rng;

use crate::config::{Config, RetryLogHook};

/// Header carrying the number of seconds until the rate limit resets
pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

const SERVER_ERROR_WAIT_MIN: Duration = Duration::from_millis(700);
const SERVER_ERROR_WAIT_MAX: Duration = Duration::from_millis(900);

/// Upper bound on a server-supplied rate limit reset
pub const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub(crate) struct RetryPolicy {
    pub(crate) retry_server_errors: bool,
    pub(crate) retry_max: u32,
    pub(crate) wait_min: Duration,
    pub(crate) wait_max: Duration,
    pub(crate) server_wait_min: Duration,
    pub(crate) server_wait_max: Duration,
    hook: Option<RetryLogHook>,
}

impl RetryPolicy {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            retry_server_errors: config.retry_server_errors,
            retry_max: config.retry_max,
            wait_min: config.retry_wait_min,
            wait_max: config.retry_wait_max.max(config.retry_wait_min),
            server_wait_min: SERVER_ERROR_WAIT_MIN,
            server_wait_max: SERVER_ERROR_WAIT_MAX,
            hook: config.retry_log_hook.clone(),
        }
    }

    /// Whether a response with this status should be retried
    pub(crate) fn should_retry_status(&self, status: u16) -> bool {
        status == 429 || (self.retry_server_errors && (status == 425 || status >= 500))
    }

    /// Whether a transport error should be retried
    pub(crate) fn should_retry_error(&self, err: &reqwest::Error) -> bool {
        self.retry_server_errors && !err.is_builder() && !err.is_redirect()
    }

    /// Delay before retry number `attempt` (1-based)
    pub(crate) fn backoff(&self, attempt: u32, status: Option<u16>, rate_reset: Option<f64>) -> Duration {
        if status == Some(429) {
            rate_limit_backoff(self.wait_min, self.wait_max, rate_reset)
        } else {
            linear_jitter_backoff(self.server_wait_min, self.server_wait_max, attempt)
        }
    }

    pub(crate) fn notify(&self, attempt: u32, status: Option<u16>) {
        if let Some(hook) = &self.hook {
            hook(attempt, status);
        }
    }
}

/// Random delay in `[min, max)`, where `min` is raised to the server's reset
/// time when that is longer. The reset is capped at [`MAX_RATE_LIMIT_WAIT`].
pub(crate) fn rate_limit_backoff(min: Duration, max: Duration, reset_secs: Option<f64>) -> Duration {
    let jitter = random_between(Duration::ZERO, max.saturating_sub(min));
    let mut min = min;
    if let Some(reset) = reset_secs.filter(|r| *r > 0.0) {
        let reset = Duration::try_from_secs_f64(reset)
            .unwrap_or(MAX_RATE_LIMIT_WAIT)
            .min(MAX_RATE_LIMIT_WAIT);
        if reset > min {
            min = reset;
        }
    }
    min.saturating_add(jitter)
}

/// `attempt` times a random delay in `[min, max]`
pub(crate) fn linear_jitter_backoff(min: Duration, max: Duration, attempt: u32) -> Duration {
    random_between(min, max) * attempt.max(1)
}

fn random_between(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let nanos = rand::thread_rng().gen_range(min.as_nanos() as u64..=max.as_nanos() as u64);
    Duration::from_nanos(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn policy(retry_server_errors: bool) -> RetryPolicy {
        RetryPolicy::from_config(
            &Config::new("https://app.terraform.io", "t").with_retry_server_errors(retry_server_errors),
        )
    }

    #[test]
    fn test_rate_limited_is_always_retried() {
        assert!(policy(false).should_retry_status(429));
        assert!(policy(true).should_retry_status(429));
    }

    #[test]
    fn test_server_errors_need_opt_in() {
        let off = policy(false);
        assert!(!off.should_retry_status(500));
        assert!(!off.should_retry_status(503));
        assert!(!off.should_retry_status(425));

        let on = policy(true);
        assert!(on.should_retry_status(500));
        assert!(on.should_retry_status(503));
        assert!(on.should_retry_status(425));
        assert!(!on.should_retry_status(404));
        assert!(!on.should_retry_status(422));
    }

    #[test]
    fn test_rate_limit_backoff_bounds() {
        let min = Duration::from_millis(100);
        let max = Duration::from_millis(400);
        for _ in 0..50 {
            let d = rate_limit_backoff(min, max, None);
            assert!(d >= min && d <= max, "{:?} out of bounds", d);
        }
    }

    #[test]
    fn test_rate_limit_backoff_honors_reset() {
        let min = Duration::from_millis(100);
        let max = Duration::from_millis(400);
        let d = rate_limit_backoff(min, max, Some(2.5));
        assert!(d >= Duration::from_millis(2500));
        assert!(d <= Duration::from_millis(2800));

        // A reset shorter than min does not lower the delay
        let d = rate_limit_backoff(min, max, Some(0.01));
        assert!(d >= min);

        // Garbage values are ignored
        let d = rate_limit_backoff(min, max, Some(f64::NAN));
        assert!(d <= max);
    }

    #[test]
    fn test_rate_limit_backoff_caps_huge_reset() {
        let min = Duration::from_millis(100);
        let max = Duration::from_millis(400);
        for reset in [1e30, f64::MAX, 86_400.0] {
            let d = rate_limit_backoff(min, max, Some(reset));
            assert!(d >= MAX_RATE_LIMIT_WAIT, "{:?} for reset {}", d, reset);
            assert!(d <= MAX_RATE_LIMIT_WAIT + max, "{:?} for reset {}", d, reset);
        }

        let d = rate_limit_backoff(min, max, Some(-5.0));
        assert!(d <= max);
    }

    #[test]
    fn test_linear_jitter_backoff_scales_with_attempt() {
        let min = Duration::from_millis(700);
        let max = Duration::from_millis(900);
        let d = linear_jitter_backoff(min, max, 3);
        assert!(d >= min * 3 && d <= max * 3);
        assert!(linear_jitter_backoff(min, max, 0) <= max);
    }

    #[test]
    fn test_backoff_dispatches_on_status() {
        let p = policy(true);
        assert!(p.backoff(5, Some(429), None) <= Duration::from_millis(400));
        assert!(p.backoff(1, Some(503), None) >= Duration::from_millis(700));
    }

    #[test]
    fn test_notify_calls_hook() {
        let seen = Arc::new(AtomicU32::new(0));
        let seen_clone = seen.clone();
        let config = Config::new("https://app.terraform.io", "t").with_retry_log_hook(
            move |attempt, status| {
                assert_eq!(status, Some(429));
                seen_clone.store(attempt, Ordering::SeqCst);
            },
        );
        RetryPolicy::from_config(&config).notify(4, Some(429));
        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }
}
