use std::time::Duration;

use crate::jitter::JitterSource;
use crate::policy::BackoffPolicy;

/// Resolves the delay to wait after a failed attempt.
///
/// `growth_rate` is the compounding multiplier of the current run: `1.0` after
/// the first failure, multiplied by the policy's `backoff_multiplier` after
/// every further one.
///
/// ```text
/// jitter = 0                              if max_random_jitter == 0
///        = uniform in [0, max_jitter)     otherwise
/// delay  = (jitter + initial_delay) * growth_rate
/// delay  = max_backoff                    if max_backoff != 0 && delay > max_backoff
/// ```
///
/// The result is rounded to the nearest millisecond and saturates instead of overflowing.
pub fn compute_delay<J>(policy: &BackoffPolicy, growth_rate: f64, jitter: &mut J) -> Duration
where
    J: JitterSource + ?Sized,
{
    let jitter_ms = match millis(policy.max_random_jitter()) {
        0 => 0,
        upper => jitter.sample(upper),
    };
    let base_ms = jitter_ms.saturating_add(millis(policy.initial_delay()));
    let raw_ms = base_ms as f64 * growth_rate;

    let max_backoff_ms = millis(policy.max_backoff());
    if max_backoff_ms != 0 && raw_ms > max_backoff_ms as f64 {
        return policy.max_backoff();
    }

    // `as` saturates at the bounds and maps NaN to zero.
    Duration::from_millis(raw_ms.round() as u64)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
