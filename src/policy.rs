use std::time::Duration;

use crate::error::PolicyError;

pub const DEFAULT_MAX_RETRIES: u32 = 0;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 0;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MAX_RANDOM_JITTER_MS: u64 = 1000;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 500;

/// Validated backoff parameters. A zero `max_retries` or `max_backoff` means unlimited.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    max_retries: u32,
    max_backoff: Duration,
    backoff_multiplier: f64,
    max_random_jitter: Duration,
    initial_delay: Duration,
    logging_enabled: bool,
}

impl BackoffPolicy {
    /// Builds a validated policy. Durations are given in milliseconds.
    ///
    /// Arguments are checked in declaration order and the first violation is
    /// returned, so the error for a given input is always the same.
    pub fn new(
        max_retries: i64,
        max_backoff_ms: i64,
        backoff_multiplier: f64,
        max_random_jitter_ms: i64,
        initial_delay_ms: i64,
        logging_enabled: bool,
    ) -> Result<Self, PolicyError> {
        if max_retries < 0 {
            return Err(PolicyError::NegativeMaxRetries(max_retries));
        }
        let max_retries =
            u32::try_from(max_retries).map_err(|_| PolicyError::MaxRetriesTooLarge(max_retries))?;
        let max_backoff = non_negative_millis(max_backoff_ms, PolicyError::NegativeMaxBackoff)?;
        if !backoff_multiplier.is_finite() || backoff_multiplier <= 0.0 {
            return Err(PolicyError::NonPositiveMultiplier(backoff_multiplier));
        }
        let max_random_jitter =
            non_negative_millis(max_random_jitter_ms, PolicyError::NegativeJitter)?;
        let initial_delay =
            non_negative_millis(initial_delay_ms, PolicyError::NegativeInitialDelay)?;

        Ok(Self {
            max_retries,
            max_backoff,
            backoff_multiplier,
            max_random_jitter,
            initial_delay,
            logging_enabled,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    pub fn max_random_jitter(&self) -> Duration {
        self.max_random_jitter
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// True when `max_retries` is `0` and runs only end on success or cancellation.
    pub fn is_unlimited(&self) -> bool {
        self.max_retries == 0
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            max_backoff: Duration::from_millis(DEFAULT_MAX_BACKOFF_MS),
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            max_random_jitter: Duration::from_millis(DEFAULT_MAX_RANDOM_JITTER_MS),
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            logging_enabled: false,
        }
    }
}

fn non_negative_millis(
    value: i64,
    err: fn(i64) -> PolicyError,
) -> Result<Duration, PolicyError> {
    u64::try_from(value)
        .map(Duration::from_millis)
        .map_err(|_| err(value))
}
