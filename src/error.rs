use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("`max_retries` cannot be negative, got {0}")]
    NegativeMaxRetries(i64),
    #[error("`max_retries` out of range: got {0}, expected at most {max}", max = u32::MAX)]
    MaxRetriesTooLarge(i64),
    #[error("`max_backoff` cannot be negative, got {0}ms")]
    NegativeMaxBackoff(i64),
    #[error("`backoff_multiplier` must be a finite number greater than zero, got {0}")]
    NonPositiveMultiplier(f64),
    #[error("`max_random_jitter` cannot be negative, got {0}ms")]
    NegativeJitter(i64),
    #[error("`initial_delay` cannot be negative, got {0}ms")]
    NegativeInitialDelay(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RetryError {
    #[error("operation was not successful before max retries, failed after {attempts} attempt(s) (max_retries = {max_retries})")]
    Exhausted { attempts: u32, max_retries: u32 },
    #[error("retry cancelled during backoff after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },
}

impl RetryError {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } | Self::Cancelled { attempts } => *attempts,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("command to retry cannot be empty")]
    EmptyCommand,
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
