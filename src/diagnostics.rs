use std::time::Duration;

use tracing::{info, warn};

/// Structured progress reported by a retry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryEvent {
    AttemptFailed { attempt: u32 },
    /// Emitted right before the run suspends for `delay`.
    Backoff { attempt: u32, delay: Duration },
    /// Only emitted when the operation needed more than one attempt.
    Succeeded { attempt: u32 },
    Exhausted { attempts: u32 },
}

pub trait RetrySink {
    fn record(&mut self, event: &RetryEvent);
}

/// Default sink, forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl RetrySink for TracingSink {
    fn record(&mut self, event: &RetryEvent) {
        match *event {
            RetryEvent::AttemptFailed { attempt } => {
                warn!(attempt, "operation was unsuccessful on attempt");
            }
            RetryEvent::Backoff { attempt, delay } => {
                info!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "backing off before next attempt"
                );
            }
            RetryEvent::Succeeded { attempt } => {
                info!(attempt, "operation was successful on attempt");
            }
            RetryEvent::Exhausted { attempts } => {
                warn!(attempts, "operation was not successful before max retries");
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl RetrySink for NoopSink {
    fn record(&mut self, _event: &RetryEvent) {}
}

impl RetrySink for Vec<RetryEvent> {
    fn record(&mut self, event: &RetryEvent) {
        self.push(event.clone());
    }
}

impl<S: RetrySink + ?Sized> RetrySink for &mut S {
    fn record(&mut self, event: &RetryEvent) {
        (**self).record(event);
    }
}
