use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::backoff::compute_delay;
use crate::diagnostics::{RetryEvent, RetrySink, TracingSink};
use crate::error::RetryError;
use crate::jitter::{JitterSource, RandomJitter};
use crate::policy::BackoffPolicy;

/// Retries `operation` with entropy-seeded jitter and no cancellation.
pub async fn retry<F, Fut, T, E>(operation: F, policy: &BackoffPolicy) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retrier::new(policy).run(operation).await
}

pub struct Retrier<'a> {
    policy: &'a BackoffPolicy,
    jitter: Box<dyn JitterSource + Send + 'a>,
    sink: Box<dyn RetrySink + Send + 'a>,
    cancel: Option<CancellationToken>,
}

impl<'a> Retrier<'a> {
    pub fn new(policy: &'a BackoffPolicy) -> Self {
        Self {
            policy,
            jitter: Box::new(RandomJitter::from_entropy()),
            sink: Box::new(TracingSink),
            cancel: None,
        }
    }

    pub fn with_jitter(mut self, jitter: impl JitterSource + Send + 'a) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    /// Events only reach the sink when the policy has logging enabled.
    pub fn with_sink(mut self, sink: impl RetrySink + Send + 'a) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Makes every backoff wait interruptible by `token`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn policy(&self) -> &BackoffPolicy {
        self.policy
    }

    /// The operation's error values are discarded.
    pub async fn run<F, Fut, T, E>(&mut self, mut operation: F) -> Result<T, RetryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_retries = self.policy.max_retries();
        let mut attempt: u32 = 1;
        let mut growth_rate: f64 = 1.0;

        loop {
            if let Ok(value) = operation().await {
                if attempt > 1 {
                    self.emit(RetryEvent::Succeeded { attempt });
                }
                return Ok(value);
            }

            if max_retries != 0 && attempt >= max_retries {
                self.emit(RetryEvent::Exhausted { attempts: attempt });
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    max_retries,
                });
            }
            self.emit(RetryEvent::AttemptFailed { attempt });

            let delay = compute_delay(self.policy, growth_rate, self.jitter.as_mut());
            self.emit(RetryEvent::Backoff { attempt, delay });
            if !pause(self.cancel.as_ref(), delay).await {
                return Err(RetryError::Cancelled { attempts: attempt });
            }

            growth_rate *= self.policy.backoff_multiplier();
            attempt = attempt.saturating_add(1);
        }
    }

    fn emit(&mut self, event: RetryEvent) {
        if self.policy.logging_enabled() {
            self.sink.record(&event);
        }
    }
}

/// Returns `false` when the wait was cut short by cancellation.
async fn pause(cancel: Option<&CancellationToken>, delay: Duration) -> bool {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        },
        None => {
            tokio::time::sleep(delay).await;
            true
        }
    }
}
