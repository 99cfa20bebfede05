use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random component added to each backoff delay.
pub trait JitterSource {
    /// Returns a value in `[0, upper_ms)`. Only called with `upper_ms > 0`.
    fn sample(&mut self, upper_ms: u64) -> u64;
}

#[derive(Debug, Clone)]
pub struct RandomJitter<R = StdRng> {
    rng: R,
}

impl RandomJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic jitter for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> From<R> for RandomJitter<R> {
    fn from(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> JitterSource for RandomJitter<R> {
    fn sample(&mut self, upper_ms: u64) -> u64 {
        if upper_ms == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper_ms)
    }
}
