pub mod backoff;
pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod jitter;
pub mod policy;
pub mod retry;

pub use error::{PolicyError, RetryError};
pub use policy::BackoffPolicy;
pub use retry::{Retrier, retry};
