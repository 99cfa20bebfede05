use clap::Parser;

use crate::error::ConfigError;
use crate::policy::{
    BackoffPolicy, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_BACKOFF_MS,
    DEFAULT_MAX_RANDOM_JITTER_MS, DEFAULT_MAX_RETRIES,
};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "backoff-retry",
    version,
    about = "Re-run a command with exponential backoff until it succeeds"
)]
pub struct CliArgs {
    /// Maximum number of attempts, 0 retries forever.
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES as i64, allow_negative_numbers = true)]
    pub max_retries: i64,

    /// Ceiling on a single delay in milliseconds, 0 disables the ceiling.
    #[arg(long, default_value_t = DEFAULT_MAX_BACKOFF_MS as i64, allow_negative_numbers = true)]
    pub max_backoff_ms: i64,

    #[arg(long, default_value_t = DEFAULT_BACKOFF_MULTIPLIER, allow_negative_numbers = true)]
    pub multiplier: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_RANDOM_JITTER_MS as i64, allow_negative_numbers = true)]
    pub max_jitter_ms: i64,

    #[arg(long, default_value_t = DEFAULT_INITIAL_DELAY_MS as i64, allow_negative_numbers = true)]
    pub initial_delay_ms: i64,

    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    /// Program and arguments to run, after `--`.
    #[arg(last = true, required = true)]
    pub command: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub policy: BackoffPolicy,
    pub program: String,
    pub args: Vec<String>,
    pub verbose: bool,
}

impl CliArgs {
    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        let policy = BackoffPolicy::new(
            self.max_retries,
            self.max_backoff_ms,
            self.multiplier,
            self.max_jitter_ms,
            self.initial_delay_ms,
            self.verbose,
        )?;

        let mut command = self.command.into_iter();
        let program = match command.next() {
            Some(program) if !program.trim().is_empty() => program,
            _ => return Err(ConfigError::EmptyCommand),
        };

        Ok(AppConfig {
            policy,
            program,
            args: command.collect(),
            verbose: self.verbose,
        })
    }
}
