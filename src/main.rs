use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use backoff_retry::cli::{AppConfig, CliArgs};
use backoff_retry::{Retrier, RetryError};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = args.into_config()?;

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        }
    });

    run_with_retry(&config, shutdown).await
}

async fn run_with_retry(config: &AppConfig, shutdown: CancellationToken) -> Result<()> {
    let mut retrier = Retrier::new(&config.policy).with_cancellation(shutdown);

    let result = retrier.run(|| run_once(config)).await;

    match result {
        Ok(()) => Ok(()),
        Err(RetryError::Cancelled { attempts }) => {
            info!(attempts, "shutdown requested during retry backoff, exiting");
            Ok(())
        }
        Err(err @ RetryError::Exhausted { .. }) => {
            Err(err).with_context(|| format!("`{}` kept failing", config.program))
        }
    }
}

async fn run_once(config: &AppConfig) -> Result<()> {
    let status = Command::new(&config.program)
        .args(&config.args)
        .status()
        .await
        .with_context(|| format!("failed to spawn `{}`", config.program))
        .inspect_err(|err| warn!(error = %err, "command could not be started"))?;

    if !status.success() {
        warn!(%status, program = %config.program, "command failed");
        bail!("`{}` exited with status {status}", config.program);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("info,backoff_retry=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
