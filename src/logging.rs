//! Logging init for the command-line front-end.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,file_urls=info";

/// Initialize structured logging to stderr, filtered by `RUST_LOG`.
///
/// Stdout is reserved for command output, so log lines never mix with canonical URLs or
/// rewritten payloads.
pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!("file_urls logging initialized");
    Ok(())
}
