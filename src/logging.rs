//! Tracing setup
//!
//! The TUI owns the terminal, so interactive runs log to a file under the
//! user's cache directory. Headless runs log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const ENV_VAR: &str = "DISKPIE_LOG";

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "diskpie=debug" } else { "diskpie=info" };
    EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default))
}

/// `<cache_dir>/diskpie/diskpie.log`
pub fn log_file_path() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("diskpie");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;
    Ok(dir.join("diskpie.log"))
}

/// Route logs to the cache log file; returns where they go
pub fn init_file(verbose: bool) -> Result<PathBuf> {
    let path = log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to install logger")?;
    Ok(path)
}

pub fn init_stderr(verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("Failed to install logger")
}
