//! Logger setup.
//!
//! The game owns the terminal, so log records never go to stderr: they go to
//! a file when one is configured and are dropped otherwise.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

/// Install the global logger writing to `path`. Filters come from
/// `RUST_LOG`, defaulting to `info`.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init()
        .context("install logger")?;

    log::debug!("logging initialized");
    Ok(())
}
