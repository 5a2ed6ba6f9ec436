//! File-backed operational log. The TUI owns the terminal, so diagnostics go
//! to a plain-text file under the user's home directory instead of stderr.
//! Search transport failures land here (the UI deliberately shows no banner
//! for them), as do login outcomes — never the password itself.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use tracing_subscriber::EnvFilter;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".game-video-browser";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "browser.log";

/// Install the global tracing subscriber writing to the application log file,
/// creating the data directory on first run. Returns the log path so the
/// caller can mention it in fatal error output.
pub fn init() -> Result<PathBuf> {
    let path = log_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("failed to open log file")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(path)
}

/// Resolve the absolute path to the log file inside the user's home.
fn log_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
