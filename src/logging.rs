//! Logging setup
//!
//! The dashboard owns the terminal, so its logs go to a file in the platform
//! cache directory. Print mode logs to stderr. Filtering follows the
//! `CITYCAST_LOG` environment variable (default `info`).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "CITYCAST_LOG";

/// Name of the log file inside the log directory
pub const LOG_FILE_NAME: &str = "citycast.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Directory for the log file (`~/.cache/citycast/` on Linux).
///
/// Returns `None` if no home directory can be determined.
pub fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "citycast").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Creates `dir` if needed and opens the log file in append mode
fn open_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Installs a global subscriber writing to `citycast.log` inside `dir`.
///
/// Returns the log file path. If a subscriber is already installed the call
/// leaves it in place.
pub fn init_file_logging(dir: &Path) -> io::Result<PathBuf> {
    let (path, file) = open_log_file(dir)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(path)
}

/// Installs a global subscriber writing to stderr
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init();
}
