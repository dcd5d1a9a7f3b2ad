//! Where datapad keeps its files
//!
//! ```text
//! <config>/datapad/
//! ├── config.yaml       editor settings
//! ├── history.json      recently opened files
//! ├── favorites.json    starred files
//! └── logs/datapad.log.YYYY-MM-DD
//! ```
//!
//! `<config>` is `$XDG_CONFIG_HOME` or `~/.config` on Unix and macOS, and the
//! roaming AppData folder on Windows. Nothing else in the crate builds these
//! paths by hand.

use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "datapad";
const CONFIG_FILE: &str = "config.yaml";
const RECENT_FILE: &str = "history.json";
const FAVORITES_FILE: &str = "favorites.json";
const LOGS_DIR: &str = "logs";

/// Base name of the rolling log file; rotation appends `.YYYY-MM-DD`
pub const LOG_FILE_NAME: &str = "datapad.log";

/// The datapad config directory, if the platform has one
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = dirs::config_dir();

    #[cfg(not(target_os = "windows"))]
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|base| base.join(APP_DIR))
}

fn in_config_dir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

pub fn config_file() -> Option<PathBuf> {
    in_config_dir(CONFIG_FILE)
}

pub fn recent_files_path() -> Option<PathBuf> {
    in_config_dir(RECENT_FILE)
}

pub fn favorites_path() -> Option<PathBuf> {
    in_config_dir(FAVORITES_FILE)
}

pub fn logs_dir() -> Option<PathBuf> {
    in_config_dir(LOGS_DIR)
}

/// Newest rotated log file, or the unrotated name when none exists yet
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;
    let newest = fs::read_dir(&logs_dir)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_NAME))
        })
        // Date suffixes compare lexically
        .max();
    Some(newest.unwrap_or_else(|| logs_dir.join(LOG_FILE_NAME)))
}

fn create(dir: Option<PathBuf>) -> Result<PathBuf, String> {
    let dir = dir.ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    Ok(dir)
}

/// Create the config directory if needed and return it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    create(config_dir())
}

/// Create the logs directory (and its parent) if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    create(logs_dir())
}
