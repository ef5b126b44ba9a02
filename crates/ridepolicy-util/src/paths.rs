//! Default paths for ridepolicy components
//!
//! Paths are user-writable by default (no root required):
//! - Data: `$XDG_DATA_HOME/ridepolicy` or `~/.local/share/ridepolicy`
//! - Database: `<data dir>/ridepolicy.db`

use std::path::PathBuf;

/// Environment variable for overriding the data directory
pub const RIDEPOLICY_DATA_DIR_ENV: &str = "RIDEPOLICY_DATA_DIR";

/// Database filename within the data directory
const DB_FILENAME: &str = "ridepolicy.db";

/// Application subdirectory name
const APP_DIR: &str = "ridepolicy";

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$RIDEPOLICY_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/ridepolicy` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/ridepolicy` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(RIDEPOLICY_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking RIDEPOLICY_DATA_DIR.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Get the default policy database path
pub fn default_db_path() -> PathBuf {
    default_data_dir().join(DB_FILENAME)
}
