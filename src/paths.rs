//! Data directory resolution for the config document and log files.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SATCHEL_DATA_DIR";

/// File name of the config document inside the data directory.
pub const CONFIG_FILE: &str = "config.yml";

/// Directory name under the XDG data home.
const APP_DIR: &str = "satchel";

fn env_path(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// What: Determine the data directory without touching the filesystem.
///
/// Inputs:
/// - `explicit`: Directory passed on the command line, if any
///
/// Output:
/// - `explicit`, else `$SATCHEL_DATA_DIR`, else `$XDG_DATA_HOME/satchel`,
///   else `$HOME/.local/share/satchel` (`./.local/share/satchel` without a home)
#[must_use]
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_path(DATA_DIR_ENV))
        .or_else(|| env_path("XDG_DATA_HOME").map(|base| base.join(APP_DIR)))
        .unwrap_or_else(|| {
            env_path("HOME")
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local/share")
                .join(APP_DIR)
        })
}

/// Data directory (ensured to exist).
#[must_use]
pub fn data_dir(explicit: Option<&Path>) -> PathBuf {
    let dir = resolve_data_dir(explicit);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Config document path under `data_dir`.
#[must_use]
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Logs directory under the data directory (ensured to exist).
#[must_use]
pub fn logs_dir(data_dir: &Path) -> PathBuf {
    let dir = data_dir.join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}
