use std::path::{Path, PathBuf};

/// File name of the persisted marker registry inside a session scratch directory
pub const MARKERS_DB_FILE: &str = "source_markers_db";

/// Returns the path to the data directory for session-markers.
/// Uses $XDG_DATA_HOME/session-markers if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/session-markers,
/// or ./session-markers if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default session scratch directory.
pub fn scratch_dir() -> PathBuf {
    data_dir().join("scratch")
}

/// Returns the path of the persisted marker registry for a scratch directory.
pub fn markers_db_path(scratch_dir: &Path) -> PathBuf {
    scratch_dir.join(MARKERS_DB_FILE)
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("session-markers.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("session-markers")
}
