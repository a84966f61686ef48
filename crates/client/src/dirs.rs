//! Platform-specific directories.
//!
//! - macOS: `~/Library/Application Support/sheet`, `~/Library/Caches/sheet`
//! - Linux: `$XDG_DATA_HOME/sheet`, `$XDG_CACHE_HOME/sheet`
//! - Windows: `%APPDATA%\sheet`, `%LOCALAPPDATA%\sheet`

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "sheet")
}

/// Default attribute-set library.
pub fn library_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./sheet_data"))
        .join("library")
}

/// Default log directory.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("sheet"))
        .join("logs")
}
