//! Client configuration from the environment.
use std::env;
use std::path::PathBuf;

use sheet_core::SheetConfig;

/// Settings for the `sheet` binary.
///
/// Environment variables (a `.env` file is honored):
/// - `SHEET_LIBRARY_DIR` - attribute-set library to scan (default: platform data dir)
/// - `SHEET_LOG_DIR` - log file directory (default: platform cache dir)
/// - `SHEET_UNDO_LIMIT` - edits kept for undo (default: 100)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub library_dir: PathBuf,
    pub log_dir: PathBuf,
    pub sheet: SheetConfig,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("SHEET_LIBRARY_DIR") {
            config.library_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env::var_os("SHEET_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(limit) = read_env::<usize>("SHEET_UNDO_LIMIT") {
            config.sheet.undo_limit = limit;
        }

        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            library_dir: crate::dirs::library_dir(),
            log_dir: crate::dirs::log_dir(),
            sheet: SheetConfig::default(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
