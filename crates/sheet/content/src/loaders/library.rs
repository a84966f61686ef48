//! Attribute-set library scanning.

use std::path::{Path, PathBuf};

use sheet_core::AttributeDefs;
use tracing::{info, warn};

use crate::loaders::{AttributeSetLoader, LoadResult};

/// File extensions treated as attribute sets.
pub const ATTRIBUTE_SET_EXTENSIONS: [&str; 2] = ["attr", "json"];

/// An attribute set found in a library.
#[derive(Clone, Debug)]
pub struct LibraryEntry {
    pub path: PathBuf,
    pub attributes: AttributeDefs,
}

/// A library file that could not be loaded.
#[derive(Clone, Debug)]
pub struct LibraryFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a library scan.
#[derive(Clone, Debug, Default)]
pub struct LibraryScan {
    /// Loaded sets, sorted by path.
    pub entries: Vec<LibraryEntry>,
    /// Files that were skipped, sorted by path.
    pub failures: Vec<LibraryFailure>,
}

/// Scans a directory tree for attribute sets.
///
/// Hidden files and directories (leading `.`) are ignored. A file that fails
/// to load is logged and recorded as a failure; it never aborts the scan.
pub struct LibraryScanner {
    root: PathBuf,
}

impl LibraryScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the library and load every attribute set in it.
    ///
    /// Only an unreadable root directory is an error.
    pub fn scan(&self) -> LoadResult<LibraryScan> {
        let mut files = Vec::new();
        collect_files(&self.root, &mut files).map_err(|e| {
            anyhow::anyhow!("Failed to scan library {}: {}", self.root.display(), e)
        })?;
        files.sort();

        let mut scan = LibraryScan::default();
        for path in files {
            match AttributeSetLoader::load(&path) {
                Ok(attributes) => scan.entries.push(LibraryEntry { path, attributes }),
                Err(error) => {
                    warn!(path = %path.display(), "skipping library file: {error:#}");
                    scan.failures.push(LibraryFailure {
                        path,
                        reason: format!("{error:#}"),
                    });
                }
            }
        }

        info!(
            root = %self.root.display(),
            loaded = scan.entries.len(),
            skipped = scan.failures.len(),
            "scanned attribute library"
        );
        Ok(scan)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn is_attribute_set(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ATTRIBUTE_SET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_hidden(&path) {
            continue;
        }
        if path.is_dir() {
            if let Err(error) = collect_files(&path, files) {
                warn!(path = %path.display(), "skipping unreadable directory: {error}");
            }
        } else if is_attribute_set(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_extensions_and_hidden_names() {
        assert!(is_attribute_set(Path::new("lib/standard.attr")));
        assert!(is_attribute_set(Path::new("lib/Custom.JSON")));
        assert!(!is_attribute_set(Path::new("lib/notes.txt")));
        assert!(!is_attribute_set(Path::new("lib/attr")));
        assert!(is_hidden(Path::new("lib/.git")));
        assert!(!is_hidden(Path::new("lib/git")));
    }
}
