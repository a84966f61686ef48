//! Loaders for reading and writing sheet data files.

pub mod attribute_set;
pub mod character;
pub mod library;

pub use attribute_set::AttributeSetLoader;
pub use character::CharacterLoader;
pub use library::{
    ATTRIBUTE_SET_EXTENSIONS, LibraryEntry, LibraryFailure, LibraryScan, LibraryScanner,
};

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sheet_core::{DataFileHeader, FileKind};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Helper function to write a value as pretty-printed JSON.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> LoadResult<()> {
    let mut content = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("Failed to encode {}: {}", path.display(), e))?;
    content.push('\n');
    std::fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
}

/// Parses a data file body after validating its header.
///
/// The header is decoded on its own first; the body is only parsed once the
/// version and type are known to be acceptable.
pub(crate) fn parse_checked<T: DeserializeOwned>(content: &str, expected: FileKind) -> LoadResult<T> {
    let header: DataFileHeader = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} header: {}", expected, e))?;
    header.check(expected)?;
    serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} file: {}", expected, e))
}
