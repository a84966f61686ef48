//! Character file loader.

use std::path::Path;

use sheet_core::{Character, CharacterFile, FileKind, SheetConfig};
use tracing::debug;

use crate::loaders::{LoadResult, parse_checked, read_file, write_json};

/// Loader for character files.
///
/// A character file embeds the full attribute set it was built under, so it
/// loads without any library present. The `calc` block of each attribute is
/// written for other tools and ignored on load.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character from a file.
    pub fn load(path: &Path, config: &SheetConfig) -> LoadResult<Character> {
        let content = read_file(path)?;
        let character = Self::from_str(&content, config)
            .map_err(|e| e.context(format!("Invalid character {}", path.display())))?;
        debug!(
            path = %path.display(),
            attributes = character.attributes().len(),
            "loaded character"
        );
        Ok(character)
    }

    /// Load a character from JSON text.
    pub fn from_str(content: &str, config: &SheetConfig) -> LoadResult<Character> {
        let file: CharacterFile = parse_checked(content, FileKind::Character)?;
        Ok(file.into_character(config))
    }

    /// Write `character`, including derived values, stamped with the current
    /// version.
    pub fn save(path: &Path, character: &Character) -> LoadResult<()> {
        write_json(path, &CharacterFile::capture(character))
    }
}
