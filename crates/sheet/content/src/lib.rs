//! Data files for character sheets.
//!
//! This crate reads and writes the JSON files described by
//! [`sheet_core::datafile`]:
//! - Attribute sets (`*.attr`), the definitions a character is built under
//! - Characters, attribute state plus an embedded copy of their settings
//! - Libraries, directory trees of attribute sets scanned in one pass
//!
//! Every loader checks the file header before parsing the body, so a file of
//! the wrong type or from a newer build fails without producing partial data.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ATTRIBUTE_SET_EXTENSIONS, AttributeSetLoader, CharacterLoader, LibraryEntry, LibraryFailure,
    LibraryScan, LibraryScanner, LoadResult,
};
