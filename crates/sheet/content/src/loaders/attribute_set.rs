//! Attribute-set file loader.

use std::path::Path;

use sheet_core::datafile::AttributeSetFile;
use sheet_core::{AttributeDefs, FileKind};

use crate::loaders::{LoadResult, parse_checked, read_file, write_json};

/// Loader for attribute-set files.
///
/// File format:
/// ```json
/// {
///   "version": 2,
///   "type": "attribute_settings",
///   "attributes": [
///     { "id": "st", "type": "integer", "name": "ST", "attribute_base": "10",
///       "cost_per_point": 10, "cost_adj_percent_per_sm": 10 }
///   ]
/// }
/// ```
pub struct AttributeSetLoader;

impl AttributeSetLoader {
    /// Load an attribute set from a file.
    pub fn load(path: &Path) -> LoadResult<AttributeDefs> {
        let content = read_file(path)?;
        Self::from_str(&content)
            .map_err(|e| e.context(format!("Invalid attribute set {}", path.display())))
    }

    /// Load an attribute set from JSON text.
    pub fn from_str(content: &str) -> LoadResult<AttributeDefs> {
        let file: AttributeSetFile = parse_checked(content, FileKind::AttributeSettings)?;
        Ok(file.attributes)
    }

    /// Write `attributes` in display order, stamped with the current version.
    pub fn save(path: &Path, attributes: &AttributeDefs) -> LoadResult<()> {
        write_json(path, &AttributeSetFile::new(attributes.clone()))
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::{DataFileError, VersionError};

    use super::*;

    #[test]
    fn reads_minimal_set() {
        let defs = AttributeSetLoader::from_str(
            r#"{
                "version": 1,
                "type": "attribute_settings",
                "attributes": [
                    { "id": "luck", "type": "integer", "name": "Luck",
                      "attribute_base": "10", "cost_per_point": 15 },
                    { "id": "mp", "type": "pool", "name": "MP", "attribute_base": "$luck",
                      "cost_per_point": 3,
                      "thresholds": [{ "state": "Full", "multiplier": 1, "divisor": 1 }] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs.get("mp").unwrap().order, 1);
        assert!(defs.get("mp").unwrap().is_pool());
    }

    #[test]
    fn too_new_is_rejected_before_parsing_body() {
        let err = AttributeSetLoader::from_str(
            r#"{ "version": 3, "type": "attribute_settings", "attributes": 7 }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataFileError>(),
            Some(DataFileError::Version(VersionError::TooNew { version: 3, .. }))
        ));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = AttributeSetLoader::from_str(r#"{ "version": 2, "type": "character" }"#)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataFileError>(),
            Some(DataFileError::WrongType { .. })
        ));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(AttributeSetLoader::from_str("{ not json").is_err());
        assert!(AttributeSetLoader::from_str(r#"{ "type": "attribute_settings" }"#).is_err());
    }
}
