//! Persisted file shapes and version checks.
//!
//! Two kinds of files are written:
//!
//! ```text
//! attribute set  {"version": 2, "type": "attribute_settings", "attributes": [...]}
//! character      {"version": 2, "type": "character", "settings": {...},
//!                 "profile": {...}, "attributes": [...]}
//! ```
//!
//! Loaders read a [`DataFileHeader`] first and call
//! [`DataFileHeader::check`] before touching the body, so a file from a
//! newer build or of the wrong kind is rejected without building anything.

use crate::attribute::{Attribute, AttributeDefs};
use crate::character::{Character, Profile};
use crate::config::SheetConfig;
use crate::error::{ErrorSeverity, SheetError};
use crate::settings::SheetSettings;

/// Version written by this build.
pub const CURRENT_VERSION: u32 = 2;

/// Oldest version this build still reads.
pub const MINIMUM_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("data file version {version} is too new (this build reads up to {current})")]
    TooNew { version: u32, current: u32 },

    #[error("data file version {version} is too old (this build reads from {minimum})")]
    TooOld { version: u32, minimum: u32 },
}

impl SheetError for VersionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooNew { .. } => "VERSION_TOO_NEW",
            Self::TooOld { .. } => "VERSION_TOO_OLD",
        }
    }
}

pub fn check_version(version: u32) -> Result<(), VersionError> {
    if version > CURRENT_VERSION {
        Err(VersionError::TooNew {
            version,
            current: CURRENT_VERSION,
        })
    } else if version < MINIMUM_VERSION {
        Err(VersionError::TooOld {
            version,
            minimum: MINIMUM_VERSION,
        })
    } else {
        Ok(())
    }
}

/// The `type` tag of a data file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum FileKind {
    AttributeSettings,
    Character,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DataFileError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("expected file type '{expected}', found '{found}'")]
    WrongType { expected: FileKind, found: String },
}

impl SheetError for DataFileError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Version(error) => error.severity(),
            Self::WrongType { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Version(error) => error.error_code(),
            Self::WrongType { .. } => "DATAFILE_WRONG_TYPE",
        }
    }
}

/// Leading fields shared by every data file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataFileHeader {
    pub version: u32,
    #[cfg_attr(feature = "serde", serde(rename = "type", default))]
    pub kind: String,
}

impl DataFileHeader {
    /// Accepts the header only if its version is readable and its type is
    /// `expected`.
    pub fn check(&self, expected: FileKind) -> Result<(), DataFileError> {
        check_version(self.version)?;
        if self.kind == expected.to_string() {
            Ok(())
        } else {
            Err(DataFileError::WrongType {
                expected,
                found: self.kind.clone(),
            })
        }
    }
}

// ============================================================================
// Attribute Records
// ============================================================================

/// Derived values written for other tools. Never read back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeCalc {
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub current: Option<i32>,
    pub points: i32,
}

/// Persisted state of one attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeRecord {
    pub attr_id: String,
    pub adj: f64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub damage: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")
    )]
    pub calc: Option<AttributeCalc>,
}

impl AttributeRecord {
    /// Snapshot of `attribute`, including the derived `calc` block.
    pub fn capture(attribute: &Attribute, character: &Character) -> Self {
        let is_pool = attribute.is_pool(character);
        let is_decimal = attribute
            .def(character)
            .is_some_and(|def| def.kind.is_decimal());
        let value = if is_decimal {
            attribute.double_value(character)
        } else {
            f64::from(attribute.int_value(character))
        };
        Self {
            attr_id: attribute.attr_id.clone(),
            adj: attribute.adjustment(),
            damage: is_pool.then(|| attribute.damage()),
            calc: Some(AttributeCalc {
                value,
                current: is_pool.then(|| attribute.current(character)),
                points: attribute.point_cost(character),
            }),
        }
    }

    pub fn into_attribute(self) -> Attribute {
        Attribute::with_state(self.attr_id, self.adj, self.damage.unwrap_or(0))
    }
}

// ============================================================================
// Files
// ============================================================================

/// Body of an attribute-set file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSetFile {
    pub version: u32,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: FileKind,
    pub attributes: AttributeDefs,
}

impl AttributeSetFile {
    pub fn new(attributes: AttributeDefs) -> Self {
        Self {
            version: CURRENT_VERSION,
            kind: FileKind::AttributeSettings,
            attributes,
        }
    }
}

/// Body of a character file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterFile {
    pub version: u32,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: FileKind,
    pub settings: SheetSettings,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: Profile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Vec<AttributeRecord>,
}

impl CharacterFile {
    pub fn capture(character: &Character) -> Self {
        Self {
            version: CURRENT_VERSION,
            kind: FileKind::Character,
            settings: character.settings().clone(),
            profile: *character.profile(),
            attributes: character
                .attributes()
                .into_iter()
                .map(|attribute| AttributeRecord::capture(attribute, character))
                .collect(),
        }
    }

    pub fn into_character(self, config: &SheetConfig) -> Character {
        Character::restore(
            self.settings,
            self.profile,
            self.attributes
                .into_iter()
                .map(AttributeRecord::into_attribute),
            config,
        )
    }
}
