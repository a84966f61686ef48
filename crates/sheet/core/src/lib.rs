//! Attribute evaluation engine for GURPS character sheets.
//!
//! `sheet-core` defines the canonical calculation rules for character
//! attributes: schema definitions ([`AttributeDef`]), per-character state
//! ([`Attribute`]), point costs, pool thresholds and the small formula
//! language used by attribute bases. All mutation flows through
//! [`Character`], which records undo edits and fans out change events.
//!
//! File shapes live in [`datafile`] (serialized with the `serde` feature); the loaders
//! that read and write them live in the `sheet-content` crate.
pub mod attribute;
pub mod character;
pub mod config;
pub mod datafile;
pub mod error;
pub mod events;
pub mod expression;
pub mod history;
pub mod settings;

pub use attribute::{
    Attribute, AttributeDef, AttributeDefs, AttributeKind, AttributeType, DefinitionError,
    PoolThreshold, ReservedWords, ThresholdOps, sanitize_id,
};
pub use character::{AttributeError, Character, CharacterResolver, Profile};
pub use config::SheetConfig;
pub use datafile::{
    AttributeCalc, AttributeRecord, AttributeSetFile, CURRENT_VERSION, CharacterFile,
    DataFileError, DataFileHeader, FileKind, MINIMUM_VERSION, VersionError, check_version,
};
pub use error::{ErrorSeverity, SheetError};
pub use events::{ChangeEvent, ChangeListener, ChangeNotifier};
pub use expression::{EvalError, Evaluator, Expr, VariableResolver};
pub use history::{AttributeEdit, EditField, FieldChange, UndoHistory};
pub use settings::SheetSettings;
