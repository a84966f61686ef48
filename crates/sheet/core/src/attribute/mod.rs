//! Attribute system.
//!
//! # Architecture
//!
//! ```text
//! [ AttributeDefs ]  schema, loaded once per settings file
//!      ↓
//! [ AttributeDef ]   formula base, cost rates, optional pool thresholds
//!      ↓
//! [ Attribute ]      per-character adjustment / bonus / damage
//!      ↓
//! [ PoolThreshold ]  state band selected from (max, damage)
//! ```
//!
//! ## Principles
//!
//! 1. **Stored vs computed**: only `adjustment` and `damage` are persisted;
//!    values, costs and pool states are always recomputed
//! 2. **Never crash the sheet**: formula failures degrade to 0 with a logged
//!    warning
//! 3. **Structural pools**: thresholds exist only on the `Pool` variant of
//!    [`AttributeKind`]

pub mod def;
pub mod defs;
pub mod kind;
pub mod reserved;
pub mod state;
pub mod threshold;

pub use def::{AttributeDef, DefinitionError, HIT_POINTS_ID, MAX_COST_REDUCTION};
pub use defs::AttributeDefs;
pub use kind::{AttributeKind, AttributeType};
pub use reserved::{ReservedWords, sanitize_id};
pub use state::Attribute;
pub use threshold::{PoolThreshold, ThresholdOps};
