//! Characters: attribute state plus the rules it is evaluated under.
//!
//! [`Character`] is the single mutation point for attributes. Every setter
//! follows the same sequence:
//!
//! 1. Read the old value
//! 2. Return early if nothing would change
//! 3. Record an [`AttributeEdit`] (undoable fields only)
//! 4. Write the new value
//! 5. Notify listeners
//!
//! Reads never mutate, so any number of attributes can be evaluated against
//! a shared `&Character`.

pub mod resolver;

pub use resolver::{CURRENT_SUFFIX, CharacterResolver, SIZE_MODIFIER_VARIABLE};

use std::collections::BTreeMap;

use tracing::debug;

use crate::attribute::{Attribute, ThresholdOps};
use crate::config::SheetConfig;
use crate::error::{ErrorSeverity, SheetError};
use crate::events::{ChangeEvent, ChangeListener, ChangeNotifier};
use crate::history::{AttributeEdit, EditField, FieldChange, UndoHistory};
use crate::settings::SheetSettings;

/// Errors from attribute setters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("no attribute with id '{0}'")]
    Unknown(String),

    #[error("attribute '{0}' is not a pool")]
    NotAPool(String),
}

impl SheetError for AttributeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unknown(_) => "ATTRIBUTE_UNKNOWN",
            Self::NotAPool(_) => "ATTRIBUTE_NOT_A_POOL",
        }
    }
}

/// Descriptive traits of a character that feed attribute math.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    #[cfg_attr(feature = "serde", serde(default))]
    pub size_modifier: i32,
}

/// A character sheet's attribute layer.
#[derive(Debug)]
pub struct Character {
    settings: SheetSettings,
    profile: Profile,
    attributes: BTreeMap<String, Attribute>,
    history: UndoHistory,
    notifier: ChangeNotifier,
    config: SheetConfig,
}

impl Character {
    /// Creates a character with one default attribute per definition.
    ///
    /// Definition ids are sanitized against `config.reserved_words` first.
    pub fn new(mut settings: SheetSettings, config: &SheetConfig) -> Self {
        settings.attributes.sanitize_ids(&config.reserved_words);
        let attributes = settings
            .attributes
            .ids()
            .map(|id| (id.to_string(), Attribute::new(id)))
            .collect();
        Self {
            settings,
            profile: Profile::default(),
            attributes,
            history: UndoHistory::new(config.undo_limit),
            notifier: ChangeNotifier::new(),
            config: config.clone(),
        }
    }

    /// Creates a character from persisted attribute state.
    ///
    /// Records without a matching definition are dropped. Definitions without
    /// a record get a default attribute. Damage on non-pools is discarded.
    pub fn restore(
        settings: SheetSettings,
        profile: Profile,
        records: impl IntoIterator<Item = Attribute>,
        config: &SheetConfig,
    ) -> Self {
        let mut character = Self::new(settings, config).with_profile(profile);
        for mut attribute in records {
            let Some(def) = character.settings.attributes.get(&attribute.attr_id) else {
                debug!(attr_id = %attribute.attr_id, "dropping attribute without definition");
                continue;
            };
            if !def.is_pool() {
                attribute.damage = 0;
            }
            character
                .attributes
                .insert(attribute.attr_id.clone(), attribute);
        }
        character
    }

    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn settings(&self) -> &SheetSettings {
        &self.settings
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_size_modifier(&mut self, size_modifier: i32) {
        self.profile.size_modifier = size_modifier;
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn attribute(&self, attr_id: &str) -> Option<&Attribute> {
        self.attributes.get(attr_id)
    }

    /// Attributes in display order.
    pub fn attributes(&self) -> Vec<&Attribute> {
        self.settings
            .attributes
            .ordered()
            .into_iter()
            .filter_map(|def| self.attributes.get(&def.id))
            .collect()
    }

    /// Resolver for evaluating formulas against this character.
    pub fn resolver(&self) -> CharacterResolver<'_> {
        CharacterResolver::new(self)
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) {
        self.notifier.subscribe(listener);
    }

    // ------------------------------------------------------------------------
    // Undoable setters
    // ------------------------------------------------------------------------

    /// Sets the adjustment so that the value becomes `value`.
    pub fn set_double_value(&mut self, attr_id: &str, value: f64) -> Result<(), AttributeError> {
        let attribute = self.require(attr_id)?;
        let base = attribute.base_with(self, &self.resolver());
        let adjustment = solve_adjustment(base, attribute.bonus, value);
        self.set_adjustment(attr_id, adjustment)
    }

    pub fn set_int_value(&mut self, attr_id: &str, value: i32) -> Result<(), AttributeError> {
        self.set_double_value(attr_id, f64::from(value))
    }

    pub fn set_adjustment(&mut self, attr_id: &str, adjustment: f64) -> Result<(), AttributeError> {
        let before = self.require(attr_id)?.adjustment;
        self.record(
            attr_id,
            FieldChange::Adjustment {
                before,
                after: adjustment,
            },
        );
        Ok(())
    }

    /// Sets pool damage. Negative values clamp to 0.
    pub fn set_damage(&mut self, attr_id: &str, damage: i32) -> Result<(), AttributeError> {
        let before = self.require_pool(attr_id)?.damage;
        self.record(
            attr_id,
            FieldChange::Damage {
                before,
                after: damage.max(0),
            },
        );
        Ok(())
    }

    /// Sets damage so that the pool's current value becomes `current`.
    pub fn set_current(&mut self, attr_id: &str, current: i32) -> Result<(), AttributeError> {
        let max = self.require_pool(attr_id)?.maximum(self);
        self.set_damage(attr_id, max.saturating_sub(current))
    }

    // ------------------------------------------------------------------------
    // Modifier setters (not undoable)
    // ------------------------------------------------------------------------

    pub fn set_bonus(&mut self, attr_id: &str, bonus: f64) -> Result<(), AttributeError> {
        let attribute = self.require_mut(attr_id)?;
        if attribute.bonus == bonus {
            return Ok(());
        }
        attribute.bonus = bonus;
        self.announce(attr_id, EditField::Bonus);
        Ok(())
    }

    pub fn set_cost_reduction(
        &mut self,
        attr_id: &str,
        cost_reduction: i32,
    ) -> Result<(), AttributeError> {
        let attribute = self.require_mut(attr_id)?;
        if attribute.cost_reduction == cost_reduction {
            return Ok(());
        }
        attribute.cost_reduction = cost_reduction;
        self.announce(attr_id, EditField::CostReduction);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Reverts the most recent edit. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        match self.history.take_undo() {
            Some(edit) => {
                self.replay(&edit.attr_id, edit.change.inverted());
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone edit. Returns false if there was
    /// none.
    pub fn redo(&mut self) -> bool {
        match self.history.take_redo() {
            Some(edit) => {
                self.replay(&edit.attr_id, edit.change);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Replaces the rules this character is built under.
    ///
    /// Attributes for new definitions are created, attributes whose
    /// definition disappeared are dropped, and damage on attributes that
    /// are no longer pools is cleared. Undo history does not survive.
    pub fn apply_settings(&mut self, mut settings: SheetSettings) {
        settings.attributes.sanitize_ids(&self.config.reserved_words);
        self.attributes
            .retain(|attr_id, _| settings.attributes.contains(attr_id));
        for def in settings.attributes.iter() {
            let attribute = self
                .attributes
                .entry(def.id.clone())
                .or_insert_with(|| Attribute::new(def.id.clone()));
            if !def.is_pool() {
                attribute.damage = 0;
            }
        }
        self.settings = settings;
        self.history.clear();
        debug!(attributes = self.attributes.len(), "applied sheet settings");
        self.notifier.notify(&ChangeEvent::SettingsChanged);
    }

    // ------------------------------------------------------------------------
    // Aggregates
    // ------------------------------------------------------------------------

    /// Total points spent on attributes.
    pub fn attribute_points(&self) -> i32 {
        self.attributes
            .values()
            .map(|attribute| attribute.point_cost(self))
            .sum()
    }

    /// Number of pools whose current state carries `op`.
    pub fn count_threshold_op_met(&self, op: ThresholdOps) -> usize {
        self.attributes
            .values()
            .filter_map(|attribute| attribute.current_threshold(self))
            .filter(|threshold| threshold.ops.contains(op))
            .count()
    }

    pub fn is_threshold_op_met(&self, op: ThresholdOps) -> bool {
        self.count_threshold_op_met(op) > 0
    }

    /// Cutoff of the pool state named `state` (case-insensitive) at the
    /// pool's current maximum.
    pub fn pool_threshold(&self, attr_id: &str, state: &str) -> Option<i32> {
        let attribute = self.attribute(attr_id)?;
        let threshold = attribute
            .def(self)?
            .thresholds()?
            .iter()
            .find(|threshold| threshold.state.eq_ignore_ascii_case(state))?;
        Some(threshold.threshold(attribute.maximum(self)))
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn require(&self, attr_id: &str) -> Result<&Attribute, AttributeError> {
        self.attributes
            .get(attr_id)
            .ok_or_else(|| AttributeError::Unknown(attr_id.to_string()))
    }

    fn require_mut(&mut self, attr_id: &str) -> Result<&mut Attribute, AttributeError> {
        self.attributes
            .get_mut(attr_id)
            .ok_or_else(|| AttributeError::Unknown(attr_id.to_string()))
    }

    fn require_pool(&self, attr_id: &str) -> Result<&Attribute, AttributeError> {
        let attribute = self.require(attr_id)?;
        if attribute.is_pool(self) {
            Ok(attribute)
        } else {
            Err(AttributeError::NotAPool(attr_id.to_string()))
        }
    }

    fn record(&mut self, attr_id: &str, change: FieldChange) {
        let unchanged = match change {
            FieldChange::Adjustment { before, after } => before == after,
            FieldChange::Damage { before, after } => before == after,
        };
        if unchanged {
            return;
        }
        debug!(attr_id, field = %change.field(), "recording attribute edit");
        self.history.record(AttributeEdit::new(attr_id, change));
        self.write(attr_id, change);
        self.announce(attr_id, change.field());
    }

    fn replay(&mut self, attr_id: &str, change: FieldChange) {
        debug!(attr_id, field = %change.field(), "replaying attribute edit");
        self.write(attr_id, change);
        self.notifier.notify(&ChangeEvent::HistoryReplayed {
            attr_id: attr_id.to_string(),
        });
    }

    fn write(&mut self, attr_id: &str, change: FieldChange) {
        // Attributes are only removed by apply_settings, which also clears
        // the history, so a recorded id always exists.
        let Some(attribute) = self.attributes.get_mut(attr_id) else {
            return;
        };
        match change {
            FieldChange::Adjustment { after, .. } => attribute.adjustment = after,
            FieldChange::Damage { after, .. } => attribute.damage = after,
        }
    }

    fn announce(&self, attr_id: &str, field: EditField) {
        self.notifier.notify(&ChangeEvent::AttributeChanged {
            attr_id: attr_id.to_string(),
            field,
        });
    }
}

/// Adjustment that makes `base + adjustment + bonus` read back as `value`.
///
/// Rounding in the subtraction can leave the sum a few ulps on the zero side
/// of `value`, which truncation then turns into the next integer down. The
/// adjustment is pushed away from zero by a doubling step until the sum
/// reaches `value`.
fn solve_adjustment(base: f64, bonus: f64, value: f64) -> f64 {
    const MAX_STEPS: usize = 64;

    let mut adjustment = value - (base + bonus);
    let mut step = f64::EPSILON * value.abs().max(1.0);
    for _ in 0..MAX_STEPS {
        let sum = base + adjustment + bonus;
        if value >= 0.0 && sum < value {
            adjustment += step;
        } else if value < 0.0 && sum > value {
            adjustment -= step;
        } else {
            break;
        }
        step *= 2.0;
    }
    adjustment
}
