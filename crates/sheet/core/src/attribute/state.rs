//! Per-character attribute state.

use crate::attribute::{AttributeDef, PoolThreshold, threshold};
use crate::character::Character;
use crate::expression::VariableResolver;

/// One attribute of one character.
///
/// Holds only what the player controls (`adjustment`, `damage`) plus the
/// transient modifiers the rest of the sheet feeds in (`bonus`,
/// `cost_reduction`). Everything else is derived from the definition on
/// every read. Mutation goes through [`Character`] so that edits are
/// recorded and announced.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub attr_id: String,
    pub(crate) adjustment: f64,
    pub(crate) bonus: f64,
    pub(crate) cost_reduction: i32,
    pub(crate) damage: i32,
}

impl Attribute {
    pub fn new(attr_id: impl Into<String>) -> Self {
        Self {
            attr_id: attr_id.into(),
            adjustment: 0.0,
            bonus: 0.0,
            cost_reduction: 0,
            damage: 0,
        }
    }

    /// Restores persisted state. Negative damage is clamped to 0.
    pub fn with_state(attr_id: impl Into<String>, adjustment: f64, damage: i32) -> Self {
        Self {
            adjustment,
            damage: damage.max(0),
            ..Self::new(attr_id)
        }
    }

    pub fn adjustment(&self) -> f64 {
        self.adjustment
    }

    pub fn bonus(&self) -> f64 {
        self.bonus
    }

    pub fn cost_reduction(&self) -> i32 {
        self.cost_reduction
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn def<'c>(&self, character: &'c Character) -> Option<&'c AttributeDef> {
        character.settings().attributes.get(&self.attr_id)
    }

    pub fn is_pool(&self, character: &Character) -> bool {
        self.def(character).is_some_and(AttributeDef::is_pool)
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    /// `base + adjustment + bonus`, or 0 if the definition is gone.
    pub fn double_value(&self, character: &Character) -> f64 {
        self.value_with(character, &character.resolver())
    }

    /// [`double_value`](Self::double_value) truncated toward zero.
    pub fn int_value(&self, character: &Character) -> i32 {
        self.double_value(character) as i32
    }

    /// Capacity of a pool; same as [`int_value`](Self::int_value).
    pub fn maximum(&self, character: &Character) -> i32 {
        self.int_value(character)
    }

    /// What is left of a pool after damage.
    pub fn current(&self, character: &Character) -> i32 {
        self.maximum(character).saturating_sub(self.damage)
    }

    /// Active state band of a pool, or `None` for non-pools.
    pub fn current_threshold<'c>(&self, character: &'c Character) -> Option<&'c PoolThreshold> {
        let thresholds = self.def(character)?.thresholds()?;
        let max = self.maximum(character);
        threshold::select(thresholds, max, max.saturating_sub(self.damage))
    }

    /// Points spent on the adjustment.
    pub fn point_cost(&self, character: &Character) -> i32 {
        match self.def(character) {
            Some(def) => def.compute_cost(
                self.adjustment,
                character.profile().size_modifier,
                self.cost_reduction,
                character.settings(),
            ),
            None => 0,
        }
    }

    /// Base value sharing an in-progress resolver, so exclusions added by
    /// outer evaluations stay in force.
    pub(crate) fn base_with(&self, character: &Character, resolver: &dyn VariableResolver) -> f64 {
        self.def(character)
            .map_or(0.0, |def| def.base_value(resolver))
    }

    pub(crate) fn value_with(&self, character: &Character, resolver: &dyn VariableResolver) -> f64 {
        if self.def(character).is_none() {
            return 0.0;
        }
        self.base_with(character, resolver) + self.adjustment + self.bonus
    }
}
