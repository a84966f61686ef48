//! Attribute definitions.
//!
//! An [`AttributeDef`] is the schema half of an attribute: how its base value
//! is derived, what a point of adjustment costs, and (for pools) which state
//! bands it passes through. Definitions are shared by every character that
//! uses the same settings; per-character state lives in
//! [`Attribute`](crate::attribute::Attribute).

use tracing::warn;

use crate::attribute::{AttributeKind, AttributeType, PoolThreshold, ReservedWords, sanitize_id};
use crate::error::{ErrorSeverity, SheetError};
use crate::expression::{Evaluator, VariableResolver};
use crate::settings::SheetSettings;

/// Id of the hit point pool, exempt from size-modifier discounts under
/// Know Your Own Strength.
pub const HIT_POINTS_ID: &str = "hp";

/// Upper bound on the total percentage discount applied to a cost.
pub const MAX_COST_REDUCTION: i32 = 80;

/// Errors raised when a definition is structurally invalid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("attribute '{id}' is a pool but has no thresholds")]
    MissingThresholds { id: String },

    #[error("attribute '{id}' has type {kind} but carries thresholds")]
    UnexpectedThresholds { id: String, kind: AttributeType },
}

impl SheetError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingThresholds { .. } => "DEF_MISSING_THRESHOLDS",
            Self::UnexpectedThresholds { .. } => "DEF_UNEXPECTED_THRESHOLDS",
        }
    }
}

/// Schema of one attribute.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "AttributeDefData", into = "AttributeDefData")
)]
pub struct AttributeDef {
    pub id: String,
    pub kind: AttributeKind,
    pub name: String,
    pub full_name: String,
    /// Formula for the base value, e.g. `"10"` or `"($dx+$ht)/4"`.
    pub attribute_base: String,
    /// Display rank. Reassigned from list position on load.
    pub order: i32,
    pub cost_per_point: i32,
    pub cost_adj_percent_per_sm: i32,
}

impl AttributeDef {
    pub fn new(
        id: impl Into<String>,
        kind: AttributeKind,
        name: impl Into<String>,
        attribute_base: impl Into<String>,
        cost_per_point: i32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            full_name: String::new(),
            attribute_base: attribute_base.into(),
            order: 0,
            cost_per_point,
            cost_adj_percent_per_sm: 0,
        }
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn with_cost_adj_percent_per_sm(mut self, percent: i32) -> Self {
        self.cost_adj_percent_per_sm = percent;
        self
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.kind.attribute_type()
    }

    pub fn is_pool(&self) -> bool {
        self.kind.is_pool()
    }

    pub fn thresholds(&self) -> Option<&[PoolThreshold]> {
        self.kind.thresholds()
    }

    /// Name for tooltips and reports; falls back to `name`.
    pub fn combined_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }

    /// Returns true if the base is a plain integer rather than a formula.
    pub fn is_primary(&self) -> bool {
        self.attribute_base.parse::<i32>().is_ok()
    }

    /// Sets the id after normalizing it against `reserved`.
    pub fn set_id(&mut self, id: &str, reserved: &ReservedWords) {
        self.id = sanitize_id(id, reserved, false);
    }

    /// Evaluates the base formula.
    ///
    /// The definition's own id is excluded while evaluating, so a formula
    /// that refers back to itself sees an unresolved variable. Any
    /// evaluation error is logged and yields 0.
    pub fn base_value(&self, resolver: &dyn VariableResolver) -> f64 {
        resolver.add_exclusion(&self.id);
        let result = Evaluator::new(resolver).evaluate(&self.attribute_base);
        resolver.remove_exclusion(&self.id);

        match result {
            Ok(value) => value,
            Err(error) => {
                warn!(
                    attr_id = %self.id,
                    formula = %self.attribute_base,
                    code = error.error_code(),
                    "attribute base failed to evaluate: {error}"
                );
                0.0
            }
        }
    }

    /// Point cost of `value` points of adjustment.
    ///
    /// The discount is `cost_reduction` plus, for a positive size modifier,
    /// `size_modifier × cost_adj_percent_per_sm` (skipped for HP when Know
    /// Your Own Strength is on), clamped to `0..=80` percent. The discounted
    /// cost rounds half away from zero on the remainder: a remainder above
    /// 49 rounds up and one below -50 rounds down.
    pub fn compute_cost(
        &self,
        value: f64,
        size_modifier: i32,
        cost_reduction: i32,
        settings: &SheetSettings,
    ) -> i32 {
        let mut cost = (f64::from(self.cost_per_point) * value).floor() as i32;

        let mut reduction = cost_reduction;
        let sm_exempt = settings.use_know_your_own_strength && self.id == HIT_POINTS_ID;
        if size_modifier > 0 && self.cost_adj_percent_per_sm > 0 && !sm_exempt {
            reduction = reduction
                .saturating_add(size_modifier.saturating_mul(self.cost_adj_percent_per_sm));
        }
        let reduction = reduction.clamp(0, MAX_COST_REDUCTION);

        if reduction > 0 {
            cost = cost.saturating_mul(100 - reduction);
            let remainder = cost % 100;
            cost /= 100;
            if remainder > 49 {
                cost += 1;
            } else if remainder < -50 {
                cost -= 1;
            }
        }
        cost
    }
}

impl PartialEq for AttributeDef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.name == other.name
            && self.full_name == other.full_name
            && self.attribute_base == other.attribute_base
            && self.cost_per_point == other.cost_per_point
            && self.cost_adj_percent_per_sm == other.cost_adj_percent_per_sm
    }
}

impl Eq for AttributeDef {}

// ============================================================================
// Serialized Form
// ============================================================================

/// Flat JSON shape: the kind becomes a `type` tag plus optional thresholds.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct AttributeDefData {
    id: String,
    #[serde(rename = "type")]
    kind: AttributeType,
    name: String,
    #[serde(default)]
    full_name: String,
    attribute_base: String,
    cost_per_point: i32,
    #[serde(default)]
    cost_adj_percent_per_sm: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thresholds: Option<Vec<PoolThreshold>>,
}

#[cfg(feature = "serde")]
impl TryFrom<AttributeDefData> for AttributeDef {
    type Error = DefinitionError;

    fn try_from(data: AttributeDefData) -> Result<Self, Self::Error> {
        let kind = match (data.kind, data.thresholds) {
            (AttributeType::Pool, Some(thresholds)) => AttributeKind::Pool { thresholds },
            (AttributeType::Pool, None) => {
                return Err(DefinitionError::MissingThresholds { id: data.id });
            }
            (kind, Some(_)) => {
                return Err(DefinitionError::UnexpectedThresholds { id: data.id, kind });
            }
            (AttributeType::Integer, None) => AttributeKind::Integer,
            (AttributeType::Decimal, None) => AttributeKind::Decimal,
        };
        Ok(AttributeDef {
            id: data.id,
            kind,
            name: data.name,
            full_name: data.full_name,
            attribute_base: data.attribute_base,
            order: 0,
            cost_per_point: data.cost_per_point,
            cost_adj_percent_per_sm: data.cost_adj_percent_per_sm,
        })
    }
}

#[cfg(feature = "serde")]
impl From<AttributeDef> for AttributeDefData {
    fn from(def: AttributeDef) -> Self {
        let kind = def.kind.attribute_type();
        let thresholds = match def.kind {
            AttributeKind::Pool { thresholds } => Some(thresholds),
            _ => None,
        };
        Self {
            id: def.id,
            kind,
            name: def.name,
            full_name: def.full_name,
            attribute_base: def.attribute_base,
            cost_per_point: def.cost_per_point,
            cost_adj_percent_per_sm: def.cost_adj_percent_per_sm,
            thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::attribute::ThresholdOps;

    fn st() -> AttributeDef {
        AttributeDef::new("st", AttributeKind::Integer, "ST", "10", 10)
            .with_cost_adj_percent_per_sm(10)
    }

    fn settings() -> SheetSettings {
        SheetSettings::default()
    }

    #[test]
    fn cost_reduction_rounds_on_remainder() {
        let settings = settings();
        let def = AttributeDef::new("x", AttributeKind::Integer, "X", "10", 2);
        // 22 × 55% = 12.10
        assert_eq!(def.compute_cost(11.0, 0, 45, &settings), 12);

        let def = AttributeDef::new("x", AttributeKind::Integer, "X", "10", 10);
        // 10 × 55% = 5.50
        assert_eq!(def.compute_cost(1.0, 0, 45, &settings), 6);
        // -10 × 55% = -5.50, remainder -50 truncates
        assert_eq!(def.compute_cost(-1.0, 0, 45, &settings), -5);
        // -30 × 55% = -16.50
        assert_eq!(def.compute_cost(-3.0, 0, 45, &settings), -16);

        let def = AttributeDef::new("x", AttributeKind::Integer, "X", "10", 1);
        // -3 × 60% = -1.80, remainder -80 rounds down
        assert_eq!(def.compute_cost(-3.0, 0, 40, &settings), -2);
        // -7 × 90% = -6.30
        assert_eq!(def.compute_cost(-7.0, 0, 10, &settings), -6);
    }

    #[test]
    fn no_reduction_floors_the_raw_cost() {
        let def = AttributeDef::new("bs", AttributeKind::Decimal, "Basic Speed", "5", 20);
        assert_eq!(def.compute_cost(0.25, 0, 0, &settings()), 5);
        assert_eq!(def.compute_cost(-0.26, 0, 0, &settings()), -6);
    }

    #[test]
    fn size_modifier_discount_is_clamped() {
        let settings = settings();
        // SM 2 × 10% = 20% off 30 points
        assert_eq!(st().compute_cost(3.0, 2, 0, &settings), 24);
        // SM 12 would be 120%, capped at 80%
        assert_eq!(st().compute_cost(10.0, 12, 0, &settings), 20);
        // Negative SM grants nothing
        assert_eq!(st().compute_cost(3.0, -2, 0, &settings), 30);
        // Negative reductions clamp to 0
        assert_eq!(st().compute_cost(3.0, 0, -20, &settings), 30);
    }

    #[test]
    fn know_your_own_strength_exempts_hit_points() {
        let mut settings = settings();
        let hp = AttributeDef::new(
            HIT_POINTS_ID,
            AttributeKind::pool(vec![PoolThreshold::new("Healthy", 1, 1, 0)]),
            "HP",
            "$st",
            2,
        )
        .with_cost_adj_percent_per_sm(10);

        assert_eq!(hp.compute_cost(10.0, 3, 0, &settings), 14);
        settings.use_know_your_own_strength = true;
        assert_eq!(hp.compute_cost(10.0, 3, 0, &settings), 20);
        // Other attributes still get the discount.
        assert_eq!(st().compute_cost(1.0, 3, 0, &settings), 7);
    }

    #[test]
    fn base_value_excludes_itself() {
        let mut vars = HashMap::new();
        vars.insert("iq".to_string(), 12.0);
        let will = AttributeDef::new("will", AttributeKind::Integer, "Will", "$iq", 5);
        assert_eq!(will.base_value(&vars), 12.0);

        let broken = AttributeDef::new("odd", AttributeKind::Integer, "Odd", "$nope + 1", 5);
        assert_eq!(broken.base_value(&vars), 0.0);
    }

    #[test]
    fn primary_means_integer_literal() {
        assert!(st().is_primary());
        let will = AttributeDef::new("will", AttributeKind::Integer, "Will", "$iq", 5);
        assert!(!will.is_primary());
        let speed = AttributeDef::new("bs", AttributeKind::Decimal, "BS", "5.25", 20);
        assert!(!speed.is_primary());
    }

    #[test]
    fn set_id_sanitizes() {
        let mut def = st();
        def.set_id("Dodge", &ReservedWords::default());
        assert_eq!(def.id, "dodge_");
    }

    #[test]
    fn equality_ignores_order() {
        assert_eq!(st().with_order(1), st().with_order(9));
        assert_ne!(st(), st().with_full_name("Strength"));
        assert_eq!(st().combined_name(), "ST");
        assert_eq!(st().with_full_name("Strength").combined_name(), "Strength");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn pool_round_trips_through_json() {
        let def = AttributeDef::new(
            "fp",
            AttributeKind::pool(vec![
                PoolThreshold::new("Unconscious", -1, 1, 0).with_ops(
                    ThresholdOps::HALVE_ST | ThresholdOps::HALVE_DODGE | ThresholdOps::HALVE_MOVE,
                ),
                PoolThreshold::new("Rested", 1, 1, 0),
            ]),
            "FP",
            "$ht",
            3,
        )
        .with_full_name("Fatigue Points");

        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["type"], "pool");
        assert_eq!(json["thresholds"][0]["ops"][0], "halve_dodge");
        assert!(json.get("order").is_none());

        let back: AttributeDef = serde_json::from_value(json).unwrap();
        assert_eq!(back, def);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn wrong_type_tag_is_rejected() {
        let missing = serde_json::json!({
            "id": "hp", "type": "pool", "name": "HP",
            "attribute_base": "$st", "cost_per_point": 2,
        });
        let err = serde_json::from_value::<AttributeDef>(missing).unwrap_err();
        assert!(err.to_string().contains("no thresholds"));

        let extra = serde_json::json!({
            "id": "st", "type": "integer", "name": "ST",
            "attribute_base": "10", "cost_per_point": 10,
            "thresholds": [],
        });
        let err = serde_json::from_value::<AttributeDef>(extra).unwrap_err();
        assert!(err.to_string().contains("carries thresholds"));
    }
}
