//! Attribute sets.

use std::collections::BTreeMap;

use crate::attribute::{
    AttributeDef, AttributeKind, PoolThreshold, ReservedWords, ThresholdOps, sanitize_id,
};

/// All attribute definitions of one settings profile, keyed by id.
///
/// Serialized as an array in display order; loading assigns each
/// definition's `order` from its array position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<AttributeDef>", into = "Vec<AttributeDef>")
)]
pub struct AttributeDefs {
    defs: BTreeMap<String, AttributeDef>,
}

impl AttributeDefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock GURPS 4th Edition attribute set.
    pub fn standard() -> Self {
        let defs = vec![
            integer("st", "ST", "Strength", "10", 10).with_cost_adj_percent_per_sm(10),
            integer("dx", "DX", "Dexterity", "10", 20),
            integer("iq", "IQ", "Intelligence", "10", 20),
            integer("ht", "HT", "Health", "10", 10),
            integer("will", "Will", "", "$iq", 5),
            integer("fright_check", "Fright Check", "", "$will", 2),
            integer("per", "Per", "Perception", "$iq", 5),
            integer("vision", "Vision", "", "$per", 2),
            integer("hearing", "Hearing", "", "$per", 2),
            integer("taste_smell", "Taste & Smell", "", "$per", 2),
            integer("touch", "Touch", "", "$per", 2),
            AttributeDef::new("basic_speed", AttributeKind::Decimal, "Basic Speed", "($dx+$ht)/4", 20),
            integer("basic_move", "Basic Move", "", "floor($basic_speed)", 5),
            AttributeDef::new("fp", AttributeKind::pool(fatigue_thresholds()), "FP", "$ht", 3)
                .with_full_name("Fatigue Points"),
            AttributeDef::new("hp", AttributeKind::pool(hit_point_thresholds()), "HP", "$st", 2)
                .with_full_name("Hit Points")
                .with_cost_adj_percent_per_sm(10),
        ];
        Self::from(defs)
    }

    pub fn get(&self, id: &str) -> Option<&AttributeDef> {
        self.defs.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut AttributeDef> {
        self.defs.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.defs.contains_key(id)
    }

    /// Inserts `def`, returning the definition it replaced.
    pub fn insert(&mut self, def: AttributeDef) -> Option<AttributeDef> {
        self.defs.insert(def.id.clone(), def)
    }

    pub fn remove(&mut self, id: &str) -> Option<AttributeDef> {
        self.defs.remove(id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDef> {
        self.defs.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.defs.keys().map(String::as_str)
    }

    /// Definitions in display order (by `order`, then id).
    pub fn ordered(&self) -> Vec<&AttributeDef> {
        let mut ordered: Vec<&AttributeDef> = self.defs.values().collect();
        ordered.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        ordered
    }

    /// Re-keys every definition under its sanitized id.
    ///
    /// Definitions are processed in display order; an id that collides with
    /// one already taken gets `_` appended until it is unique.
    pub fn sanitize_ids(&mut self, reserved: &ReservedWords) {
        let ordered: Vec<AttributeDef> = self.ordered().into_iter().cloned().collect();
        self.defs.clear();
        for mut def in ordered {
            let mut id = sanitize_id(&def.id, reserved, false);
            while self.defs.contains_key(&id) {
                id.push('_');
            }
            def.id = id;
            self.insert(def);
        }
    }
}

/// Orders come from list position. A repeated id gets `_` appended until
/// it is unique, so no definition is lost.
impl From<Vec<AttributeDef>> for AttributeDefs {
    fn from(list: Vec<AttributeDef>) -> Self {
        let mut defs = BTreeMap::new();
        for (index, mut def) in list.into_iter().enumerate() {
            def.order = i32::try_from(index).unwrap_or(i32::MAX);
            while defs.contains_key(&def.id) {
                def.id.push('_');
            }
            defs.insert(def.id.clone(), def);
        }
        Self { defs }
    }
}

impl From<AttributeDefs> for Vec<AttributeDef> {
    fn from(defs: AttributeDefs) -> Self {
        defs.ordered().into_iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a AttributeDefs {
    type Item = &'a AttributeDef;
    type IntoIter = std::collections::btree_map::Values<'a, String, AttributeDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.defs.values()
    }
}

// ============================================================================
// Standard Definitions
// ============================================================================

fn integer(id: &str, name: &str, full_name: &str, base: &str, cost: i32) -> AttributeDef {
    AttributeDef::new(id, AttributeKind::Integer, name, base, cost).with_full_name(full_name)
}

fn fatigue_thresholds() -> Vec<PoolThreshold> {
    let all = ThresholdOps::HALVE_MOVE | ThresholdOps::HALVE_DODGE | ThresholdOps::HALVE_ST;
    vec![
        PoolThreshold::new("Unconscious", -1, 1, 0).with_ops(all),
        PoolThreshold::new("Collapse", 0, 1, 0)
            .with_explanation(
                "Roll vs. Will to do anything besides talk or rest; failure causes unconsciousness\n\
                 Each FP you lose below 0 also causes 1 HP of injury\n\
                 Move, Dodge and ST are halved (B426)",
            )
            .with_ops(all),
        PoolThreshold::new("Tired", 1, 3, 0)
            .with_explanation("Move, Dodge and ST are halved (B426)")
            .with_ops(all),
        PoolThreshold::new("Tiring", 1, 1, -1),
        PoolThreshold::new("Rested", 1, 1, 0),
    ]
}

fn hit_point_thresholds() -> Vec<PoolThreshold> {
    let halved = ThresholdOps::HALVE_MOVE | ThresholdOps::HALVE_DODGE;
    let mut thresholds = vec![PoolThreshold::new("Dead", -5, 1, 0).with_ops(halved)];
    for multiplier in -4..0 {
        thresholds.push(
            PoolThreshold::new(format!("Dying #{}", -multiplier), multiplier, 1, 0)
                .with_explanation(format!(
                    "Roll vs. HT to avoid death\n\
                     Roll vs. HT{multiplier} every second to avoid falling unconscious\n\
                     Move and Dodge are halved (B419)"
                ))
                .with_ops(halved),
        );
    }
    thresholds.extend([
        PoolThreshold::new("Collapse", 0, 1, 0)
            .with_explanation(
                "Roll vs. HT every second to avoid falling unconscious\n\
                 Move and Dodge are halved (B419)",
            )
            .with_ops(halved),
        PoolThreshold::new("Reeling", 1, 3, 0)
            .with_explanation("Move and Dodge are halved (B419)")
            .with_ops(halved),
        PoolThreshold::new("Wounded", 1, 1, -1),
        PoolThreshold::new("Healthy", 1, 1, 0),
    ]);
    thresholds
}
