//! `$name` lookups against a character's attributes.

use std::cell::RefCell;

use tracing::debug;

use crate::character::Character;
use crate::expression::VariableResolver;

/// Variable holding the character's size modifier.
pub const SIZE_MODIFIER_VARIABLE: &str = "sm";

/// Suffix selecting a pool's current value instead of its maximum.
pub const CURRENT_SUFFIX: &str = "current";

/// Answers formula variables from a character.
///
/// - `$id` is the attribute's value (truncated unless the attribute is
///   decimal)
/// - `$id.current` is a pool's value after damage
/// - `$sm` is the size modifier
///
/// Resolving one attribute may evaluate others. Every evaluation excludes
/// the attribute it belongs to for its duration, so self references and
/// cycles come back unresolved instead of recursing forever.
pub struct CharacterResolver<'a> {
    character: &'a Character,
    exclusions: RefCell<Vec<String>>,
}

impl<'a> CharacterResolver<'a> {
    pub fn new(character: &'a Character) -> Self {
        Self {
            character,
            exclusions: RefCell::new(Vec::new()),
        }
    }

    fn is_excluded(&self, attr_id: &str) -> bool {
        self.exclusions.borrow().iter().any(|name| name == attr_id)
    }
}

impl VariableResolver for CharacterResolver<'_> {
    fn resolve_variable(&self, name: &str) -> Option<f64> {
        if name == SIZE_MODIFIER_VARIABLE {
            return Some(f64::from(self.character.profile().size_modifier));
        }

        let (attr_id, part) = match name.split_once('.') {
            Some((attr_id, part)) => (attr_id, Some(part)),
            None => (name, None),
        };
        if self.is_excluded(attr_id) {
            debug!(variable = name, "attempt to resolve variable via itself");
            return None;
        }

        let attribute = self.character.attribute(attr_id)?;
        let def = attribute.def(self.character)?;
        let value = attribute.value_with(self.character, self);

        match part {
            None if def.kind.is_decimal() => Some(value),
            None => Some(value.trunc()),
            Some(CURRENT_SUFFIX) if def.is_pool() => {
                Some(f64::from((value as i32).saturating_sub(attribute.damage())))
            }
            Some(_) => None,
        }
    }

    fn add_exclusion(&self, name: &str) {
        self.exclusions.borrow_mut().push(name.to_string());
    }

    fn remove_exclusion(&self, name: &str) {
        let mut exclusions = self.exclusions.borrow_mut();
        if let Some(index) = exclusions.iter().rposition(|excluded| excluded == name) {
            exclusions.remove(index);
        }
    }
}

impl core::fmt::Debug for CharacterResolver<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CharacterResolver")
            .field("exclusions", &self.exclusions.borrow())
            .finish_non_exhaustive()
    }
}
