//! Per-character sheet settings.

use crate::attribute::AttributeDefs;

/// Rules a character is built under.
///
/// Characters carry their own copy so that customizing one sheet never
/// changes another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetSettings {
    pub attributes: AttributeDefs,
    /// Know Your Own Strength: HP no longer gets the size-modifier discount.
    #[cfg_attr(feature = "serde", serde(default))]
    pub use_know_your_own_strength: bool,
}

impl SheetSettings {
    pub fn new(attributes: AttributeDefs) -> Self {
        Self {
            attributes,
            use_know_your_own_strength: false,
        }
    }

    /// Standard attributes, no optional rules.
    pub fn standard() -> Self {
        Self::new(AttributeDefs::standard())
    }

    #[must_use]
    pub fn with_know_your_own_strength(mut self, enabled: bool) -> Self {
        self.use_know_your_own_strength = enabled;
        self
    }
}
