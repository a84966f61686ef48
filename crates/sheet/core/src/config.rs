use crate::attribute::ReservedWords;

/// Sheet configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetConfig {
    /// Number of edits kept for undo. The oldest edit is dropped beyond this.
    pub undo_limit: usize,
    /// Ids attribute definitions may not take.
    pub reserved_words: ReservedWords,
}

impl SheetConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_UNDO_LIMIT: usize = 100;

    pub fn new() -> Self {
        Self {
            undo_limit: Self::DEFAULT_UNDO_LIMIT,
            reserved_words: ReservedWords::default(),
        }
    }

    #[must_use]
    pub fn with_undo_limit(mut self, undo_limit: usize) -> Self {
        self.undo_limit = undo_limit;
        self
    }

    #[must_use]
    pub fn with_reserved_words(mut self, reserved_words: ReservedWords) -> Self {
        self.reserved_words = reserved_words;
        self
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}
