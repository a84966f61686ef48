//! Attribute id vocabulary.
//!
//! Ids appear in formulas as `$id`, so they may not collide with names the
//! formula layer already gives meaning to.

use std::collections::BTreeSet;

/// Ids an attribute may not take.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReservedWords {
    words: BTreeSet<String>,
}

impl ReservedWords {
    pub const DEFAULT_WORDS: [&'static str; 5] = ["skill", "parry", "block", "dodge", "sm"];

    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn with(mut self, word: impl Into<String>) -> Self {
        self.words.insert(word.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WORDS)
    }
}

/// Normalize a user-supplied id.
///
/// Lowercases, keeps only `[a-z0-9_]`, drops leading digits unless
/// `permit_leading_digits`, and appends `_` until the result is not a
/// reserved word. Never returns an empty string.
pub fn sanitize_id(id: &str, reserved: &ReservedWords, permit_leading_digits: bool) -> String {
    let mut out = String::with_capacity(id.len());
    for ch in id.chars().flat_map(char::to_lowercase) {
        let keep = ch == '_'
            || ch.is_ascii_lowercase()
            || (ch.is_ascii_digit() && (permit_leading_digits || !out.is_empty()));
        if keep {
            out.push(ch);
        }
    }
    if out.is_empty() {
        out.push('_');
    }
    while reserved.contains(&out) {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_invalid_characters() {
        let reserved = ReservedWords::default();
        assert_eq!(sanitize_id("Taste & Smell", &reserved, false), "tastesmell");
        assert_eq!(sanitize_id("Basic_Speed", &reserved, false), "basic_speed");
        assert_eq!(sanitize_id("Ünïcode", &reserved, false), "ncode");
    }

    #[test]
    fn leading_digits_depend_on_permission() {
        let reserved = ReservedWords::default();
        assert_eq!(sanitize_id("3rd_eye", &reserved, false), "rd_eye");
        assert_eq!(sanitize_id("3rd_eye", &reserved, true), "3rd_eye");
        assert_eq!(sanitize_id("x9", &reserved, false), "x9");
    }

    #[test]
    fn reserved_words_gain_underscores() {
        let reserved = ReservedWords::default().with("dodge_");
        assert_eq!(sanitize_id("SM", &reserved, false), "sm_");
        assert_eq!(sanitize_id("Dodge", &reserved, false), "dodge__");
        assert_eq!(sanitize_id("st", &reserved, false), "st");
    }

    #[test]
    fn empty_ids_become_underscore() {
        assert_eq!(sanitize_id("", &ReservedWords::empty(), false), "_");
        assert_eq!(sanitize_id("123", &ReservedWords::empty(), false), "_");
    }
}
