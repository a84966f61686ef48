//! Undo log for attribute edits.
//!
//! Each edit is stored as data: which attribute, which field, and the value
//! before and after. Undo writes `before` back, redo writes `after`. Nothing
//! captures references into the character, so the log can be serialized
//! alongside it.

use std::collections::VecDeque;

/// Attribute field an edit touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EditField {
    Adjustment,
    Damage,
    Bonus,
    CostReduction,
}

/// Old and new value of one field.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "field", rename_all = "snake_case"))]
pub enum FieldChange {
    Adjustment { before: f64, after: f64 },
    Damage { before: i32, after: i32 },
}

impl FieldChange {
    pub const fn field(&self) -> EditField {
        match self {
            FieldChange::Adjustment { .. } => EditField::Adjustment,
            FieldChange::Damage { .. } => EditField::Damage,
        }
    }

    /// The same change played backwards.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            FieldChange::Adjustment { before, after } => FieldChange::Adjustment {
                before: after,
                after: before,
            },
            FieldChange::Damage { before, after } => FieldChange::Damage {
                before: after,
                after: before,
            },
        }
    }
}

/// One undoable edit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeEdit {
    pub attr_id: String,
    pub change: FieldChange,
}

impl AttributeEdit {
    pub fn new(attr_id: impl Into<String>, change: FieldChange) -> Self {
        Self {
            attr_id: attr_id.into(),
            change,
        }
    }
}

/// Bounded undo/redo stacks.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UndoHistory {
    done: VecDeque<AttributeEdit>,
    undone: Vec<AttributeEdit>,
    limit: usize,
}

impl UndoHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            done: VecDeque::new(),
            undone: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Pushes a new edit. Clears the redo stack and drops the oldest edit
    /// once `limit` is exceeded. A limit of 0 records nothing.
    pub fn record(&mut self, edit: AttributeEdit) {
        self.undone.clear();
        if self.limit == 0 {
            return;
        }
        self.done.push_back(edit);
        while self.done.len() > self.limit {
            self.done.pop_front();
        }
    }

    /// Pops the most recent edit, moving it onto the redo stack.
    pub fn take_undo(&mut self) -> Option<AttributeEdit> {
        let edit = self.done.pop_back()?;
        self.undone.push(edit.clone());
        Some(edit)
    }

    /// Pops the most recently undone edit, moving it back onto the undo stack.
    pub fn take_redo(&mut self) -> Option<AttributeEdit> {
        let edit = self.undone.pop()?;
        self.done.push_back(edit.clone());
        Some(edit)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.done.len()
    }

    pub fn redo_len(&self) -> usize {
        self.undone.len()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damage(attr_id: &str, before: i32, after: i32) -> AttributeEdit {
        AttributeEdit::new(attr_id, FieldChange::Damage { before, after })
    }

    #[test]
    fn undo_then_redo_moves_between_stacks() {
        let mut history = UndoHistory::new(10);
        history.record(damage("hp", 0, 3));
        history.record(damage("hp", 3, 5));

        assert_eq!(history.take_undo(), Some(damage("hp", 3, 5)));
        assert!(history.can_redo());
        assert_eq!(history.take_redo(), Some(damage("hp", 3, 5)));
        assert!(!history.can_redo());
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn recording_clears_redo() {
        let mut history = UndoHistory::new(10);
        history.record(damage("hp", 0, 3));
        history.take_undo();
        history.record(damage("fp", 0, 1));
        assert!(!history.can_redo());
        assert_eq!(history.take_undo(), Some(damage("fp", 0, 1)));
        assert_eq!(history.take_undo(), None);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = UndoHistory::new(2);
        history.record(damage("hp", 0, 1));
        history.record(damage("hp", 1, 2));
        history.record(damage("hp", 2, 3));
        assert_eq!(history.undo_len(), 2);
        assert_eq!(history.take_undo(), Some(damage("hp", 2, 3)));
        assert_eq!(history.take_undo(), Some(damage("hp", 1, 2)));
        assert_eq!(history.take_undo(), None);

        let mut disabled = UndoHistory::new(0);
        disabled.record(damage("hp", 0, 1));
        assert!(!disabled.can_undo());
    }

    #[test]
    fn inverted_swaps_values() {
        let change = FieldChange::Adjustment {
            before: 1.0,
            after: 2.5,
        };
        assert_eq!(
            change.inverted(),
            FieldChange::Adjustment {
                before: 2.5,
                after: 1.0
            }
        );
        assert_eq!(change.field(), EditField::Adjustment);
        assert_eq!(EditField::CostReduction.to_string(), "cost_reduction");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn edits_serialize_as_tagged_values() {
        let edit = AttributeEdit::new(
            "st",
            FieldChange::Adjustment {
                before: 0.0,
                after: 2.0,
            },
        );
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "attr_id": "st",
                "change": { "field": "adjustment", "before": 0.0, "after": 2.0 },
            })
        );
        let back: AttributeEdit = serde_json::from_value(json).unwrap();
        assert_eq!(back, edit);
    }
}
