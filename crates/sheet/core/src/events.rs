//! Change notification.
//!
//! Listeners are told *that* something changed, not the new value; they
//! re-read whatever they display from the character.

use crate::history::EditField;

/// What changed on a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ChangeEvent {
    /// A field of one attribute was set.
    AttributeChanged { attr_id: String, field: EditField },

    /// The attribute definitions or optional rules were replaced.
    SettingsChanged,

    /// An undo or redo rewrote an attribute.
    HistoryReplayed { attr_id: String },
}

impl ChangeEvent {
    /// Attribute the event is about, if any.
    pub fn attr_id(&self) -> Option<&str> {
        match self {
            ChangeEvent::AttributeChanged { attr_id, .. }
            | ChangeEvent::HistoryReplayed { attr_id } => Some(attr_id),
            ChangeEvent::SettingsChanged => None,
        }
    }
}

/// Receives change events from a character.
///
/// Listeners run in priority order (lower values first).
pub trait ChangeListener {
    /// Returns the priority of this listener. Default priority is 0.
    fn priority(&self) -> i32 {
        0
    }

    fn changed(&self, event: &ChangeEvent);
}

/// Fan-out registry owned by a character.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) {
        self.listeners.push(listener);
        self.listeners.sort_by_key(|listener| listener.priority());
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&self, event: &ChangeEvent) {
        for listener in &self.listeners {
            listener.changed(event);
        }
    }
}

impl core::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Recorder {
        name: &'static str,
        priority: i32,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ChangeListener for Recorder {
        fn priority(&self) -> i32 {
            self.priority
        }

        fn changed(&self, event: &ChangeEvent) {
            let target = event.attr_id().unwrap_or("-");
            self.log.borrow_mut().push(format!("{}:{target}", self.name));
        }
    }

    #[test]
    fn listeners_run_in_priority_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();
        notifier.subscribe(Box::new(Recorder {
            name: "late",
            priority: 5,
            log: Rc::clone(&log),
        }));
        notifier.subscribe(Box::new(Recorder {
            name: "early",
            priority: -5,
            log: Rc::clone(&log),
        }));

        notifier.notify(&ChangeEvent::AttributeChanged {
            attr_id: "st".to_string(),
            field: EditField::Adjustment,
        });
        notifier.notify(&ChangeEvent::SettingsChanged);

        assert_eq!(
            *log.borrow(),
            vec!["early:st", "late:st", "early:-", "late:-"]
        );
    }
}
