//! Converts native text-widget edits into logical key and text events.
//!
//! The renderer only understands three text primitives: append text
//! ([`LogicalEvent::TextCommit`]), delete the last character (a backspace
//! press/release pair) and nothing else. The native widget, on the other
//! hand, reports whole-string changes: typing, deleting, autocorrect,
//! predictive text. Every change is expressed as a short sequence of the
//! primitives:
//!
//! | old      | new       | events                                   |
//! |----------|-----------|------------------------------------------|
//! | `"he"`   | `"hello"` | `TextCommit("llo")`                      |
//! | `"hello"`| `"he"`    | 3 × backspace press/release              |
//! | `"hello"`| `"world"` | 5 × backspace press/release, `TextCommit("world")` |
//! | `"same"` | `"same"`  | nothing                                  |
//!
//! Characters are counted as Unicode scalar values.

use crate::{
    event::{LogicalEvent, VirtualKeyCode},
    event_queue::EventQueue,
};

/// Classification of one widget change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit<'a> {
    /// The text did not change.
    Unchanged,
    /// Characters were typed at the end.
    Append(&'a str),
    /// Characters were removed from the end.
    Truncate {
        /// How many characters were removed.
        removed: usize,
    },
    /// Anything else: delete everything, then commit the new text.
    Replace {
        /// Character count of the old text.
        removed: usize,
        /// The full new text, possibly empty.
        text: &'a str,
    },
}

impl<'a> TextEdit<'a> {
    /// Classifies the change from `old` to `new`.
    pub fn classify(old: &str, new: &'a str) -> Self {
        if new == old {
            return Self::Unchanged;
        }
        if new.len() > old.len() && new.starts_with(old) {
            return Self::Append(&new[old.len()..]);
        }
        if new.len() < old.len() && old.starts_with(new) {
            // `new` is valid UTF-8, so its length falls on a char boundary of `old`.
            return Self::Truncate {
                removed: old[new.len()..].chars().count(),
            };
        }
        Self::Replace {
            removed: old.chars().count(),
            text: new,
        }
    }

    /// Number of events this edit expands to.
    pub fn event_count(&self) -> usize {
        match self {
            Self::Unchanged => 0,
            Self::Append(_) => 1,
            Self::Truncate { removed } => removed * 2,
            Self::Replace { removed, text } => removed * 2 + usize::from(!text.is_empty()),
        }
    }

    /// Appends the events for this edit to `out`, in order.
    pub fn emit(&self, out: &mut impl Extend<LogicalEvent>) {
        match *self {
            Self::Unchanged => {}
            Self::Append(suffix) => out.extend([LogicalEvent::text_commit(suffix)]),
            Self::Truncate { removed } => emit_backspaces(removed, out),
            Self::Replace { removed, text } => {
                emit_backspaces(removed, out);
                if !text.is_empty() {
                    out.extend([LogicalEvent::text_commit(text)]);
                }
            }
        }
    }
}

fn emit_backspaces(count: usize, out: &mut impl Extend<LogicalEvent>) {
    out.extend(
        std::iter::repeat_n(VirtualKeyCode::Backspace, count)
            .flat_map(VirtualKeyCode::press_release),
    );
}

/// Returns the events that turn `old` into `new`.
pub fn diff(old: &str, new: &str) -> Vec<LogicalEvent> {
    let edit = TextEdit::classify(old, new);
    let mut events = Vec::with_capacity(edit.event_count());
    edit.emit(&mut events);
    events
}

/// Appends the events that turn `old` into `new` to `queue`.
///
/// Returns the classification so callers can log it.
pub fn diff_into<'a>(old: &str, new: &'a str, queue: &mut EventQueue) -> TextEdit<'a> {
    let edit = TextEdit::classify(old, new);
    edit.emit(queue);
    edit
}

/// Events for the return key. The host must not insert a newline itself.
pub fn return_key() -> [LogicalEvent; 2] {
    VirtualKeyCode::Enter.press_release()
}
