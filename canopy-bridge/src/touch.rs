//! Touch contact tracking.
//!
//! The renderer knows a single pointer. The host reports any number of
//! simultaneous contacts, each with an identifier that stays stable from
//! begin to end. The first contact to go down becomes the primary pointer and
//! is the only one that produces pointer events; additional contacts are
//! tracked so that their end or cancel is recognised, but stay silent.

use rustc_hash::FxHashMap;

use crate::{event::LogicalEvent, geometry::Point};

/// Host-assigned identifier of one touch contact.
pub type ContactId = u64;

/// Map from active contacts to their last known position.
#[derive(Debug, Default)]
pub struct TouchTracker {
    contacts: FxHashMap<ContactId, Point>,
    primary: Option<ContactId>,
}

impl TouchTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// A contact went down.
    pub fn began(&mut self, id: ContactId, position: Point, out: &mut impl Extend<LogicalEvent>) {
        self.contacts.insert(id, position);
        if self.primary.is_some() {
            return;
        }
        self.primary = Some(id);
        out.extend([
            LogicalEvent::pointer_moved(position.x, position.y),
            LogicalEvent::primary_button(position.x, position.y, true),
        ]);
    }

    /// A contact moved. Unknown contacts are ignored.
    pub fn moved(&mut self, id: ContactId, position: Point, out: &mut impl Extend<LogicalEvent>) {
        let Some(last) = self.contacts.get_mut(&id) else {
            return;
        };
        *last = position;
        if self.primary == Some(id) {
            out.extend([LogicalEvent::pointer_moved(position.x, position.y)]);
        }
    }

    /// A contact lifted at `position`.
    pub fn ended(&mut self, id: ContactId, position: Point, out: &mut impl Extend<LogicalEvent>) {
        if self.contacts.remove(&id).is_none() {
            return;
        }
        self.release_if_primary(id, position, out);
    }

    /// The system took a contact away. The release is reported at the last
    /// known position.
    pub fn cancelled(&mut self, id: ContactId, out: &mut impl Extend<LogicalEvent>) {
        if let Some(last) = self.contacts.remove(&id) {
            self.release_if_primary(id, last, out);
        }
    }

    /// A long press was recognised at `position`; reported as a secondary
    /// click.
    pub fn long_pressed(&mut self, position: Point, out: &mut impl Extend<LogicalEvent>) {
        out.extend([
            LogicalEvent::pointer_moved(position.x, position.y),
            LogicalEvent::secondary_button(position.x, position.y, true),
            LogicalEvent::secondary_button(position.x, position.y, false),
        ]);
    }

    /// Last known position of a contact.
    pub fn position(&self, id: ContactId) -> Option<Point> {
        self.contacts.get(&id).copied()
    }

    /// The contact driving the pointer, if any.
    pub fn primary(&self) -> Option<ContactId> {
        self.primary
    }

    /// Number of contacts currently down.
    pub fn active_contacts(&self) -> usize {
        self.contacts.len()
    }

    fn release_if_primary(
        &mut self,
        id: ContactId,
        position: Point,
        out: &mut impl Extend<LogicalEvent>,
    ) {
        if self.primary != Some(id) {
            return;
        }
        self.primary = None;
        out.extend([LogicalEvent::primary_button(position.x, position.y, false)]);
    }
}
