//! # Event Queue
//!
//! Ordered buffer of [`LogicalEvent`]s accumulated between two frames.
//!
//! ## Overview
//!
//! Touch handlers, text-widget callbacks and discrete signals run whenever
//! the host delivers them. None of them may call into the renderer; they only
//! append here. Once per tick the frame controller drains the whole queue
//! and hands the batch to the renderer as its complete input.
//!
//! ## Design
//!
//! - **Ordering**: events come out in exactly the order they went in
//! - **Exclusivity**: a drain returns every pending event once and leaves the
//!   queue empty, so no event is delivered twice
//! - **Unbounded**: nothing is ever discarded. Ticks are expected at 30 Hz or
//!   more, so the queue stays small; a warning is logged if it grows past a
//!   soft threshold because that means ticks have stalled
//!
//! ## Usage
//!
//! ```
//! use canopy_bridge::event::LogicalEvent;
//! use canopy_bridge::event_queue::EventQueue;
//!
//! let mut queue = EventQueue::default();
//! queue.append(LogicalEvent::pointer_moved(10.0, 20.0));
//! queue.append(LogicalEvent::primary_button(10.0, 20.0, true));
//!
//! let batch = queue.drain_all();
//! assert_eq!(batch.len(), 2);
//! assert!(queue.drain_all().is_empty());
//! ```

use tracing::warn;

use crate::event::LogicalEvent;

/// Default number of pending events above which a stall warning is logged.
pub const DEFAULT_WARN_THRESHOLD: usize = 4096;

/// Single-consumer queue of logical events.
///
/// Owned by the frame controller and only touched from the host's UI thread.
#[derive(Debug)]
pub struct EventQueue {
    /// Pending events, oldest first.
    events: Vec<LogicalEvent>,
    /// Soft size limit that triggers a warning.
    warn_threshold: usize,
    /// Whether the warning was already logged since the last drain.
    warned: bool,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_warn_threshold(DEFAULT_WARN_THRESHOLD)
    }
}

impl EventQueue {
    /// Creates a queue that warns once it holds more than `warn_threshold`
    /// events.
    pub fn with_warn_threshold(warn_threshold: usize) -> Self {
        Self {
            events: Vec::new(),
            warn_threshold,
            warned: false,
        }
    }

    /// Adds an event to the end of the queue.
    pub fn append(&mut self, event: LogicalEvent) {
        self.events.push(event);
        self.check_growth();
    }

    /// Removes and returns all pending events, oldest first.
    ///
    /// After this call the queue is empty.
    pub fn drain_all(&mut self) -> Vec<LogicalEvent> {
        self.warned = false;
        std::mem::take(&mut self.events)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no event is pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pending events without draining them.
    pub fn pending(&self) -> &[LogicalEvent] {
        &self.events
    }

    fn check_growth(&mut self) {
        if !self.warned && self.events.len() > self.warn_threshold {
            self.warned = true;
            warn!(
                pending = self.events.len(),
                threshold = self.warn_threshold,
                "Event queue is growing without being drained; are ticks stalled?"
            );
        }
    }
}

impl Extend<LogicalEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = LogicalEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
        self.check_growth();
    }
}
