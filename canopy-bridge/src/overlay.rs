//! # Native Text Overlay
//!
//! The renderer draws its own text fields, but system text input (keyboard,
//! autocorrect, dictation, IME composition) needs a real native editing
//! widget with input focus. That widget is the *overlay*: it is presented on
//! top of the rendered UI while the renderer wants keyboard input and hidden
//! otherwise.
//!
//! ## States
//!
//! ```text
//!            wants_keyboard                      wants_keyboard, rect moved
//!   Hidden ─────────────────▶ Showing { frame } ◀──────────────────────────┐
//!      ▲                          │      └──────────── reposition ─────────┘
//!      └──── !wants_keyboard ─────┤
//!      └──── tap outside frame ───┘
//! ```
//!
//! The machine never talks to the host directly. Each transition returns the
//! ordered [`OverlayCommand`]s the host has to carry out.

use smallvec::{SmallVec, smallvec};

use crate::{
    config::OverlayPolicy,
    geometry::{GeometryCache, Point, Rect},
};

/// Current overlay state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OverlayState {
    /// No native editing surface is presented.
    #[default]
    Hidden,
    /// The native editing surface is presented with input focus.
    Showing {
        /// On-screen frame in points; never empty.
        frame: Rect,
        /// How `frame` was chosen.
        placement: Placement,
        /// Last widget text known to be reflected in the renderer.
        last_committed_text: String,
    },
}

/// How a shown overlay frame was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Derived from the renderer's IME rect.
    Ime,
    /// Bottom-anchored default inside the safe area.
    Default,
}

/// An instruction for the host's native widget.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCommand {
    /// Present the overlay at `frame`.
    Show {
        /// Frame in points.
        frame: Rect,
        /// Where the frame came from.
        placement: Placement,
    },
    /// Move the visible overlay without touching visibility or focus.
    Reposition {
        /// New frame in points.
        frame: Rect,
    },
    /// Remove the overlay from screen.
    Hide,
    /// Empty the widget's text.
    ClearText,
    /// Make the widget the input focus so the keyboard appears.
    AcquireFocus,
    /// Give up input focus so the keyboard goes away.
    ReleaseFocus,
}

/// Commands produced by one transition, in the order they must be applied.
pub type OverlayCommands = SmallVec<[OverlayCommand; 3]>;

/// The kind of transition a reconciliation performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTransition {
    /// Nothing changed.
    Unchanged,
    /// `Hidden -> Showing`.
    Shown,
    /// `Showing -> Showing` with a new frame.
    Repositioned,
    /// `Showing -> Hidden`.
    Hidden,
}

/// Result of applying one renderer request or host signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// What happened.
    pub transition: OverlayTransition,
    /// What the host must do about it.
    pub commands: OverlayCommands,
}

impl Reconciliation {
    fn unchanged() -> Self {
        Self {
            transition: OverlayTransition::Unchanged,
            commands: SmallVec::new(),
        }
    }
}

/// Overlay state machine.
#[derive(Debug, Clone)]
pub struct OverlayMachine {
    state: OverlayState,
    policy: OverlayPolicy,
}

impl OverlayMachine {
    /// Creates a hidden overlay.
    pub fn new(policy: OverlayPolicy) -> Self {
        Self {
            state: OverlayState::Hidden,
            policy,
        }
    }

    /// Current state.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Returns `true` while the overlay is presented.
    pub fn is_showing(&self) -> bool {
        matches!(self.state, OverlayState::Showing { .. })
    }

    /// Current frame, if showing.
    pub fn frame(&self) -> Option<Rect> {
        match &self.state {
            OverlayState::Showing { frame, .. } => Some(*frame),
            OverlayState::Hidden => None,
        }
    }

    /// Applies one renderer request.
    ///
    /// Repeating the same request is a no-op.
    pub fn reconcile(
        &mut self,
        wants_keyboard: bool,
        ime_rect: Option<Rect>,
        geometry: &GeometryCache,
    ) -> Reconciliation {
        match (self.frame(), wants_keyboard) {
            (None, false) => Reconciliation::unchanged(),
            (Some(_), false) => self.hide(),
            (None, true) => {
                let (frame, placement) = self.place(ime_rect, geometry);
                self.state = OverlayState::Showing {
                    frame,
                    placement,
                    last_committed_text: String::new(),
                };
                Reconciliation {
                    transition: OverlayTransition::Shown,
                    commands: smallvec![
                        OverlayCommand::Show { frame, placement },
                        OverlayCommand::AcquireFocus,
                    ],
                }
            }
            (Some(current), true) => {
                let (target, placement) = match ime_rect {
                    Some(_) => self.place(ime_rect, geometry),
                    // Without a fresh rect an IME-placed frame stays where it
                    // is while it is still on screen.
                    None if self.placement() == Some(Placement::Ime)
                        && !current.is_empty()
                        && current.intersects(&geometry.bounds()) =>
                    {
                        return Reconciliation::unchanged();
                    }
                    None => (default_frame(geometry, &self.policy), Placement::Default),
                };
                if let OverlayState::Showing {
                    frame,
                    placement: current_placement,
                    ..
                } = &mut self.state
                {
                    *current_placement = placement;
                    *frame = target;
                }
                if target == current {
                    return Reconciliation::unchanged();
                }
                Reconciliation {
                    transition: OverlayTransition::Repositioned,
                    commands: smallvec![OverlayCommand::Reposition { frame: target }],
                }
            }
        }
    }

    /// Hides the overlay when a touch begins outside its frame.
    ///
    /// Returns `None` when the overlay is hidden or the touch is inside.
    pub fn dismiss_if_outside(&mut self, point: Point) -> Option<Reconciliation> {
        let frame = self.frame()?;
        if frame.contains(point) {
            return None;
        }
        Some(self.hide())
    }

    /// How the current frame was chosen, if showing.
    pub fn placement(&self) -> Option<Placement> {
        match &self.state {
            OverlayState::Showing { placement, .. } => Some(*placement),
            OverlayState::Hidden => None,
        }
    }

    /// Text last synchronised with the widget, if showing.
    pub fn last_committed_text(&self) -> Option<&str> {
        match &self.state {
            OverlayState::Showing {
                last_committed_text,
                ..
            } => Some(last_committed_text),
            OverlayState::Hidden => None,
        }
    }

    /// Records `text` as synchronised. Ignored while hidden.
    pub(crate) fn set_committed_text(&mut self, text: &str) {
        if let OverlayState::Showing {
            last_committed_text,
            ..
        } = &mut self.state
        {
            last_committed_text.clear();
            last_committed_text.push_str(text);
        }
    }

    fn hide(&mut self) -> Reconciliation {
        self.state = OverlayState::Hidden;
        Reconciliation {
            transition: OverlayTransition::Hidden,
            commands: smallvec![
                OverlayCommand::ReleaseFocus,
                OverlayCommand::ClearText,
                OverlayCommand::Hide,
            ],
        }
    }

    fn place(&self, ime_rect: Option<Rect>, geometry: &GeometryCache) -> (Rect, Placement) {
        if let Some(rect) = ime_rect {
            let frame = ime_frame(rect, &self.policy);
            if !frame.is_empty() && frame.intersects(&geometry.bounds()) {
                return (frame, Placement::Ime);
            }
        }
        (default_frame(geometry, &self.policy), Placement::Default)
    }
}

/// Pads the renderer's IME rect and enforces the minimum size.
///
/// The minimum height extends the frame downwards.
pub fn ime_frame(rect: Rect, policy: &OverlayPolicy) -> Rect {
    let padded = rect.inflate(policy.horizontal_padding, policy.vertical_padding);
    Rect {
        width: padded.width.max(policy.min_width),
        height: padded.height.max(policy.min_height),
        ..padded
    }
}

/// Bottom-anchored frame inside the safe area.
pub fn default_frame(geometry: &GeometryCache, policy: &OverlayPolicy) -> Rect {
    let usable = geometry.usable_bounds();
    let margin = policy.default_margin;
    let height = policy.default_height.max(policy.min_height);
    let width = (usable.width - margin * 2.0).max(policy.min_width);
    let y = (usable.max_y() - margin - height).max(usable.y);
    Rect::new(usable.x + margin, y, width, height)
}
