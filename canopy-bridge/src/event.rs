//! The logical event vocabulary exchanged with the renderer.
//!
//! Host callbacks never talk to the renderer directly. They are translated
//! into [`LogicalEvent`] values, queued, and handed to the renderer as one
//! ordered batch per tick. In the other direction the renderer answers each
//! tick with an [`OutputSnapshot`].
//!
//! ```
//! use canopy_bridge::event::{LogicalEvent, VirtualKeyCode};
//!
//! let [press, release] = VirtualKeyCode::Backspace.press_release();
//! assert_eq!(press, LogicalEvent::VirtualKey { code: VirtualKeyCode::Backspace, pressed: true });
//! assert_eq!(release, LogicalEvent::VirtualKey { code: VirtualKeyCode::Backspace, pressed: false });
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::InvalidHostCode, geometry::Rect};

/// A renderer-agnostic, discrete input action.
///
/// Events are plain values and never reference mutable state. Order within a
/// batch is significant: a `PointerMoved` precedes the `PointerButton` it
/// accompanies, and every deleted character is a key press immediately
/// followed by its release.
///
/// New variants may be added; match with a wildcard arm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum LogicalEvent {
    /// Pointer moved to a position in points.
    PointerMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Pointer button pressed or released at a position in points.
    PointerButton {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
        /// Which button; touches are primary, long presses secondary.
        button: PointerButton,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// Scroll delta in points (trackpad or wheel).
    Wheel {
        /// Horizontal delta.
        dx: f32,
        /// Vertical delta.
        dy: f32,
    },
    /// Text committed by the keyboard.
    TextCommit {
        /// The committed text.
        text: String,
    },
    /// Composition (marked) text that is not committed yet.
    ImePreedit {
        /// The text being composed.
        text: String,
    },
    /// A non-character key.
    VirtualKey {
        /// The key.
        code: VirtualKeyCode,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// Copy the current selection.
    Copy,
    /// Cut the current selection.
    Cut,
    /// Paste text read from the clipboard at paste time.
    Paste {
        /// Clipboard contents, empty when the read failed.
        text: String,
    },
    /// The host scene moved between background, inactive and active.
    ScenePhaseChanged {
        /// The new phase.
        phase: ScenePhase,
    },
    /// The host window gained or lost focus.
    WindowFocused {
        /// Whether the window is focused.
        focused: bool,
    },
    /// The software keyboard appeared or disappeared.
    KeyboardVisibility {
        /// Whether the keyboard is visible.
        visible: bool,
    },
}

impl LogicalEvent {
    /// Pointer moved to `(x, y)`.
    pub fn pointer_moved(x: f32, y: f32) -> Self {
        Self::PointerMoved { x, y }
    }

    /// Primary button press or release at `(x, y)`.
    pub fn primary_button(x: f32, y: f32, pressed: bool) -> Self {
        Self::PointerButton {
            x,
            y,
            button: PointerButton::Primary,
            pressed,
        }
    }

    /// Secondary button press or release at `(x, y)`.
    pub fn secondary_button(x: f32, y: f32, pressed: bool) -> Self {
        Self::PointerButton {
            x,
            y,
            button: PointerButton::Secondary,
            pressed,
        }
    }

    /// Committed text.
    pub fn text_commit(text: impl Into<String>) -> Self {
        Self::TextCommit { text: text.into() }
    }

    /// Key press or release.
    pub fn virtual_key(code: VirtualKeyCode, pressed: bool) -> Self {
        Self::VirtualKey { code, pressed }
    }

    /// Paste with the given clipboard contents.
    pub fn paste(text: impl Into<String>) -> Self {
        Self::Paste { text: text.into() }
    }
}

/// Pointer buttons a touch host can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointerButton {
    /// A regular tap.
    Primary,
    /// A long press.
    Secondary,
}

/// Keys the host forwards as discrete key events.
///
/// The discriminants are the raw codes used by the host protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum VirtualKeyCode {
    /// Delete the character before the caret.
    Backspace = 0,
    /// Return.
    Enter = 1,
    /// Tab.
    Tab = 2,
    /// Escape.
    Escape = 3,
    /// Arrow up.
    ArrowUp = 4,
    /// Arrow down.
    ArrowDown = 5,
    /// Arrow left.
    ArrowLeft = 6,
    /// Arrow right.
    ArrowRight = 7,
}

impl VirtualKeyCode {
    /// A press immediately followed by its release.
    pub fn press_release(self) -> [LogicalEvent; 2] {
        [
            LogicalEvent::virtual_key(self, true),
            LogicalEvent::virtual_key(self, false),
        ]
    }
}

impl TryFrom<u8> for VirtualKeyCode {
    type Error = InvalidHostCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Backspace,
            1 => Self::Enter,
            2 => Self::Tab,
            3 => Self::Escape,
            4 => Self::ArrowUp,
            5 => Self::ArrowDown,
            6 => Self::ArrowLeft,
            7 => Self::ArrowRight,
            _ => return Err(InvalidHostCode::VirtualKey(code)),
        })
    }
}

/// Host application lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ScenePhase {
    /// Not visible.
    Background = 0,
    /// Visible but not receiving events.
    Inactive = 1,
    /// In the foreground and interactive.
    Active = 2,
}

impl TryFrom<u8> for ScenePhase {
    type Error = InvalidHostCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Background,
            1 => Self::Inactive,
            2 => Self::Active,
            _ => return Err(InvalidHostCode::ScenePhase(code)),
        })
    }
}

/// Cursor affordance requested by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CursorIcon {
    /// The platform default.
    #[default]
    Default,
    /// Something clickable.
    PointingHand,
    /// Horizontal resize handle.
    ResizeHorizontal,
    /// Vertical resize handle.
    ResizeVertical,
    /// Editable text.
    Text,
}

/// What the renderer wants from the host after one frame.
///
/// Consumed exactly once by the frame controller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputSnapshot {
    /// Whether a text field has keyboard focus.
    pub wants_keyboard: bool,
    /// Where IME composition and the caret should appear, in points.
    pub ime_rect: Option<Rect>,
    /// Requested cursor affordance.
    pub cursor_icon: CursorIcon,
    /// Text to put on the clipboard; empty means nothing was copied.
    pub copied_text: String,
}

impl OutputSnapshot {
    /// A snapshot that only carries a cursor icon.
    pub fn new(cursor_icon: CursorIcon) -> Self {
        Self {
            cursor_icon,
            ..Default::default()
        }
    }

    /// A snapshot carrying keyboard state.
    pub fn with_keyboard_state(
        cursor_icon: CursorIcon,
        wants_keyboard: bool,
        ime_rect: Option<Rect>,
    ) -> Self {
        Self {
            wants_keyboard,
            ime_rect,
            cursor_icon,
            copied_text: String::new(),
        }
    }

    /// Sets the copied text.
    pub fn with_copied_text(mut self, text: impl Into<String>) -> Self {
        self.copied_text = text.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_key_codes_round_trip_through_host_protocol() {
        for code in 0u8..=7 {
            let key = VirtualKeyCode::try_from(code);
            assert!(matches!(key, Ok(k) if k as u8 == code));
        }
        let unknown = VirtualKeyCode::try_from(8);
        assert_eq!(unknown, Err(InvalidHostCode::VirtualKey(8)));
    }

    #[test]
    fn test_scene_phase_codes() {
        assert_eq!(ScenePhase::try_from(0), Ok(ScenePhase::Background));
        assert_eq!(ScenePhase::try_from(2), Ok(ScenePhase::Active));
        let unknown = ScenePhase::try_from(9);
        assert_eq!(unknown, Err(InvalidHostCode::ScenePhase(9)));
    }

    #[test]
    fn test_press_release_order() {
        let [first, second] = VirtualKeyCode::Enter.press_release();
        assert_eq!(first, LogicalEvent::virtual_key(VirtualKeyCode::Enter, true));
        assert_eq!(second, LogicalEvent::virtual_key(VirtualKeyCode::Enter, false));
    }

    #[test]
    fn test_snapshot_builders() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        let snapshot = OutputSnapshot::with_keyboard_state(CursorIcon::Text, true, Some(rect))
            .with_copied_text("hi");
        assert!(snapshot.wants_keyboard);
        assert_eq!(snapshot.ime_rect, Some(rect));
        assert_eq!(snapshot.copied_text, "hi");
        assert_eq!(OutputSnapshot::default().cursor_icon, CursorIcon::Default);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_recorded_batch_replays_through_json() {
        let batch = vec![
            LogicalEvent::pointer_moved(12.5, 40.0),
            LogicalEvent::primary_button(12.5, 40.0, true),
            LogicalEvent::text_commit("héllo"),
            LogicalEvent::virtual_key(VirtualKeyCode::Backspace, true),
            LogicalEvent::paste("clip"),
        ];
        let json = serde_json::to_string(&batch).expect("serialize events");
        let replayed: Vec<LogicalEvent> = serde_json::from_str(&json).expect("parse events");
        assert_eq!(replayed, batch);

        let rect = Rect::new(10.0, 700.0, 100.0, 30.0);
        let snapshot = OutputSnapshot::with_keyboard_state(CursorIcon::Text, true, Some(rect))
            .with_copied_text("copied");
        let json = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let replayed: OutputSnapshot = serde_json::from_str(&json).expect("parse snapshot");
        assert_eq!(replayed, snapshot);
    }
}
