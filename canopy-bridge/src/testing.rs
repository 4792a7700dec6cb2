//! Test doubles for driving a [`FrameController`](crate::controller::FrameController)
//! without a device.
//!
//! Enabled with the `testing` feature.

use std::{collections::VecDeque, fmt};

use crate::{
    event::{CursorIcon, LogicalEvent, OutputSnapshot},
    geometry::{GeometryCache, PixelSize, Rect, SafeAreaInsets},
    host::NativeHost,
    overlay::OverlayCommand,
    renderer::{FrameInput, FrameRenderer},
};

pub use crate::tick::ManualTickSource;

/// Host that records every command and models the native widget's state.
#[derive(Debug, Default)]
pub struct RecordingHost {
    /// Insets reported on the next tick.
    pub safe_area: SafeAreaInsets,
    /// Every overlay command received, in order.
    pub commands: Vec<OverlayCommand>,
    /// Every cursor icon received, in order.
    pub cursor_icons: Vec<CursorIcon>,
    frame: Option<Rect>,
    focused: bool,
    text_clears: usize,
}

impl RecordingHost {
    /// Frame of the visible widget, `None` while hidden.
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    /// Whether the widget holds input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// How many times the widget's text was cleared.
    pub fn text_clears(&self) -> usize {
        self.text_clears
    }
}

impl NativeHost for RecordingHost {
    fn safe_area_insets(&self) -> SafeAreaInsets {
        self.safe_area
    }

    fn apply_overlay_command(&mut self, command: &OverlayCommand) {
        match command {
            OverlayCommand::Show { frame, .. } | OverlayCommand::Reposition { frame } => {
                self.frame = Some(*frame);
            }
            OverlayCommand::Hide => self.frame = None,
            OverlayCommand::ClearText => self.text_clears += 1,
            OverlayCommand::AcquireFocus => self.focused = true,
            OverlayCommand::ReleaseFocus => self.focused = false,
        }
        self.commands.push(command.clone());
    }

    fn set_cursor_icon(&mut self, icon: CursorIcon) {
        self.cursor_icons.push(icon);
    }
}

/// Input of one frame as seen by [`ScriptedRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    /// Tick timestamp.
    pub time: f64,
    /// Delivered events.
    pub events: Vec<LogicalEvent>,
    /// Geometry at the time of the frame.
    pub geometry: GeometryCache,
    /// Safe area change flag.
    pub safe_area_changed: bool,
}

/// Error produced by [`ScriptedRenderer::fail_next_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedRenderError;

impl fmt::Display for ScriptedRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scripted frame failure")
    }
}

impl std::error::Error for ScriptedRenderError {}

/// Renderer that replays queued snapshots and records its input.
///
/// Once the script runs out, the last snapshot is repeated.
#[derive(Debug, Default)]
pub struct ScriptedRenderer {
    script: VecDeque<OutputSnapshot>,
    last: OutputSnapshot,
    frames: Vec<RecordedFrame>,
    surface_sizes: Vec<PixelSize>,
    fail_next: bool,
}

impl ScriptedRenderer {
    /// Creates a renderer with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the output of a future frame.
    pub fn push_output(&mut self, output: OutputSnapshot) {
        self.script.push_back(output);
    }

    /// Makes the next frame fail.
    pub fn fail_next_frame(&mut self) {
        self.fail_next = true;
    }

    /// Every frame run so far, including failed ones.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Every surface resize received.
    pub fn surface_sizes(&self) -> &[PixelSize] {
        &self.surface_sizes
    }
}

impl FrameRenderer for ScriptedRenderer {
    type Error = ScriptedRenderError;

    fn frame(&mut self, input: FrameInput<'_>) -> Result<OutputSnapshot, Self::Error> {
        self.frames.push(RecordedFrame {
            time: input.time,
            events: input.events,
            geometry: *input.geometry,
            safe_area_changed: input.safe_area_changed,
        });
        if std::mem::take(&mut self.fail_next) {
            return Err(ScriptedRenderError);
        }
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        Ok(self.last.clone())
    }

    fn resize_surface(&mut self, size: PixelSize) {
        self.surface_sizes.push(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Placement;

    #[test]
    fn test_recording_host_tracks_widget_state() {
        let mut host = RecordingHost::default();
        let frame = Rect::new(0.0, 0.0, 10.0, 30.0);
        host.apply_overlay_command(&OverlayCommand::Show {
            frame,
            placement: Placement::Default,
        });
        host.apply_overlay_command(&OverlayCommand::AcquireFocus);
        assert_eq!(host.frame(), Some(frame));
        assert!(host.is_focused());

        host.apply_overlay_command(&OverlayCommand::ReleaseFocus);
        host.apply_overlay_command(&OverlayCommand::ClearText);
        host.apply_overlay_command(&OverlayCommand::Hide);
        assert_eq!(host.frame(), None);
        assert!(!host.is_focused());
        assert_eq!(host.text_clears(), 1);
        assert_eq!(host.commands.len(), 5);
    }

    #[test]
    fn test_scripted_renderer_repeats_last_output() {
        let geometry = GeometryCache::new(PixelSize::new(10, 10), 1.0);
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(OutputSnapshot::new(CursorIcon::Text));

        let input = |time| FrameInput {
            time,
            predicted_dt: 0.0,
            events: Vec::new(),
            geometry: &geometry,
            safe_area_changed: false,
        };
        assert_eq!(renderer.frame(input(0.0)).unwrap().cursor_icon, CursorIcon::Text);
        assert_eq!(renderer.frame(input(1.0)).unwrap().cursor_icon, CursorIcon::Text);

        renderer.fail_next_frame();
        assert_eq!(renderer.frame(input(2.0)), Err(ScriptedRenderError));
        assert_eq!(renderer.frames().len(), 3);
    }
}
