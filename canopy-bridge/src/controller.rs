//! # Frame-Tick Controller
//!
//! Owns every piece of bridging state and the three external collaborators
//! (renderer, native host, clipboard). Two kinds of calls arrive:
//!
//! - **Host callbacks** (`handle_*`): touch, text-widget edits, discrete
//!   signals and geometry changes. They translate input into
//!   [`LogicalEvent`]s on the queue and never call the renderer. The only
//!   ones with immediate side effects are resize (the surface is resized at
//!   once) and a touch outside the visible overlay (it is hidden at once).
//! - **Ticks** ([`FrameController::tick`]): once per display refresh the
//!   controller refreshes the safe area, drains the queue, runs one renderer
//!   frame and reconciles its output with the overlay, cursor and clipboard.
//!
//! `tick` takes `&mut self`, so two ticks can never overlap.
//!
//! ## Usage
//!
//! ```ignore
//! use canopy_bridge::{
//!     clipboard::MemoryClipboard,
//!     config::BridgeConfig,
//!     controller::FrameController,
//!     event::OutputSnapshot,
//!     geometry::{GeometryCache, PixelSize, Rect},
//!     testing::{RecordingHost, ScriptedRenderer},
//!     tick::ManualTickSource,
//! };
//!
//! let mut renderer = ScriptedRenderer::new();
//! renderer.push_output(OutputSnapshot {
//!     wants_keyboard: true,
//!     ime_rect: Some(Rect::new(10.0, 20.0, 100.0, 30.0)),
//!     ..Default::default()
//! });
//!
//! let mut controller = FrameController::new(
//!     renderer,
//!     RecordingHost::default(),
//!     MemoryClipboard::new(),
//!     ManualTickSource::default(),
//!     GeometryCache::new(PixelSize::new(780, 1688), 2.0),
//!     BridgeConfig::default(),
//! )?;
//!
//! controller.tick()?;
//! assert_eq!(controller.host().frame(), Some(Rect::new(10.0, 18.0, 100.0, 34.0)));
//!
//! controller.handle_text_changed("", "a");
//! controller.tick()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::{debug, error, instrument, warn};

use crate::{
    clipboard::Clipboard,
    config::{BridgeConfig, ConfigError},
    error::{InvalidHostCode, TickError},
    event::{CursorIcon, LogicalEvent, OutputSnapshot, ScenePhase, VirtualKeyCode},
    event_queue::EventQueue,
    geometry::{GeometryCache, LogicalSize, Point, Rect, SafeAreaInsets},
    host::NativeHost,
    overlay::{OverlayMachine, OverlayTransition, Reconciliation},
    renderer::{FrameInput, FrameRenderer},
    text_diff,
    tick::TickSource,
    touch::{ContactId, TouchTracker},
};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Number of the frame, starting at 0.
    pub frame: u64,
    /// Events handed to the renderer.
    pub events_delivered: usize,
    /// Overlay transition caused by the renderer's output.
    pub overlay: OverlayTransition,
    /// Whether copied text was written to the clipboard.
    pub clipboard_written: bool,
    /// Whether the renderer was told the safe area changed.
    pub safe_area_changed: bool,
}

/// Bridges a native touch host and an immediate-mode renderer.
pub struct FrameController<R, H, C, T> {
    renderer: R,
    host: H,
    clipboard: C,
    tick_source: T,
    config: BridgeConfig,
    queue: EventQueue,
    geometry: GeometryCache,
    /// Set by host geometry callbacks, reported to the renderer on the next
    /// tick.
    safe_area_dirty: bool,
    overlay: OverlayMachine,
    touches: TouchTracker,
    last_wants_keyboard: bool,
    last_ime_rect: Option<Rect>,
    last_cursor_icon: Option<CursorIcon>,
    frame_number: u64,
}

impl<R, H, C, T> FrameController<R, H, C, T>
where
    R: FrameRenderer,
    H: NativeHost,
    C: Clipboard,
    T: TickSource,
{
    /// Creates a controller with a hidden overlay and an empty queue.
    pub fn new(
        renderer: R,
        host: H,
        clipboard: C,
        tick_source: T,
        geometry: GeometryCache,
        config: BridgeConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            renderer,
            host,
            clipboard,
            tick_source,
            queue: EventQueue::with_warn_threshold(config.queue_warn_threshold),
            geometry,
            safe_area_dirty: false,
            overlay: OverlayMachine::new(config.overlay),
            touches: TouchTracker::new(),
            last_wants_keyboard: false,
            last_ime_rect: None,
            last_cursor_icon: None,
            frame_number: 0,
            config,
        })
    }

    /// Runs one frame.
    ///
    /// On a renderer error the event batch is consumed and the overlay is
    /// left as it was.
    #[instrument(level = "debug", skip(self))]
    pub fn tick(&mut self) -> Result<TickReport, TickError<R::Error>> {
        let frame = self.frame_number;
        self.frame_number += 1;

        let host_insets = self.host.safe_area_insets();
        if self.geometry.set_safe_area(host_insets) {
            debug!("Safe area changed to {host_insets:?}");
            self.safe_area_dirty = true;
        }
        let safe_area_changed = std::mem::take(&mut self.safe_area_dirty);

        let events = self.queue.drain_all();
        let events_delivered = events.len();
        let input = FrameInput {
            time: self.tick_source.next_timestamp(),
            predicted_dt: self.tick_source.predicted_interval(),
            events,
            geometry: &self.geometry,
            safe_area_changed,
        };

        let output = self.renderer.frame(input).map_err(|source| {
            error!("Renderer failed on frame {frame}: {source}");
            TickError::Renderer { frame, source }
        })?;

        let (overlay, clipboard_written) = self.apply_output(output);
        Ok(TickReport {
            frame,
            events_delivered,
            overlay,
            clipboard_written,
            safe_area_changed,
        })
    }

    fn apply_output(&mut self, output: OutputSnapshot) -> (OverlayTransition, bool) {
        if output.wants_keyboard != self.last_wants_keyboard {
            debug!("Renderer keyboard request: {}", output.wants_keyboard);
        }

        let reconciliation =
            self.overlay.reconcile(output.wants_keyboard, output.ime_rect, &self.geometry);
        self.forward(&reconciliation);

        if self.last_cursor_icon != Some(output.cursor_icon) {
            self.host.set_cursor_icon(output.cursor_icon);
            self.last_cursor_icon = Some(output.cursor_icon);
        }

        let clipboard_written = !output.copied_text.is_empty();
        if clipboard_written {
            self.clipboard.set_text(&output.copied_text);
        }

        self.last_wants_keyboard = output.wants_keyboard;
        self.last_ime_rect = output.ime_rect;
        (reconciliation.transition, clipboard_written)
    }

    fn forward(&mut self, reconciliation: &Reconciliation) {
        if reconciliation.transition != OverlayTransition::Unchanged {
            debug!("Overlay {:?}: {:?}", reconciliation.transition, reconciliation.commands);
        }
        for command in &reconciliation.commands {
            self.host.apply_overlay_command(command);
        }
    }

    // Geometry

    /// The host view changed size or scale.
    ///
    /// Returns `false` and changes nothing when a dimension or the scale is
    /// non-positive or non-finite.
    pub fn handle_resize(&mut self, size: LogicalSize, scale: f32) -> bool {
        match self.geometry.apply_resize(size, scale) {
            Some(pixel_size) => {
                debug!("Resized to {pixel_size:?} at scale {scale}");
                self.renderer.resize_surface(pixel_size);
                true
            }
            None => {
                debug!("Ignoring degenerate resize {size:?} at scale {scale}");
                false
            }
        }
    }

    /// The view joined a window that reports `insets`.
    pub fn handle_window_attached(&mut self, insets: SafeAreaInsets) {
        self.handle_safe_area_changed(insets);
    }

    /// The host reported new safe area insets.
    pub fn handle_safe_area_changed(&mut self, insets: SafeAreaInsets) {
        if self.geometry.set_safe_area(insets) {
            self.safe_area_dirty = true;
        }
    }

    // Touch

    /// A contact went down.
    ///
    /// While the overlay is showing, a touch outside its frame hides it
    /// before the touch is forwarded.
    pub fn handle_touch_began(&mut self, id: ContactId, x: f32, y: f32) {
        let point = Point::new(x, y);
        if let Some(reconciliation) = self.overlay.dismiss_if_outside(point) {
            debug!("Touch outside overlay at ({x}, {y}); hiding");
            self.forward(&reconciliation);
        }
        self.touches.began(id, point, &mut self.queue);
    }

    /// A contact moved.
    pub fn handle_touch_moved(&mut self, id: ContactId, x: f32, y: f32) {
        self.touches.moved(id, Point::new(x, y), &mut self.queue);
    }

    /// A contact lifted.
    pub fn handle_touch_ended(&mut self, id: ContactId, x: f32, y: f32) {
        self.touches.ended(id, Point::new(x, y), &mut self.queue);
    }

    /// The system cancelled a contact.
    pub fn handle_touch_cancelled(&mut self, id: ContactId) {
        self.touches.cancelled(id, &mut self.queue);
    }

    /// A long press was recognised.
    pub fn handle_long_press(&mut self, x: f32, y: f32) {
        self.touches.long_pressed(Point::new(x, y), &mut self.queue);
    }

    /// A hovering pointer (trackpad, pencil) moved.
    pub fn handle_pointer_hover(&mut self, x: f32, y: f32) {
        self.queue.append(LogicalEvent::pointer_moved(x, y));
    }

    /// Scroll from a wheel or trackpad, in points.
    pub fn handle_scroll(&mut self, dx: f32, dy: f32) {
        self.queue.append(LogicalEvent::Wheel { dx, dy });
    }

    // Text

    /// The native widget's text changed from `old` to `new`.
    ///
    /// The diff is computed against the text last synchronised with the
    /// renderer; `old` only serves as a consistency check. Changes arriving
    /// while the overlay is hidden are dropped.
    pub fn handle_text_changed(&mut self, old: &str, new: &str) {
        let Some(committed) = self.overlay.last_committed_text() else {
            debug!("Dropping text change while overlay is hidden");
            return;
        };
        if committed != old {
            debug!("Host text {old:?} differs from committed text {committed:?}");
        }
        let edit = text_diff::diff_into(committed, new, &mut self.queue);
        debug!("Text edit: {edit:?}");
        self.overlay.set_committed_text(new);
    }

    /// Text committed outside the widget's change notifications, such as a
    /// desktop IME commit.
    pub fn handle_text_commit(&mut self, text: &str) {
        if !text.is_empty() {
            self.queue.append(LogicalEvent::text_commit(text));
        }
    }

    /// Marked (composing) text changed.
    pub fn handle_ime_preedit(&mut self, text: &str) {
        self.queue.append(LogicalEvent::ImePreedit {
            text: text.to_owned(),
        });
    }

    /// The return key was pressed. The host must not insert a newline.
    pub fn handle_return_key(&mut self) {
        self.queue.extend(text_diff::return_key());
    }

    /// Copy was requested.
    pub fn handle_copy(&mut self) {
        self.queue.append(LogicalEvent::Copy);
    }

    /// Cut was requested.
    pub fn handle_cut(&mut self) {
        self.queue.append(LogicalEvent::Cut);
    }

    /// Paste was requested; reads the clipboard now.
    ///
    /// The host must not paste into the widget itself.
    pub fn handle_paste(&mut self) {
        let text = self.clipboard.get_text().unwrap_or_default();
        self.queue.append(LogicalEvent::paste(text));
    }

    /// A discrete key was pressed and released.
    pub fn handle_virtual_key(&mut self, code: VirtualKeyCode) {
        self.queue.extend(code.press_release());
    }

    /// Raw-code form of [`Self::handle_virtual_key`].
    pub fn handle_virtual_key_code(&mut self, code: u8) -> Result<(), InvalidHostCode> {
        let code = VirtualKeyCode::try_from(code).inspect_err(|err| warn!("{err}"))?;
        self.handle_virtual_key(code);
        Ok(())
    }

    // Lifecycle

    /// The app moved between foreground and background.
    pub fn handle_scene_phase(&mut self, phase: ScenePhase) {
        self.queue.append(LogicalEvent::ScenePhaseChanged { phase });
    }

    /// Raw-code form of [`Self::handle_scene_phase`].
    pub fn handle_scene_phase_code(&mut self, code: u8) -> Result<(), InvalidHostCode> {
        let phase = ScenePhase::try_from(code).inspect_err(|err| warn!("{err}"))?;
        self.handle_scene_phase(phase);
        Ok(())
    }

    /// The window gained or lost focus.
    pub fn handle_window_focused(&mut self, focused: bool) {
        self.queue.append(LogicalEvent::WindowFocused { focused });
    }

    /// The software keyboard appeared or went away.
    pub fn handle_keyboard_visibility(&mut self, visible: bool) {
        self.queue.append(LogicalEvent::KeyboardVisibility { visible });
    }

    // Accessors

    /// Pending events.
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Cached geometry.
    pub fn geometry(&self) -> &GeometryCache {
        &self.geometry
    }

    /// Overlay state machine.
    pub fn overlay(&self) -> &OverlayMachine {
        &self.overlay
    }

    /// Active touch contacts.
    pub fn touches(&self) -> &TouchTracker {
        &self.touches
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The native host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The native host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The clipboard.
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Configuration in use.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Keyboard request from the last successful tick.
    pub fn last_wants_keyboard(&self) -> bool {
        self.last_wants_keyboard
    }

    /// IME rect from the last successful tick.
    pub fn last_ime_rect(&self) -> Option<Rect> {
        self.last_ime_rect
    }

    /// Number of ticks run so far.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clipboard::MemoryClipboard,
        geometry::PixelSize,
        overlay::{OverlayCommand, Placement},
        testing::{RecordingHost, ScriptedRenderer},
        tick::ManualTickSource,
    };

    type TestController =
        FrameController<ScriptedRenderer, RecordingHost, MemoryClipboard, ManualTickSource>;

    fn controller(renderer: ScriptedRenderer, clipboard: MemoryClipboard) -> TestController {
        FrameController::new(
            renderer,
            RecordingHost::default(),
            clipboard,
            ManualTickSource::new(0.0, 0.5),
            GeometryCache::new(PixelSize::new(780, 1688), 2.0),
            BridgeConfig::default(),
        )
        .unwrap()
    }

    fn keyboard(rect: Option<Rect>) -> OutputSnapshot {
        OutputSnapshot::with_keyboard_state(CursorIcon::Text, true, rect)
    }

    #[test]
    fn test_three_tick_typing_scenario() {
        let ime = Rect::new(10.0, 20.0, 100.0, 30.0);
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(keyboard(Some(ime)));
        renderer.push_output(keyboard(Some(ime)));
        renderer.push_output(keyboard(Some(ime)));
        let mut controller = controller(renderer, MemoryClipboard::new());

        let report = controller.tick().unwrap();
        assert_eq!(report.overlay, OverlayTransition::Shown);
        let expected = Rect::new(10.0, 18.0, 100.0, 34.0);
        assert_eq!(
            controller.host().commands,
            vec![
                OverlayCommand::Show {
                    frame: expected,
                    placement: Placement::Ime
                },
                OverlayCommand::AcquireFocus,
            ]
        );
        assert!(controller.host().is_focused());

        controller.handle_text_changed("", "a");
        let report = controller.tick().unwrap();
        assert_eq!(report.events_delivered, 1);
        assert_eq!(report.overlay, OverlayTransition::Unchanged);
        assert_eq!(
            controller.renderer().frames()[1].events,
            vec![LogicalEvent::text_commit("a")]
        );

        let report = controller.tick().unwrap();
        assert_eq!(report.events_delivered, 0);
        assert_eq!(controller.host().commands.len(), 2);
        assert_eq!(
            controller
                .renderer()
                .frames()
                .iter()
                .map(|frame| frame.time)
                .collect::<Vec<_>>(),
            vec![0.0, 0.5, 1.0]
        );
    }

    #[test]
    fn test_tap_outside_hides_then_next_tick_reshows() {
        let ime = Rect::new(10.0, 20.0, 100.0, 30.0);
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(keyboard(Some(ime)));
        let mut controller = controller(renderer, MemoryClipboard::new());
        controller.tick().unwrap();
        controller.host_mut().commands.clear();

        controller.handle_touch_began(1, 300.0, 600.0);
        assert_eq!(
            controller.host().commands,
            vec![
                OverlayCommand::ReleaseFocus,
                OverlayCommand::ClearText,
                OverlayCommand::Hide
            ]
        );
        assert!(!controller.host().is_focused());
        assert!(!controller.overlay().is_showing());
        // The touch itself still reaches the renderer.
        assert_eq!(controller.queue().len(), 2);

        controller.host_mut().commands.clear();
        let report = controller.tick().unwrap();
        assert_eq!(report.overlay, OverlayTransition::Shown);
        assert_eq!(controller.host().commands[1], OverlayCommand::AcquireFocus);
    }

    #[test]
    fn test_touch_inside_overlay_keeps_it() {
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(keyboard(Some(Rect::new(10.0, 20.0, 100.0, 30.0))));
        let mut controller = controller(renderer, MemoryClipboard::new());
        controller.tick().unwrap();

        controller.handle_touch_began(1, 20.0, 30.0);
        controller.handle_touch_ended(1, 20.0, 30.0);
        assert!(controller.overlay().is_showing());
        assert_eq!(controller.host().commands.len(), 2);
    }

    #[test]
    fn test_keyboard_dismissal_clears_committed_text() {
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(keyboard(None));
        renderer.push_output(OutputSnapshot::new(CursorIcon::Default));
        renderer.push_output(keyboard(None));
        let mut controller = controller(renderer, MemoryClipboard::new());

        controller.tick().unwrap();
        controller.handle_text_changed("", "abc");
        controller.tick().unwrap();
        assert!(!controller.overlay().is_showing());

        // Changes while hidden go nowhere.
        controller.handle_text_changed("abc", "abcd");
        assert!(controller.queue().is_empty());

        controller.tick().unwrap();
        controller.handle_text_changed("", "x");
        assert_eq!(
            controller.queue().pending(),
            &[LogicalEvent::text_commit("x")]
        );
    }

    #[test]
    fn test_diff_uses_committed_text_as_base() {
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(keyboard(None));
        let mut controller = controller(renderer, MemoryClipboard::new());
        controller.tick().unwrap();

        controller.handle_text_changed("", "hello");
        // A stale `old` from the host does not cause a duplicate commit.
        controller.handle_text_changed("", "hello!");
        assert_eq!(
            controller.queue().pending(),
            &[
                LogicalEvent::text_commit("hello"),
                LogicalEvent::text_commit("!")
            ]
        );
    }

    #[test]
    fn test_copied_text_written_to_clipboard() {
        let clipboard = MemoryClipboard::new();
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(OutputSnapshot::default().with_copied_text("copied"));
        renderer.push_output(OutputSnapshot::default());
        let mut controller = controller(renderer, clipboard.clone());

        assert!(controller.tick().unwrap().clipboard_written);
        assert_eq!(clipboard.contents().as_deref(), Some("copied"));

        assert!(!controller.tick().unwrap().clipboard_written);
        assert_eq!(clipboard.contents().as_deref(), Some("copied"));
    }

    #[test]
    fn test_paste_reads_clipboard_at_paste_time() {
        let clipboard = MemoryClipboard::new();
        let mut controller = controller(ScriptedRenderer::new(), clipboard.clone());

        controller.handle_paste();
        let mut writer = clipboard.clone();
        writer.set_text("later");
        controller.handle_paste();

        assert_eq!(
            controller.queue().pending(),
            &[LogicalEvent::paste(""), LogicalEvent::paste("later")]
        );
    }

    #[test]
    fn test_signals_are_queued_in_order() {
        let mut controller = controller(ScriptedRenderer::new(), MemoryClipboard::new());
        controller.handle_copy();
        controller.handle_return_key();
        controller.handle_cut();
        controller.handle_scroll(0.0, -12.0);
        controller.handle_window_focused(false);

        let mut expected = vec![LogicalEvent::Copy];
        expected.extend(VirtualKeyCode::Enter.press_release());
        expected.push(LogicalEvent::Cut);
        expected.push(LogicalEvent::Wheel { dx: 0.0, dy: -12.0 });
        expected.push(LogicalEvent::WindowFocused { focused: false });
        assert_eq!(controller.queue().pending(), expected.as_slice());
    }

    #[test]
    fn test_unknown_raw_codes_are_rejected() {
        let mut controller = controller(ScriptedRenderer::new(), MemoryClipboard::new());
        assert_eq!(
            controller.handle_virtual_key_code(42),
            Err(InvalidHostCode::VirtualKey(42))
        );
        assert_eq!(
            controller.handle_scene_phase_code(9),
            Err(InvalidHostCode::ScenePhase(9))
        );
        assert!(controller.queue().is_empty());

        controller.handle_scene_phase_code(0).unwrap();
        assert_eq!(
            controller.queue().pending(),
            &[LogicalEvent::ScenePhaseChanged {
                phase: ScenePhase::Background
            }]
        );
    }

    #[test]
    fn test_degenerate_resize_is_ignored() {
        let mut controller = controller(ScriptedRenderer::new(), MemoryClipboard::new());
        let before = *controller.geometry();

        assert!(!controller.handle_resize(LogicalSize::new(0.0, 100.0), 2.0));
        assert!(!controller.handle_resize(LogicalSize::new(100.0, f32::NAN), 2.0));
        assert!(!controller.handle_resize(LogicalSize::new(100.0, 100.0), -1.0));
        assert_eq!(controller.geometry(), &before);
        assert!(controller.renderer().surface_sizes().is_empty());

        assert!(controller.handle_resize(LogicalSize::new(200.0, 100.0), 3.0));
        assert_eq!(controller.geometry().pixel_size(), PixelSize::new(600, 300));
        assert_eq!(
            controller.renderer().surface_sizes(),
            &[PixelSize::new(600, 300)]
        );
    }

    #[test]
    fn test_safe_area_refreshed_at_tick_start() {
        let mut controller = controller(ScriptedRenderer::new(), MemoryClipboard::new());
        assert!(!controller.tick().unwrap().safe_area_changed);

        let insets = SafeAreaInsets::new(47.0, 0.0, 34.0, 0.0);
        controller.host_mut().safe_area = insets;
        let report = controller.tick().unwrap();
        assert!(report.safe_area_changed);
        assert!(controller.renderer().frames()[1].safe_area_changed);
        assert_eq!(controller.renderer().frames()[1].geometry.safe_area(), insets);

        assert!(!controller.tick().unwrap().safe_area_changed);
    }

    #[test]
    fn test_window_attach_flags_next_frame() {
        let mut controller = controller(ScriptedRenderer::new(), MemoryClipboard::new());
        let insets = SafeAreaInsets::new(20.0, 0.0, 0.0, 0.0);
        controller.host_mut().safe_area = insets;
        controller.handle_window_attached(insets);
        assert!(controller.tick().unwrap().safe_area_changed);
    }

    #[test]
    fn test_cursor_icon_forwarded_on_change_only() {
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(OutputSnapshot::new(CursorIcon::Default));
        renderer.push_output(OutputSnapshot::new(CursorIcon::Default));
        renderer.push_output(OutputSnapshot::new(CursorIcon::PointingHand));
        let mut controller = controller(renderer, MemoryClipboard::new());
        for _ in 0..3 {
            controller.tick().unwrap();
        }
        assert_eq!(
            controller.host().cursor_icons,
            vec![CursorIcon::Default, CursorIcon::PointingHand]
        );
    }

    #[test]
    fn test_renderer_error_consumes_batch() {
        let mut renderer = ScriptedRenderer::new();
        renderer.fail_next_frame();
        let mut controller = controller(renderer, MemoryClipboard::new());
        controller.handle_copy();

        let err = controller.tick().unwrap_err();
        assert!(matches!(err, TickError::Renderer { frame: 0, .. }));
        assert!(controller.queue().is_empty());
        assert!(controller.host().commands.is_empty());

        let report = controller.tick().unwrap();
        assert_eq!(report.frame, 1);
        assert_eq!(report.events_delivered, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = FrameController::new(
            ScriptedRenderer::new(),
            RecordingHost::default(),
            MemoryClipboard::new(),
            ManualTickSource::default(),
            GeometryCache::new(PixelSize::new(100, 100), 1.0),
            BridgeConfig {
                queue_warn_threshold: 0,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(ConfigError::ZeroQueueThreshold)));
    }

    #[test]
    fn test_rotation_while_showing_replaces_default_overlay() {
        let mut renderer = ScriptedRenderer::new();
        renderer.push_output(keyboard(None));
        let mut controller = controller(renderer, MemoryClipboard::new());
        controller.tick().unwrap();
        assert_eq!(
            controller.host().frame(),
            Some(Rect::new(8.0, 792.0, 374.0, 44.0))
        );

        assert!(controller.handle_resize(LogicalSize::new(844.0, 390.0), 2.0));
        let report = controller.tick().unwrap();
        assert_eq!(report.overlay, OverlayTransition::Repositioned);
        let frame = controller.host().frame().unwrap();
        assert_eq!(frame, Rect::new(8.0, 338.0, 828.0, 44.0));
        assert!(frame.intersects(&controller.geometry().bounds()));

        let report = controller.tick().unwrap();
        assert_eq!(report.overlay, OverlayTransition::Unchanged);
        assert_eq!(
            controller.host().commands.last(),
            Some(&OverlayCommand::Reposition { frame })
        );
    }
}
