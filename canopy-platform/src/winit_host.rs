//! Runs the bridge inside a `winit` window.
//!
//! Desktop builds use this as a simulator for the touch host: the window's
//! IME stands in for the native text widget, the left mouse button acts as a
//! single touch contact and the right button as a long press.
//!
//! ```ignore
//! let mut input = WinitInput::for_window(&window);
//! // in `ApplicationHandler::window_event`
//! if !input.handle_window_event(&mut controller, &event) {
//!     // not for the bridge
//! }
//! ```

use std::sync::Arc;

use canopy_bridge::{
    Clipboard, CursorIcon, FrameController, FrameRenderer, LogicalSize, NativeHost,
    OverlayCommand, SafeAreaInsets, ScenePhase, TickSource, VirtualKeyCode, touch::ContactId,
};
use tracing::debug;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Ime, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    keyboard::{Key, ModifiersState, NamedKey},
    window::Window,
};

/// Contact id used for the mouse; real touch ids never reach it.
pub const MOUSE_CONTACT: ContactId = u64::MAX;

const MOUSE_WHEEL_SPEED_MULTIPLIER: f32 = 50.0;

/// [`NativeHost`] over a `winit` window.
pub struct WinitHost {
    window: Arc<Window>,
}

impl WinitHost {
    /// Wraps `window`.
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }

    /// The wrapped window.
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}

impl NativeHost for WinitHost {
    // Desktop windows have no unsafe areas.
    fn safe_area_insets(&self) -> SafeAreaInsets {
        SafeAreaInsets::ZERO
    }

    fn apply_overlay_command(&mut self, command: &OverlayCommand) {
        match command {
            OverlayCommand::Show { frame, .. } | OverlayCommand::Reposition { frame } => {
                self.window.set_ime_cursor_area(
                    winit::dpi::LogicalPosition::new(frame.x, frame.y),
                    winit::dpi::LogicalSize::new(frame.width, frame.height),
                );
            }
            OverlayCommand::AcquireFocus => self.window.set_ime_allowed(true),
            OverlayCommand::ReleaseFocus => self.window.set_ime_allowed(false),
            // The IME owns no text once it is disabled.
            OverlayCommand::Hide | OverlayCommand::ClearText => {}
        }
    }

    fn set_cursor_icon(&mut self, icon: CursorIcon) {
        self.window.set_cursor(winit_cursor(icon));
    }
}

/// Maps a cursor affordance to its `winit` icon.
pub fn winit_cursor(icon: CursorIcon) -> winit::window::CursorIcon {
    match icon {
        CursorIcon::Default => winit::window::CursorIcon::Default,
        CursorIcon::PointingHand => winit::window::CursorIcon::Pointer,
        CursorIcon::ResizeHorizontal => winit::window::CursorIcon::EwResize,
        CursorIcon::ResizeVertical => winit::window::CursorIcon::NsResize,
        CursorIcon::Text => winit::window::CursorIcon::Text,
    }
}

/// Translates `winit` window events into controller calls.
#[derive(Debug)]
pub struct WinitInput {
    scale_factor: f64,
    surface_size: PhysicalSize<u32>,
    cursor: Option<(f32, f32)>,
    mouse_down: bool,
    modifiers: ModifiersState,
    ime_enabled: bool,
}

impl WinitInput {
    /// Starts from a known surface size and scale factor.
    pub fn new(surface_size: PhysicalSize<u32>, scale_factor: f64) -> Self {
        Self {
            scale_factor,
            surface_size,
            cursor: None,
            mouse_down: false,
            modifiers: ModifiersState::empty(),
            ime_enabled: false,
        }
    }

    /// Starts from the window's current size and scale factor.
    pub fn for_window(window: &Window) -> Self {
        Self::new(window.inner_size(), window.scale_factor())
    }

    /// Feeds one event to the controller.
    ///
    /// Returns `false` for events the bridge does not consume.
    pub fn handle_window_event<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        event: &WindowEvent,
    ) -> bool
    where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        match event {
            WindowEvent::Touch(touch) => {
                self.touch(controller, touch.id, touch.phase, touch.location)
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(controller, *position),
            WindowEvent::CursorLeft { .. } => self.cursor_left(controller),
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(controller, *state, *button)
            }
            WindowEvent::MouseWheel { delta, .. } => self.mouse_wheel(controller, *delta),
            WindowEvent::Resized(size) => self.resized(controller, *size),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor_changed(controller, *scale_factor)
            }
            WindowEvent::Focused(focused) => controller.handle_window_focused(*focused),
            WindowEvent::Occluded(occluded) => controller.handle_scene_phase(if *occluded {
                ScenePhase::Background
            } else {
                ScenePhase::Active
            }),
            WindowEvent::Ime(ime) => self.ime(controller, ime),
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    self.key_pressed(controller, &event.logical_key, event.text.as_deref());
                }
            }
            _ => return false,
        }
        true
    }

    /// A touch contact changed phase.
    pub fn touch<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        let (x, y) = self.to_points(location);
        debug!("Touch event: id {id}, phase {phase:?}, position ({x}, {y})");
        match phase {
            TouchPhase::Started => controller.handle_touch_began(id, x, y),
            TouchPhase::Moved => controller.handle_touch_moved(id, x, y),
            TouchPhase::Ended => controller.handle_touch_ended(id, x, y),
            TouchPhase::Cancelled => controller.handle_touch_cancelled(id),
        }
    }

    /// The mouse moved; a drag while the left button is down.
    pub fn cursor_moved<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        position: PhysicalPosition<f64>,
    ) where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        let (x, y) = self.to_points(position);
        self.cursor = Some((x, y));
        if self.mouse_down {
            controller.handle_touch_moved(MOUSE_CONTACT, x, y);
        } else {
            controller.handle_pointer_hover(x, y);
        }
    }

    /// The mouse left the window; an active drag is cancelled.
    pub fn cursor_left<R, H, C, T>(&mut self, controller: &mut FrameController<R, H, C, T>)
    where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        self.cursor = None;
        if std::mem::take(&mut self.mouse_down) {
            controller.handle_touch_cancelled(MOUSE_CONTACT);
        }
    }

    /// A mouse button changed state at the last cursor position.
    pub fn mouse_input<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        state: ElementState,
        button: MouseButton,
    ) where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        let Some((x, y)) = self.cursor else {
            return;
        };
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) if !self.mouse_down => {
                self.mouse_down = true;
                controller.handle_touch_began(MOUSE_CONTACT, x, y);
            }
            (MouseButton::Left, ElementState::Released) if self.mouse_down => {
                self.mouse_down = false;
                controller.handle_touch_ended(MOUSE_CONTACT, x, y);
            }
            (MouseButton::Right, ElementState::Pressed) => controller.handle_long_press(x, y),
            _ => {}
        }
    }

    /// Wheel or trackpad scroll.
    pub fn mouse_wheel<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        delta: MouseScrollDelta,
    ) where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (
                x * MOUSE_WHEEL_SPEED_MULTIPLIER,
                y * MOUSE_WHEEL_SPEED_MULTIPLIER,
            ),
            MouseScrollDelta::PixelDelta(delta) => self.to_points(delta),
        };
        controller.handle_scroll(dx, dy);
    }

    /// The surface changed size.
    pub fn resized<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        size: PhysicalSize<u32>,
    ) where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        self.surface_size = size;
        self.apply_size(controller);
    }

    /// The window moved to a display with another scale factor.
    pub fn scale_factor_changed<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        scale_factor: f64,
    ) where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        self.scale_factor = scale_factor;
        self.apply_size(controller);
    }

    /// An IME event.
    pub fn ime<R, H, C, T>(&mut self, controller: &mut FrameController<R, H, C, T>, ime: &Ime)
    where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        debug!("IME event: {ime:?}");
        match ime {
            Ime::Enabled => self.ime_enabled = true,
            Ime::Disabled => self.ime_enabled = false,
            Ime::Preedit(text, _) => controller.handle_ime_preedit(text),
            Ime::Commit(text) => controller.handle_text_commit(text),
        }
    }

    /// A key went down.
    ///
    /// Plain text is only taken from key events while the IME is off; with
    /// the IME on it arrives as a commit instead.
    pub fn key_pressed<R, H, C, T>(
        &mut self,
        controller: &mut FrameController<R, H, C, T>,
        key: &Key,
        text: Option<&str>,
    ) where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        let shortcut = self.modifiers.control_key() || self.modifiers.super_key();
        match key {
            Key::Named(named) => {
                if let Some(code) = virtual_key(*named) {
                    controller.handle_virtual_key(code);
                    return;
                }
            }
            Key::Character(character) if shortcut => {
                match character.to_lowercase().as_str() {
                    "c" => controller.handle_copy(),
                    "x" => controller.handle_cut(),
                    "v" => controller.handle_paste(),
                    _ => {}
                }
                return;
            }
            _ => {}
        }
        if self.ime_enabled || shortcut {
            return;
        }
        if let Some(text) = text.filter(|text| !text.chars().any(char::is_control)) {
            controller.handle_text_commit(text);
        }
    }

    fn apply_size<R, H, C, T>(&self, controller: &mut FrameController<R, H, C, T>)
    where
        R: FrameRenderer,
        H: NativeHost,
        C: Clipboard,
        T: TickSource,
    {
        let scale = self.scale_factor;
        let size = LogicalSize::new(
            (f64::from(self.surface_size.width) / scale) as f32,
            (f64::from(self.surface_size.height) / scale) as f32,
        );
        controller.handle_resize(size, scale as f32);
    }

    fn to_points(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let logical = position.to_logical::<f64>(self.scale_factor);
        (logical.x as f32, logical.y as f32)
    }
}

fn virtual_key(key: NamedKey) -> Option<VirtualKeyCode> {
    Some(match key {
        NamedKey::Backspace => VirtualKeyCode::Backspace,
        NamedKey::Enter => VirtualKeyCode::Enter,
        NamedKey::Tab => VirtualKeyCode::Tab,
        NamedKey::Escape => VirtualKeyCode::Escape,
        NamedKey::ArrowUp => VirtualKeyCode::ArrowUp,
        NamedKey::ArrowDown => VirtualKeyCode::ArrowDown,
        NamedKey::ArrowLeft => VirtualKeyCode::ArrowLeft,
        NamedKey::ArrowRight => VirtualKeyCode::ArrowRight,
        _ => return None,
    })
}
