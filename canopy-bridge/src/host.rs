//! The native host seen from the bridge.

use crate::{event::CursorIcon, geometry::SafeAreaInsets, overlay::OverlayCommand};

/// Services the embedding view provides.
///
/// All methods are called on the host's UI thread, from inside
/// [`FrameController`](crate::controller::FrameController) handlers or ticks.
pub trait NativeHost {
    /// Current safe area insets of the view, in points.
    fn safe_area_insets(&self) -> SafeAreaInsets;

    /// Carries out one overlay command on the native text widget.
    ///
    /// Commands arrive in the order they must be applied.
    fn apply_overlay_command(&mut self, command: &OverlayCommand);

    /// Shows a cursor affordance. Hosts without a pointer ignore it.
    fn set_cursor_icon(&mut self, _icon: CursorIcon) {}
}

impl<H: NativeHost + ?Sized> NativeHost for Box<H> {
    fn safe_area_insets(&self) -> SafeAreaInsets {
        (**self).safe_area_insets()
    }

    fn apply_overlay_command(&mut self, command: &OverlayCommand) {
        (**self).apply_overlay_command(command);
    }

    fn set_cursor_icon(&mut self, icon: CursorIcon) {
        (**self).set_cursor_icon(icon);
    }
}
