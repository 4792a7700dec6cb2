//! System clipboard for desktop hosts.
//!
//! Mobile hosts bridge their own pasteboard through
//! [`canopy_bridge::Clipboard`]; on targets without `arboard` the in-memory
//! clipboard is used instead.

use canopy_bridge::{Clipboard, MemoryClipboard};
#[cfg(all(
    not(target_os = "android"),
    not(target_os = "ios"),
    not(target_family = "wasm")
))]
use tracing::warn;

/// Clipboard backed by the operating system.
#[cfg(all(
    not(target_os = "android"),
    not(target_os = "ios"),
    not(target_family = "wasm")
))]
pub struct SystemClipboard {
    manager: arboard::Clipboard,
}

#[cfg(all(
    not(target_os = "android"),
    not(target_os = "ios"),
    not(target_family = "wasm")
))]
impl SystemClipboard {
    /// Connects to the system clipboard; `None` if it is unavailable.
    pub fn new() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(manager) => Some(Self { manager }),
            Err(err) => {
                warn!("Failed to initialize clipboard: {err}");
                None
            }
        }
    }
}

#[cfg(all(
    not(target_os = "android"),
    not(target_os = "ios"),
    not(target_family = "wasm")
))]
impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match self.manager.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                warn!("Failed to read clipboard: {err}");
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Err(err) = self.manager.set_text(text) {
            warn!("Failed to write clipboard: {err}");
        }
    }
}

/// The best clipboard available on this target.
///
/// Falls back to an in-process clipboard when the system one cannot be
/// opened, so copy and paste keep working inside the app.
pub fn platform_clipboard() -> Box<dyn Clipboard> {
    #[cfg(all(
        not(target_os = "android"),
        not(target_os = "ios"),
        not(target_family = "wasm")
    ))]
    {
        if let Some(clipboard) = SystemClipboard::new() {
            return Box::new(clipboard);
        }
    }
    Box::new(MemoryClipboard::new())
}
