//! Clipboard access.
//!
//! Reads happen when the user pastes, writes when the renderer reports copied
//! text. Clipboard failures never reach the renderer: a failed read pastes an
//! empty string and a failed write is dropped.

use std::sync::Arc;

use parking_lot::Mutex;

/// A text clipboard.
pub trait Clipboard {
    /// Current clipboard text, or `None` if there is none or it could not be
    /// read.
    fn get_text(&mut self) -> Option<String>;

    /// Replaces the clipboard contents with `text`.
    fn set_text(&mut self, text: &str);
}

impl<C: Clipboard + ?Sized> Clipboard for Box<C> {
    fn get_text(&mut self) -> Option<String> {
        (**self).get_text()
    }

    fn set_text(&mut self, text: &str) {
        (**self).set_text(text);
    }
}

/// In-process clipboard.
///
/// Clones share the same contents, so a test can keep a handle and inspect
/// what the controller wrote. Also used where no system clipboard exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clipboard holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(text.into()))),
        }
    }

    /// Current contents without going through the trait.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.contents.lock().clone()
    }

    fn set_text(&mut self, text: &str) {
        *self.contents.lock() = Some(text.to_owned());
    }
}
