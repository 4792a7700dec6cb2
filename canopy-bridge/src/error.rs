//! Error types surfaced by the bridge.
//!
//! The bridge has no fallible I/O of its own: degenerate input is resolved by
//! policy. What remains are raw host codes that do not map to a known value
//! and renderer failures, which are passed through untouched.

use std::fmt;

/// A raw code from the host protocol that has no logical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidHostCode {
    /// Unknown virtual key code.
    VirtualKey(u8),
    /// Unknown scene phase code.
    ScenePhase(u8),
}

impl fmt::Display for InvalidHostCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VirtualKey(code) => write!(f, "unknown virtual key code {code}"),
            Self::ScenePhase(code) => write!(f, "unknown scene phase code {code}"),
        }
    }
}

impl std::error::Error for InvalidHostCode {}

/// A tick could not complete.
#[derive(Debug)]
pub enum TickError<E> {
    /// The renderer's frame function failed. The event batch for this frame
    /// has been consumed.
    Renderer {
        /// Frame number of the failed tick.
        frame: u64,
        /// The renderer's error.
        source: E,
    },
}

impl<E> TickError<E> {
    /// Returns the renderer error.
    pub fn into_source(self) -> E {
        match self {
            Self::Renderer { source, .. } => source,
        }
    }
}

impl<E: fmt::Display> fmt::Display for TickError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renderer { frame, source } => {
                write!(f, "renderer failed on frame {frame}: {source}")
            }
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for TickError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Renderer { source, .. } => Some(source),
        }
    }
}
