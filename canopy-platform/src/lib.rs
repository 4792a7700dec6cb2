//! Host-side services for canopy-bridge.
//!
//! - [`clipboard`]: the system clipboard, with an in-memory fallback
//! - [`winit_host`]: drives a [`canopy_bridge::FrameController`] from a
//!   `winit` window, used as a desktop stand-in for the touch host

#![deny(missing_docs, clippy::unwrap_used)]

pub mod clipboard;
pub mod winit_host;

pub use clipboard::platform_clipboard;
#[cfg(all(
    not(target_os = "android"),
    not(target_os = "ios"),
    not(target_family = "wasm")
))]
pub use clipboard::SystemClipboard;
pub use winit_host::{WinitHost, WinitInput};
