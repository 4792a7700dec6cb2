//! canopy-bridge embeds an immediate-mode UI inside a native touch host.
//!
//! The renderer redraws its whole surface every frame and only understands
//! discrete input events. The host delivers stateful input: touch contacts
//! with identifiers, a native text widget that reports whole-string changes,
//! a clipboard, safe-area insets that change under rotation. This crate sits
//! between the two.
//!
//! # Data Flow
//!
//! ```text
//!  host callbacks ──▶ FrameController::handle_* ──▶ EventQueue
//!                                                       │ drain once per tick
//!                                                       ▼
//!  NativeHost ◀── overlay commands ◀── OutputSnapshot ◀── FrameRenderer::frame
//!  Clipboard  ◀── copied text ◀────────────┘
//! ```
//!
//! - [`event`]: the logical event vocabulary and the renderer's output
//! - [`event_queue`]: ordered buffer between frames
//! - [`text_diff`]: native text edits to key and text events
//! - [`overlay`]: visibility and placement of the native text widget
//! - [`controller`]: the frame tick that ties everything together
//!
//! # Features
//!
//! - `testing`: exposes the `testing` doubles for host integration tests
//! - `serde`: serialisation for the event model, to record and replay input

#![deny(missing_docs, clippy::unwrap_used)]

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod overlay;
pub mod renderer;
pub mod text_diff;
pub mod tick;
pub mod touch;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::{
    clipboard::{Clipboard, MemoryClipboard},
    config::{BridgeConfig, ConfigError, OverlayPolicy},
    controller::{FrameController, TickReport},
    error::{InvalidHostCode, TickError},
    event::{CursorIcon, LogicalEvent, OutputSnapshot, PointerButton, ScenePhase, VirtualKeyCode},
    event_queue::EventQueue,
    geometry::{GeometryCache, LogicalSize, PixelSize, Point, Rect, SafeAreaInsets},
    host::NativeHost,
    overlay::{OverlayCommand, OverlayMachine, OverlayState, OverlayTransition, Placement},
    renderer::{FrameInput, FrameRenderer},
    tick::{InstantTickSource, ManualTickSource, TickSource},
};
pub use tracing;
