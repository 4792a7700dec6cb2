//! The renderer seen from the bridge.
//!
//! The renderer is an opaque frame function: it receives the complete input
//! for one frame and answers with an [`OutputSnapshot`]. How it draws is none
//! of the bridge's business.

use crate::{
    event::{LogicalEvent, OutputSnapshot},
    geometry::{GeometryCache, PixelSize},
};

/// Everything the renderer gets for one frame.
#[derive(Debug)]
pub struct FrameInput<'a> {
    /// Tick timestamp in seconds.
    pub time: f64,
    /// Expected seconds until the next frame.
    pub predicted_dt: f64,
    /// Every event queued since the previous frame, oldest first.
    pub events: Vec<LogicalEvent>,
    /// Geometry as of this tick.
    pub geometry: &'a GeometryCache,
    /// Whether the safe area changed since the previous frame.
    pub safe_area_changed: bool,
}

/// An immediate-mode renderer driven once per tick.
pub trait FrameRenderer {
    /// Error returned by a failed frame.
    type Error: std::error::Error + 'static;

    /// Runs one frame.
    fn frame(&mut self, input: FrameInput<'_>) -> Result<OutputSnapshot, Self::Error>;

    /// The drawing surface now has `size` physical pixels.
    fn resize_surface(&mut self, _size: PixelSize) {}
}
