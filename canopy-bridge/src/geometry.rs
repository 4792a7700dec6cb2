//! Logical geometry shared between the host view and the renderer.
//!
//! Rectangles, points and safe-area insets are expressed in points (logical
//! pixels). The drawing surface itself is tracked in physical pixels together
//! with the device scale, so that
//!
//! ```text
//! logical size = pixel size / scale
//! ```
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the host view
//! - X-axis increases to the right
//! - Y-axis increases downward
//!
//! # Example
//!
//! ```
//! use canopy_bridge::geometry::{GeometryCache, PixelSize, Point, Rect};
//!
//! let geometry = GeometryCache::new(PixelSize::new(750, 1334), 2.0);
//! assert_eq!(geometry.logical_size().width, 375.0);
//!
//! let rect = Rect::new(10.0, 20.0, 100.0, 30.0);
//! assert!(rect.contains(Point::new(50.0, 35.0)));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in points.
///
/// `x`/`y` name the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// The x-coordinate of the top-left corner
    pub x: f32,
    /// The y-coordinate of the top-left corner
    pub y: f32,
    /// The width of the rectangle
    pub width: f32,
    /// The height of the rectangle
    pub height: f32,
}

impl Rect {
    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle from position and size.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Returns `true` when the rectangle covers no area.
    ///
    /// Non-finite dimensions count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.is_finite())
    }

    /// Returns `true` when every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Checks whether `point` lies inside the rectangle, edges included.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Checks whether the two rectangles share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Grows the rectangle by `dx` on the left and right and by `dy` on the
    /// top and bottom. Negative values shrink it.
    pub fn inflate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x - dx,
            y: self.y - dy,
            width: self.width + dx * 2.0,
            height: self.height + dy * 2.0,
        }
    }

    /// Shrinks the rectangle by the given insets.
    pub fn inset(self, insets: SafeAreaInsets) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.left - insets.right).max(0.0),
            height: (self.height - insets.top - insets.bottom).max(0.0),
        }
    }
}

/// Surface dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Creates a new pixel size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// View dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogicalSize {
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl LogicalSize {
    /// Creates a new logical size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Safe area insets reported by the host, in points.
///
/// These represent the areas of the screen obscured by hardware or system
/// chrome: the status bar or camera housing at the top, the home indicator at
/// the bottom, and side insets in landscape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafeAreaInsets {
    /// Top inset.
    pub top: f32,
    /// Right inset.
    pub right: f32,
    /// Bottom inset.
    pub bottom: f32,
    /// Left inset.
    pub left: f32,
}

impl SafeAreaInsets {
    /// No insets.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Creates insets in CSS order (top, right, bottom, left).
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Window geometry the renderer needs but the host changes asynchronously.
///
/// Mutated by host callbacks (resize, window attach, safe-area change) and by
/// the frame controller when it notices a stale safe area at tick start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryCache {
    pixel_size: PixelSize,
    scale: f32,
    safe_area: SafeAreaInsets,
}

impl GeometryCache {
    /// Creates a cache for a surface of `pixel_size` at `scale`.
    ///
    /// A non-positive or non-finite scale is replaced by `1.0`.
    pub fn new(pixel_size: PixelSize, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self {
            pixel_size,
            scale,
            safe_area: SafeAreaInsets::ZERO,
        }
    }

    /// Surface size in physical pixels.
    pub fn pixel_size(&self) -> PixelSize {
        self.pixel_size
    }

    /// Device scale (pixels per point).
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current safe area insets.
    pub fn safe_area(&self) -> SafeAreaInsets {
        self.safe_area
    }

    /// Surface size in points.
    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize {
            width: self.pixel_size.width as f32 / self.scale,
            height: self.pixel_size.height as f32 / self.scale,
        }
    }

    /// The whole surface in points.
    pub fn bounds(&self) -> Rect {
        let size = self.logical_size();
        Rect::new(0.0, 0.0, size.width, size.height)
    }

    /// The surface minus the safe area insets.
    pub fn usable_bounds(&self) -> Rect {
        self.bounds().inset(self.safe_area)
    }

    /// Applies a host resize.
    ///
    /// Returns the new pixel size, or `None` when the request was rejected
    /// because a dimension or the scale is non-positive or non-finite. A
    /// rejected request leaves the cache untouched.
    pub(crate) fn apply_resize(&mut self, size: LogicalSize, scale: f32) -> Option<PixelSize> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(size.width) || !valid(size.height) || !valid(scale) {
            return None;
        }
        let pixel_size = PixelSize {
            width: (size.width * scale).round() as u32,
            height: (size.height * scale).round() as u32,
        };
        if pixel_size.is_degenerate() {
            return None;
        }
        self.pixel_size = pixel_size;
        self.scale = scale;
        Some(pixel_size)
    }

    /// Stores new insets; returns `true` if they differ from the cached ones.
    pub(crate) fn set_safe_area(&mut self, insets: SafeAreaInsets) -> bool {
        if self.safe_area == insets {
            return false;
        }
        self.safe_area = insets;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 30.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(110.0, 50.0)));
        assert!(!rect.contains(Point::new(9.9, 25.0)));
        assert!(!rect.contains(Point::new(50.0, 50.1)));
    }

    #[test]
    fn test_rect_inflate() {
        let rect = Rect::new(10.0, 20.0, 100.0, 30.0).inflate(0.0, 2.0);
        assert_eq!(rect, Rect::new(10.0, 18.0, 100.0, 34.0));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f32::NAN, 10.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(-20.0, -20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_logical_size_and_usable_bounds() {
        let mut geometry = GeometryCache::new(PixelSize::new(780, 1688), 2.0);
        assert_eq!(geometry.logical_size(), LogicalSize::new(390.0, 844.0));

        assert!(geometry.set_safe_area(SafeAreaInsets::new(47.0, 0.0, 34.0, 0.0)));
        assert!(!geometry.set_safe_area(SafeAreaInsets::new(47.0, 0.0, 34.0, 0.0)));
        assert_eq!(geometry.usable_bounds(), Rect::new(0.0, 47.0, 390.0, 763.0));
    }

    #[test]
    fn test_resize_rejects_degenerate_sizes() {
        let mut geometry = GeometryCache::new(PixelSize::new(200, 100), 2.0);
        assert_eq!(geometry.apply_resize(LogicalSize::new(0.0, 50.0), 2.0), None);
        assert_eq!(geometry.apply_resize(LogicalSize::new(50.0, -3.0), 2.0), None);
        assert_eq!(geometry.apply_resize(LogicalSize::new(50.0, 50.0), 0.0), None);
        assert_eq!(
            geometry.apply_resize(LogicalSize::new(f32::INFINITY, 50.0), 2.0),
            None
        );
        assert_eq!(geometry.pixel_size(), PixelSize::new(200, 100));
        assert_eq!(geometry.scale(), 2.0);
    }

    #[test]
    fn test_resize_updates_pixels_and_scale() {
        let mut geometry = GeometryCache::new(PixelSize::new(200, 100), 2.0);
        let size = geometry.apply_resize(LogicalSize::new(320.0, 480.0), 3.0);
        assert_eq!(size, Some(PixelSize::new(960, 1440)));
        assert_eq!(geometry.scale(), 3.0);
        assert_eq!(geometry.logical_size(), LogicalSize::new(320.0, 480.0));
    }

    #[test]
    fn test_invalid_initial_scale_falls_back() {
        let geometry = GeometryCache::new(PixelSize::new(100, 100), f32::NAN);
        assert_eq!(geometry.scale(), 1.0);
    }
}
