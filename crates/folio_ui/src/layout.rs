//! Geometry for the viewport and page regions.

use serde::{Deserialize, Serialize};

/// A rectangle in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// The visible browser viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width.
    pub width: f32,
    /// Inner height.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if a point is further than `margin` outside the viewport.
    #[must_use]
    pub fn is_beyond(&self, x: f32, y: f32, margin: f32) -> bool {
        x > self.width + margin || x < -margin || y > self.height + margin || y < -margin
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
