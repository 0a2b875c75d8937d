//! Drawing surface abstraction.
//!
//! Particles describe what they look like as [`DrawCommand`]s; a [`Surface`]
//! turns those into pixels. In the browser that is a 2D canvas context, in
//! tests and headless runs it is a [`RecordingSurface`] that keeps the
//! commands for inspection.

use crate::layout::{Rect, Viewport};
use crate::style::Color;

/// Local transform applied before a shape is drawn.
///
/// Applied in canvas order: translate, then rotate, then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation (x, y).
    pub translate: (f32, f32),
    /// Rotation in radians.
    pub rotation: f32,
    /// Scale (x, y).
    pub scale: (f32, f32),
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0),
        rotation: 0.0,
        scale: (1.0, 1.0),
    };

    /// A pure translation to (x, y).
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            translate: (x, y),
            rotation: 0.0,
            scale: (1.0, 1.0),
        }
    }

    /// Sets the rotation.
    #[must_use]
    pub const fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the scale.
    #[must_use]
    pub const fn scaled(mut self, x: f32, y: f32) -> Self {
        self.scale = (x, y);
        self
    }

    /// Returns true if this transform leaves coordinates unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Gradient color stop: offset (0-1) and color.
pub type ColorStop = (f32, Color);

/// How a shape is filled or stroked.
///
/// Gradients carry exactly three stops so building one never allocates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// A flat color.
    Solid(Color),
    /// Linear gradient between two points (local coordinates).
    LinearGradient {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Color stops.
        stops: [ColorStop; 3],
    },
    /// Radial gradient from a center out to a radius (local coordinates).
    RadialGradient {
        /// Center point.
        center: (f32, f32),
        /// Outer radius.
        radius: f32,
        /// Color stops.
        stops: [ColorStop; 3],
    },
}

/// Soft glow behind a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Blur radius in pixels.
    pub blur: f32,
    /// Glow color.
    pub color: Color,
}

/// Geometry of a draw command, in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Filled circle.
    Circle {
        /// Center.
        center: (f32, f32),
        /// Radius.
        radius: f32,
    },
    /// Filled axis-aligned ellipse.
    Ellipse {
        /// Center.
        center: (f32, f32),
        /// Horizontal radius.
        rx: f32,
        /// Vertical radius.
        ry: f32,
    },
    /// Filled four-point diamond around the origin.
    Diamond {
        /// Half of the horizontal extent.
        half_width: f32,
        /// Half of the vertical extent.
        half_height: f32,
    },
    /// Filled heart built from two cubic curves around the origin.
    Heart {
        /// Overall size.
        size: f32,
    },
    /// Filled rectangle.
    Rect(Rect),
    /// Stroked line segment.
    Line {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Stroke width.
        width: f32,
    },
}

/// One shape to draw, with its paint and state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// What to draw.
    pub shape: Shape,
    /// Fill (or stroke, for lines).
    pub paint: Paint,
    /// Global alpha (0-1).
    pub alpha: f32,
    /// Local transform.
    pub transform: Transform,
    /// Optional glow.
    pub shadow: Option<Shadow>,
}

impl DrawCommand {
    /// Creates an opaque, untransformed command.
    #[must_use]
    pub const fn new(shape: Shape, paint: Paint) -> Self {
        Self {
            shape,
            paint,
            alpha: 1.0,
            transform: Transform::IDENTITY,
            shadow: None,
        }
    }

    /// Sets the global alpha.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the local transform.
    #[must_use]
    pub const fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Adds a glow.
    #[must_use]
    pub const fn with_shadow(mut self, blur: f32, color: Color) -> Self {
        self.shadow = Some(Shadow { blur, color });
        self
    }
}

/// Something particles can be drawn onto.
pub trait Surface {
    /// Matches the surface's pixel size to the viewport.
    fn resize(&mut self, viewport: Viewport);

    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    /// Draws a single command.
    fn draw(&mut self, command: &DrawCommand);
}

/// Surface that records commands instead of rasterizing them.
///
/// Holds the commands drawn since the last [`Surface::clear`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// Current pixel size.
    size: Option<Viewport>,
    /// Commands since the last clear.
    commands: Vec<DrawCommand>,
    /// Number of clears performed.
    clears: u64,
    /// Number of resizes performed.
    resizes: u64,
}

impl RecordingSurface {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: None,
            commands: Vec::with_capacity(1024),
            clears: 0,
            resizes: 0,
        }
    }

    /// Commands drawn since the last clear.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current size, if the surface has been sized.
    #[must_use]
    pub fn size(&self) -> Option<Viewport> {
        self.size
    }

    /// Total clears performed.
    #[must_use]
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Total resizes performed.
    #[must_use]
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.size = Some(viewport);
        self.resizes += 1;
        // Resizing a canvas wipes it.
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(*command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_frame() {
        let mut surface = RecordingSurface::new();
        surface.resize(Viewport::new(800.0, 600.0));

        surface.draw(&DrawCommand::new(
            Shape::Circle { center: (10.0, 10.0), radius: 3.0 },
            Paint::Solid(Color::WHITE),
        ));
        assert_eq!(surface.commands().len(), 1);

        surface.clear();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.size(), Some(Viewport::new(800.0, 600.0)));
    }

    #[test]
    fn test_transform_builder() {
        let t = Transform::at(5.0, 6.0).rotated(0.5).scaled(0.25, 1.0);
        assert_eq!(t.translate, (5.0, 6.0));
        assert_eq!(t.rotation, 0.5);
        assert_eq!(t.scale, (0.25, 1.0));
        assert!(!t.is_identity());
        assert!(Transform::default().is_identity());
    }
}
