//! Snowflakes: slow fall with a sinusoidal sway.

use folio_ui::{Color, DrawCommand, Paint, Shape, Surface, Transform};

use super::{phase, uniform, FrameContext};

/// How far past an edge a flake may drift before it is recycled.
const EDGE_MARGIN: f32 = 20.0;
/// Sway phase advance per frame.
const SWAY_STEP: f32 = 0.01;

/// A falling snowflake.
#[derive(Debug, Clone)]
pub struct Snowflake {
    x: f32,
    y: f32,
    size: f32,
    speed_y: f32,
    speed_x: f32,
    opacity: f32,
    swing: f32,
    swing_offset: f32,
    rotation: f32,
    rotation_speed: f32,
}

impl Snowflake {
    /// Creates a flake just above the top edge.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let mut flake = Self {
            x: 0.0,
            y: 0.0,
            size: 0.0,
            speed_y: 0.0,
            speed_x: 0.0,
            opacity: 0.0,
            swing: 0.0,
            swing_offset: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        };
        flake.reset(ctx);
        flake
    }

    fn reset(&mut self, ctx: &mut FrameContext<'_>) {
        let rng = &mut *ctx.rng;
        self.x = uniform(rng, 0.0, ctx.viewport.width);
        self.y = -EDGE_MARGIN;
        self.size = uniform(rng, 3.0, 8.0);
        self.speed_y = uniform(rng, 0.5, 1.0);
        self.speed_x = uniform(rng, -0.25, 0.5);
        self.opacity = uniform(rng, 0.6, 0.3);
        self.swing = uniform(rng, 0.0, 0.5);
        self.swing_offset = phase(rng);
        self.rotation = 0.0;
        self.rotation_speed = uniform(rng, -0.01, 0.02);
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.swing_offset += SWAY_STEP;
        self.x += self.swing_offset.sin() * self.swing + self.speed_x;
        self.y += self.speed_y;
        self.rotation += self.rotation_speed;

        if self.y > ctx.viewport.height + EDGE_MARGIN {
            self.reset(ctx);
        }
        if self.x > ctx.viewport.width + EDGE_MARGIN || self.x < -EDGE_MARGIN {
            self.x = uniform(ctx.rng, 0.0, ctx.viewport.width);
        }
    }

    /// Draws the flake as a soft white disc.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(
            &DrawCommand::new(
                Shape::Circle {
                    center: (0.0, 0.0),
                    radius: self.size / 2.0,
                },
                Paint::Solid(Color::WHITE),
            )
            .with_alpha(self.opacity)
            .with_transform(Transform::at(self.x, self.y).rotated(self.rotation)),
        );
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng};
    use super::*;

    #[test]
    fn test_flake_stays_in_bounds() {
        let mut rng = rng(1);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut flake = Snowflake::new(&mut ctx);

        for _ in 0..5_000 {
            flake.update(&mut ctx);
            let (x, y) = flake.position();
            assert!(y <= 720.0 + EDGE_MARGIN, "flake below recycle bound: {y}");
            assert!((-EDGE_MARGIN..=1280.0 + EDGE_MARGIN).contains(&x), "flake off side: {x}");
        }
    }

    #[test]
    fn test_flake_recycles_to_top() {
        let mut rng = rng(2);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut flake = Snowflake::new(&mut ctx);
        flake.y = 720.0 + EDGE_MARGIN + 0.5;

        flake.update(&mut ctx);
        assert_eq!(flake.position().1, -EDGE_MARGIN);
    }
}
