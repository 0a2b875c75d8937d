//! Hearts that float up from the bottom edge, gently pulsing.

use folio_ui::{Color, DrawCommand, Paint, Shape, Surface, Transform};

use super::{phase, pick, uniform, FrameContext};

const EDGE_MARGIN: f32 = 20.0;
const SWAY_STEP: f32 = 0.02;

const PALETTE: [(u8, u8, u8); 3] = [(255, 105, 180), (255, 20, 147), (255, 182, 193)];

/// A rising heart.
#[derive(Debug, Clone)]
pub struct FloatingHeart {
    x: f32,
    y: f32,
    size: f32,
    speed_y: f32,
    speed_x: f32,
    swing: f32,
    swing_offset: f32,
    rotation: f32,
    pulse_speed: f32,
    pulse_offset: f32,
    color: Color,
}

impl FloatingHeart {
    /// Creates a heart just below the bottom edge.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let mut heart = Self {
            x: 0.0,
            y: 0.0,
            size: 0.0,
            speed_y: 0.0,
            speed_x: 0.0,
            swing: 0.0,
            swing_offset: 0.0,
            rotation: 0.0,
            pulse_speed: 0.0,
            pulse_offset: 0.0,
            color: Color::TRANSPARENT,
        };
        heart.reset(ctx);
        heart
    }

    fn reset(&mut self, ctx: &mut FrameContext<'_>) {
        let rng = &mut *ctx.rng;
        self.x = uniform(rng, 0.0, ctx.viewport.width);
        self.y = ctx.viewport.height + EDGE_MARGIN;
        self.size = uniform(rng, 10.0, 8.0);
        self.speed_y = uniform(rng, 0.3, 0.5);
        self.speed_x = uniform(rng, -0.15, 0.3);
        self.swing = uniform(rng, 0.0, 0.5);
        self.swing_offset = phase(rng);
        self.rotation = uniform(rng, -0.2, 0.4);
        self.pulse_speed = uniform(rng, 0.02, 0.03);
        self.pulse_offset = phase(rng);
        let (r, g, b) = pick(rng, &PALETTE);
        self.color = Color::rgba8(r, g, b, 0.7);
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.swing_offset += SWAY_STEP;
        self.x += self.swing_offset.sin() * self.swing + self.speed_x;
        self.y -= self.speed_y;
        self.pulse_offset += self.pulse_speed;

        if self.y < -EDGE_MARGIN {
            self.reset(ctx);
        }
    }

    /// Current drawn size, including the pulse.
    #[must_use]
    pub fn pulsed_size(&self) -> f32 {
        self.size * (self.pulse_offset.sin() * 0.2 + 1.0)
    }

    /// Draws the heart, tilted by its fixed rotation.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(
            &DrawCommand::new(Shape::Heart { size: self.pulsed_size() }, Paint::Solid(self.color))
                .with_transform(Transform::at(self.x, self.y).rotated(self.rotation)),
        );
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}
