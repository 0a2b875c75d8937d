//! Rain: fast, slightly slanted streaks.

use folio_ui::{Color, DrawCommand, Paint, Shape, Surface};

use super::{uniform, FrameContext};

const EDGE_MARGIN: f32 = 20.0;
/// Leftward drift per frame.
const SLANT: f32 = 1.0;
const STREAK: Color = Color::rgba(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 0.6);

/// A falling raindrop.
#[derive(Debug, Clone)]
pub struct Raindrop {
    x: f32,
    y: f32,
    length: f32,
    speed: f32,
    opacity: f32,
}

impl Raindrop {
    /// Creates a drop just above the top edge.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let mut drop = Self {
            x: 0.0,
            y: 0.0,
            length: 0.0,
            speed: 0.0,
            opacity: 0.0,
        };
        drop.reset(ctx);
        drop
    }

    fn reset(&mut self, ctx: &mut FrameContext<'_>) {
        let rng = &mut *ctx.rng;
        self.x = uniform(rng, 0.0, ctx.viewport.width);
        self.y = -EDGE_MARGIN;
        self.length = uniform(rng, 15.0, 10.0);
        self.speed = uniform(rng, 10.0, 5.0);
        self.opacity = uniform(rng, 0.5, 0.3);
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.y += self.speed;
        self.x -= SLANT;

        if self.y > ctx.viewport.height + EDGE_MARGIN {
            self.reset(ctx);
        }
    }

    /// Draws a vertical one-pixel streak.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(
            &DrawCommand::new(
                Shape::Line {
                    from: (self.x, self.y),
                    to: (self.x, self.y + self.length),
                    width: 1.0,
                },
                Paint::Solid(STREAK),
            )
            .with_alpha(self.opacity),
        );
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}
