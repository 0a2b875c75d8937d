//! Fog banks that rise from below the viewport, spread out and thin away.

use folio_ui::{Color, DrawCommand, Paint, Shape, Surface};

use super::{uniform, FrameContext};

/// Width gained per frame; height grows at half this rate.
const EXPANSION: f32 = 0.2;
/// Opacity lost per frame.
const THINNING: f32 = 0.001;

const CORE: Color = Color::rgba(100.0 / 255.0, 100.0 / 255.0, 120.0 / 255.0, 0.8);
const MIDDLE: Color = Color::rgba(80.0 / 255.0, 80.0 / 255.0, 100.0 / 255.0, 0.4);
const RIM: Color = Color::rgba(60.0 / 255.0, 60.0 / 255.0, 80.0 / 255.0, 0.0);

/// A rising fog bank.
#[derive(Debug, Clone)]
pub struct FogCloud {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    speed_y: f32,
    speed_x: f32,
    opacity: f32,
    /// The bank dissolves once it rises above this line.
    max_height: f32,
}

impl FogCloud {
    /// Creates a bank just below the bottom edge.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let mut cloud = Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            speed_y: 0.0,
            speed_x: 0.0,
            opacity: 0.0,
            max_height: 0.0,
        };
        cloud.reset(ctx);
        cloud
    }

    fn reset(&mut self, ctx: &mut FrameContext<'_>) {
        let height = ctx.viewport.height;
        let rng = &mut *ctx.rng;
        self.x = uniform(rng, 0.0, ctx.viewport.width);
        self.y = height + 50.0;
        self.width = uniform(rng, 150.0, 200.0);
        self.height = uniform(rng, 60.0, 80.0);
        self.speed_y = uniform(rng, 0.2, 0.3);
        self.speed_x = uniform(rng, -0.2, 0.4);
        self.opacity = uniform(rng, 0.2, 0.3);
        self.max_height = uniform(rng, height * 0.3, height * 0.4);
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.y -= self.speed_y;
        self.x += self.speed_x;
        self.width += EXPANSION;
        self.height += EXPANSION * 0.5;
        self.opacity -= THINNING;

        if self.y < self.max_height || self.opacity <= 0.0 {
            self.reset(ctx);
        }
    }

    /// Draws the bank as an ellipse shaded by a radial gradient.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let center = (self.x, self.y);
        surface.draw(
            &DrawCommand::new(
                Shape::Ellipse {
                    center,
                    rx: self.width / 2.0,
                    ry: self.height / 2.0,
                },
                Paint::RadialGradient {
                    center,
                    radius: self.width / 2.0,
                    stops: [(0.0, CORE), (0.5, MIDDLE), (1.0, RIM)],
                },
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

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng};
    use super::*;

    #[test]
    fn test_fog_rises_spreads_and_resets() {
        let mut rng = rng(41);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut cloud = FogCloud::new(&mut ctx);
        let start_width = cloud.width;

        cloud.update(&mut ctx);
        assert!(cloud.position().1 < 770.0);
        assert!((cloud.width - start_width - EXPANSION).abs() < 1e-3);

        let mut resets = 0;
        for _ in 0..10_000 {
            let before = cloud.position().1;
            cloud.update(&mut ctx);
            if cloud.position().1 > before {
                resets += 1;
                assert_eq!(cloud.position().1, 770.0);
            }
            assert!(cloud.opacity > 0.0);
        }
        assert!(resets > 0);
    }
}
