//! Tumbling fall: sakura petals and autumn leaves.
//!
//! Both share one motion model. The particle falls with a sinusoidal sway and
//! spins about three axes; rotation about X foreshortens the shape
//! horizontally, which reads as tumbling in 2D.

use folio_ui::{Color, DrawCommand, Paint, Shape, Surface, Transform};

use super::{phase, pick, uniform, EffectRng, FrameContext};

const EDGE_MARGIN: f32 = 20.0;

/// Per-species constants for [`Tumble`].
struct TumbleSpec {
    size: (f32, f32),
    speed_y: (f32, f32),
    speed_x: (f32, f32),
    /// Half-ranges for the X, Y and Z spin rates.
    spin: [f32; 3],
    max_swing: f32,
    sway_step: f32,
}

const PETAL: TumbleSpec = TumbleSpec {
    size: (8.0, 8.0),
    speed_y: (0.3, 0.5),
    speed_x: (-0.4, 0.8),
    spin: [0.01, 0.015, 0.01],
    max_swing: 1.5,
    sway_step: 0.015,
};

const LEAF: TumbleSpec = TumbleSpec {
    size: (12.0, 8.0),
    speed_y: (0.5, 1.5),
    speed_x: (-0.5, 1.0),
    spin: [0.025, 0.03, 0.02],
    max_swing: 2.0,
    sway_step: 0.02,
};

const LEAF_PALETTE: [u32; 5] = [0xFF6B_35FF, 0xF793_1EFF, 0xFDC5_00FF, 0xC144_0EFF, 0x8B45_13FF];

/// Shared tumbling state.
#[derive(Debug, Clone)]
struct Tumble {
    x: f32,
    y: f32,
    size: f32,
    speed_y: f32,
    speed_x: f32,
    /// Rotation about X, Y and Z.
    rotation: [f32; 3],
    rotation_speed: [f32; 3],
    swing: f32,
    swing_offset: f32,
    sway_step: f32,
}

impl Tumble {
    fn spawn(ctx: &mut FrameContext<'_>, spec: &TumbleSpec) -> Self {
        let mut tumble = Self {
            x: 0.0,
            y: 0.0,
            size: 0.0,
            speed_y: 0.0,
            speed_x: 0.0,
            rotation: [0.0; 3],
            rotation_speed: [0.0; 3],
            swing: 0.0,
            swing_offset: 0.0,
            sway_step: spec.sway_step,
        };
        tumble.reset(ctx, spec);
        tumble
    }

    fn reset(&mut self, ctx: &mut FrameContext<'_>, spec: &TumbleSpec) {
        let rng = &mut *ctx.rng;
        self.x = uniform(rng, 0.0, ctx.viewport.width);
        self.y = -EDGE_MARGIN;
        self.size = uniform(rng, spec.size.0, spec.size.1);
        self.speed_y = uniform(rng, spec.speed_y.0, spec.speed_y.1);
        self.speed_x = uniform(rng, spec.speed_x.0, spec.speed_x.1);
        for angle in &mut self.rotation {
            *angle = phase(rng);
        }
        for (speed, half) in self.rotation_speed.iter_mut().zip(spec.spin) {
            *speed = uniform(rng, -half, half * 2.0);
        }
        self.swing = uniform(rng, 0.0, spec.max_swing);
        self.swing_offset = phase(rng);
    }

    /// Moves one frame; returns true when the particle left the viewport
    /// through the bottom and must be reset.
    fn step(&mut self, ctx: &mut FrameContext<'_>) -> bool {
        self.swing_offset += self.sway_step;
        self.x += self.swing_offset.sin() * self.swing + self.speed_x;
        self.y += self.speed_y;
        for (angle, speed) in self.rotation.iter_mut().zip(self.rotation_speed) {
            *angle += speed;
        }

        if self.x > ctx.viewport.width + EDGE_MARGIN || self.x < -EDGE_MARGIN {
            self.x = uniform(ctx.rng, 0.0, ctx.viewport.width);
        }
        self.y > ctx.viewport.height + EDGE_MARGIN
    }

    fn transform(&self) -> Transform {
        let [rot_x, _, rot_z] = self.rotation;
        Transform::at(self.x, self.y)
            .rotated(rot_z)
            .scaled(rot_x.sin() * 0.5 + 0.5, 1.0)
    }
}

/// A cherry-blossom petal.
#[derive(Debug, Clone)]
pub struct SakuraPetal {
    tumble: Tumble,
    color: Color,
}

impl SakuraPetal {
    /// Creates a petal just above the top edge.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let tumble = Tumble::spawn(ctx, &PETAL);
        let color = Self::tint(ctx.rng);
        Self { tumble, color }
    }

    fn tint(rng: &mut EffectRng) -> Color {
        let green = uniform(rng, 180.0, 50.0);
        let blue = uniform(rng, 200.0, 50.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (green, blue) = (green as u8, blue as u8);
        Color::rgba8(255, green, blue, 0.9)
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.tumble.step(ctx) {
            self.tumble.reset(ctx, &PETAL);
            self.color = Self::tint(ctx.rng);
        }
    }

    /// Draws the petal as a foreshortened ellipse.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let size = self.tumble.size;
        surface.draw(
            &DrawCommand::new(
                Shape::Ellipse {
                    center: (0.0, 0.0),
                    rx: size,
                    ry: size / 2.0,
                },
                Paint::Solid(self.color),
            )
            .with_transform(self.tumble.transform()),
        );
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.tumble.x, self.tumble.y)
    }
}

/// An autumn leaf.
#[derive(Debug, Clone)]
pub struct AutumnLeaf {
    tumble: Tumble,
    color: Color,
}

impl AutumnLeaf {
    /// Creates a leaf just above the top edge.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let tumble = Tumble::spawn(ctx, &LEAF);
        let color = Color::hex(pick(ctx.rng, &LEAF_PALETTE));
        Self { tumble, color }
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.tumble.step(ctx) {
            self.tumble.reset(ctx, &LEAF);
            self.color = Color::hex(pick(ctx.rng, &LEAF_PALETTE));
        }
    }

    /// Draws the leaf as a foreshortened diamond.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let size = self.tumble.size;
        surface.draw(
            &DrawCommand::new(
                Shape::Diamond {
                    half_width: size / 3.0,
                    half_height: size / 2.0,
                },
                Paint::Solid(self.color),
            )
            .with_transform(self.tumble.transform()),
        );
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.tumble.x, self.tumble.y)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng};
    use super::*;
    use folio_ui::RecordingSurface;

    #[test]
    fn test_leaf_and_petal_recycle_at_top() {
        let mut rng = rng(21);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut petal = SakuraPetal::new(&mut ctx);
        let mut leaf = AutumnLeaf::new(&mut ctx);

        let mut petal_resets = 0;
        let mut leaf_resets = 0;
        for _ in 0..10_000 {
            let before = (petal.position().1, leaf.position().1);
            petal.update(&mut ctx);
            leaf.update(&mut ctx);
            if petal.position().1 < before.0 {
                petal_resets += 1;
                assert_eq!(petal.position().1, -EDGE_MARGIN);
            }
            if leaf.position().1 < before.1 {
                leaf_resets += 1;
                assert_eq!(leaf.position().1, -EDGE_MARGIN);
            }
            assert!(petal.position().1 <= 720.0 + EDGE_MARGIN);
            assert!(leaf.position().1 <= 720.0 + EDGE_MARGIN);
        }
        assert!(petal_resets > 0);
        assert!(leaf_resets > 0);
    }

    #[test]
    fn test_leaf_color_from_palette() {
        let mut rng = rng(22);
        let mut ctx = ctx(&mut rng, 0.0);
        let palette: Vec<Color> = LEAF_PALETTE.into_iter().map(Color::hex).collect();
        for _ in 0..50 {
            let leaf = AutumnLeaf::new(&mut ctx);
            assert!(palette.contains(&leaf.color));
        }
    }

    #[test]
    fn test_tumble_squashes_horizontally_only() {
        let mut rng = rng(23);
        let mut ctx = ctx(&mut rng, 0.0);
        let petal = SakuraPetal::new(&mut ctx);
        let mut surface = RecordingSurface::new();
        petal.draw(&mut surface);

        let transform = surface.commands()[0].transform;
        assert!((0.0..=1.0).contains(&transform.scale.0));
        assert_eq!(transform.scale.1, 1.0);
    }
}
