//! Particles that hover around an anchor on a Lissajous path: glowing motes
//! and butterflies.

use folio_ui::{Color, DrawCommand, Paint, Rect, Shape, Surface, Transform};

use super::{phase, pick, uniform, EffectRng, FrameContext};

/// Distance past any edge at which an orbiting particle respawns.
const RESPAWN_MARGIN: f32 = 100.0;

/// Anchor plus the two oscillators driving x and y.
#[derive(Debug, Clone)]
struct Orbit {
    base_x: f32,
    base_y: f32,
    offset_x: f32,
    offset_y: f32,
    speed_x: f32,
    speed_y: f32,
    amplitude: (f32, f32),
    x: f32,
    y: f32,
}

impl Orbit {
    /// A fresh orbit anchored anywhere in the viewport.
    fn anywhere(ctx: &mut FrameContext<'_>, amplitude: (f32, f32), speed: (f32, f32)) -> Self {
        let rng = &mut *ctx.rng;
        let x = uniform(rng, 0.0, ctx.viewport.width);
        let y = uniform(rng, 0.0, ctx.viewport.height);
        Self {
            base_x: x,
            base_y: y,
            offset_x: uniform(rng, 0.0, 100.0),
            offset_y: uniform(rng, 0.0, 100.0),
            speed_x: uniform(rng, speed.0, speed.1),
            speed_y: uniform(rng, speed.0, speed.1),
            amplitude,
            x,
            y,
        }
    }

    /// Advances both oscillators; returns true once the particle has strayed
    /// far enough to respawn.
    fn step(&mut self, ctx: &FrameContext<'_>) -> bool {
        self.offset_x += self.speed_x;
        self.offset_y += self.speed_y;
        self.x = self.base_x + self.offset_x.sin() * self.amplitude.0;
        self.y = self.base_y + self.offset_y.cos() * self.amplitude.1;
        ctx.viewport.is_beyond(self.x, self.y, RESPAWN_MARGIN)
    }
}

/// A small glowing mote.
#[derive(Debug, Clone)]
pub struct FloatingParticle {
    orbit: Orbit,
    size: f32,
    pulse_speed: f32,
    pulse_offset: f32,
    color: Color,
}

impl FloatingParticle {
    const AMPLITUDE: (f32, f32) = (50.0, 50.0);
    const SPEED: (f32, f32) = (0.005, 0.01);
    const PALETTE: [Color; 3] = [
        Color::rgba(1.0, 1.0, 1.0, 0.6),
        Color::rgba(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 0.6),
        Color::rgba(1.0, 215.0 / 255.0, 0.0, 0.5),
    ];

    /// Creates a mote anchored anywhere on screen.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let orbit = Orbit::anywhere(ctx, Self::AMPLITUDE, Self::SPEED);
        let rng: &mut EffectRng = ctx.rng;
        Self {
            orbit,
            size: uniform(rng, 2.0, 3.0),
            pulse_speed: uniform(rng, 0.01, 0.02),
            pulse_offset: phase(rng),
            color: pick(rng, &Self::PALETTE),
        }
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.pulse_offset += self.pulse_speed;
        if self.orbit.step(ctx) {
            *self = Self::new(ctx);
        }
    }

    /// Draws a pulsing, glowing dot.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(
            &DrawCommand::new(
                Shape::Circle {
                    center: (self.orbit.x, self.orbit.y),
                    radius: self.size,
                },
                Paint::Solid(self.color),
            )
            .with_alpha(self.pulse_offset.sin() * 0.3 + 0.7)
            .with_shadow(10.0, self.color),
        );
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.orbit.x, self.orbit.y)
    }
}

/// A butterfly with two flapping wings.
#[derive(Debug, Clone)]
pub struct Butterfly {
    orbit: Orbit,
    size: f32,
    flap_speed: f32,
    flap_offset: f32,
    color: Color,
}

impl Butterfly {
    const AMPLITUDE: (f32, f32) = (100.0, 80.0);
    const SPEED: (f32, f32) = (0.01, 0.02);
    const PALETTE: [u32; 4] = [0xFF8C_00CC, 0xFFD7_00CC, 0x4169_E1CC, 0x8A2B_E2CC];
    const BODY: Color = Color::rgba(0.0, 0.0, 0.0, 0.6);

    /// Creates a butterfly anchored anywhere on screen.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let orbit = Orbit::anywhere(ctx, Self::AMPLITUDE, Self::SPEED);
        let rng: &mut EffectRng = ctx.rng;
        Self {
            orbit,
            size: uniform(rng, 16.0, 8.0),
            flap_speed: uniform(rng, 0.1, 0.1),
            flap_offset: phase(rng),
            color: Color::hex(pick(rng, &Self::PALETTE)),
        }
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.flap_offset += self.flap_speed;
        if self.orbit.step(ctx) {
            *self = Self::new(ctx);
        }
    }

    /// Wing opening, 0 (closed) to 1 (spread).
    fn wing_span(&self) -> f32 {
        self.flap_offset.sin() * 0.5 + 0.5
    }

    /// Draws both wings and the body.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let at = Transform::at(self.orbit.x, self.orbit.y);
        let half = self.size / 2.0;
        let wing_rx = half * self.wing_span();

        for side in [-1.0, 1.0] {
            surface.draw(
                &DrawCommand::new(
                    Shape::Ellipse {
                        center: (side * self.size / 4.0, 0.0),
                        rx: wing_rx,
                        ry: half,
                    },
                    Paint::Solid(self.color),
                )
                .with_transform(at),
            );
        }

        let body = Rect::new(
            -self.size / 16.0,
            -self.size / 3.0,
            self.size / 8.0,
            self.size * 0.66,
        );
        surface.draw(&DrawCommand::new(Shape::Rect(body), Paint::Solid(Self::BODY)).with_transform(at));
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.orbit.x, self.orbit.y)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng};
    use super::*;
    use folio_ui::RecordingSurface;

    #[test]
    fn test_orbit_stays_near_anchor() {
        let mut rng = rng(31);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut mote = FloatingParticle::new(&mut ctx);
        let anchor = (mote.orbit.base_x, mote.orbit.base_y);

        for _ in 0..2_000 {
            mote.update(&mut ctx);
            let (x, y) = mote.position();
            assert!((x - anchor.0).abs() <= 50.0 + f32::EPSILON * 100.0);
            assert!((y - anchor.1).abs() <= 50.0 + f32::EPSILON * 100.0);
        }
    }

    #[test]
    fn test_butterfly_draws_two_wings_and_body() {
        let mut rng = rng(32);
        let mut ctx = ctx(&mut rng, 0.0);
        let butterfly = Butterfly::new(&mut ctx);
        let mut surface = RecordingSurface::new();
        butterfly.draw(&mut surface);

        let commands = surface.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0].shape, Shape::Ellipse { .. }));
        assert!(matches!(commands[1].shape, Shape::Ellipse { .. }));
        assert!(matches!(commands[2].shape, Shape::Rect(_)));
        assert!(commands.iter().all(|c| c.transform.translate == butterfly.position()));
    }

    #[test]
    fn test_stray_particle_respawns() {
        let mut rng = rng(33);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut butterfly = Butterfly::new(&mut ctx);
        butterfly.orbit.base_x = 5_000.0;

        butterfly.update(&mut ctx);
        let (x, _) = butterfly.position();
        assert!(x <= 1280.0 + 100.0);
    }
}
