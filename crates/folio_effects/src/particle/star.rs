//! Shooting stars.
//!
//! Each pool slot is a star that spends most of its life dormant. When the
//! clock passes its scheduled spawn time it streaks down-left across the upper
//! part of the viewport, then goes dormant again with a fresh schedule. The
//! gap between streaks is never shorter than the intensity's interval.

use std::f32::consts::{FRAC_PI_4, FRAC_PI_6};

use folio_ui::{Color, DrawCommand, Paint, Shape, Surface};

use super::{uniform, FrameContext};
use crate::config::Intensity;

/// Random extra delay added on top of the intensity interval.
const JITTER_MS: f64 = 4_000.0;
/// Opacity lost per frame while streaking.
const FADE: f32 = 0.015;
/// Distance past the left or bottom edge at which a streak ends.
const EXIT_MARGIN: f32 = 100.0;

/// Whether a star slot is waiting or streaking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StarPhase {
    /// Invisible until the clock reaches `next_spawn_ms`.
    Dormant {
        /// Clock time of the next streak.
        next_spawn_ms: f64,
    },
    /// Streaking across the sky.
    Active,
}

/// A shooting-star slot.
#[derive(Debug, Clone)]
pub struct ShootingStar {
    x: f32,
    y: f32,
    length: f32,
    speed: f32,
    /// Heading below the horizontal, toward the left.
    angle: f32,
    opacity: f32,
    phase: StarPhase,
    interval_ms: f64,
    streaks: u64,
}

impl ShootingStar {
    /// Creates a dormant slot scheduled from the context's clock.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>, intensity: Intensity) -> Self {
        let mut star = Self {
            x: 0.0,
            y: 0.0,
            length: 0.0,
            speed: 0.0,
            angle: 0.0,
            opacity: 0.0,
            phase: StarPhase::Active,
            interval_ms: intensity.star_interval_ms(),
            streaks: 0,
        };
        star.launch_geometry(ctx);
        star.go_dormant(ctx);
        star
    }

    fn launch_geometry(&mut self, ctx: &mut FrameContext<'_>) {
        let (width, height) = (ctx.viewport.width, ctx.viewport.height);
        let rng = &mut *ctx.rng;
        self.x = uniform(rng, width * 0.5, width * 0.5);
        self.y = uniform(rng, 0.0, height * 0.3);
        self.length = uniform(rng, 40.0, 40.0);
        self.speed = uniform(rng, 12.0, 8.0);
        self.angle = uniform(rng, FRAC_PI_4, FRAC_PI_6);
        self.opacity = 1.0;
    }

    fn go_dormant(&mut self, ctx: &mut FrameContext<'_>) {
        let jitter = f64::from(uniform(ctx.rng, 0.0, 1.0)) * JITTER_MS;
        self.phase = StarPhase::Dormant {
            next_spawn_ms: ctx.now_ms + self.interval_ms + jitter,
        };
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        match self.phase {
            StarPhase::Dormant { next_spawn_ms } => {
                if ctx.now_ms >= next_spawn_ms {
                    self.launch_geometry(ctx);
                    self.phase = StarPhase::Active;
                    self.streaks += 1;
                    tracing::trace!("Shooting star launched at {:.0} ms", ctx.now_ms);
                }
            }
            StarPhase::Active => {
                self.x -= self.angle.cos() * self.speed;
                self.y += self.angle.sin() * self.speed;
                self.opacity -= FADE;

                if self.opacity <= 0.0
                    || self.x < -EXIT_MARGIN
                    || self.y > ctx.viewport.height + EXIT_MARGIN
                {
                    self.go_dormant(ctx);
                }
            }
        }
    }

    /// Draws the streak while active; nothing while dormant.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_active() {
            return;
        }

        let tail = (
            self.x + self.angle.cos() * self.length,
            self.y - self.angle.sin() * self.length,
        );
        let white = Color::WHITE;
        surface.draw(
            &DrawCommand::new(
                Shape::Line {
                    from: (self.x, self.y),
                    to: tail,
                    width: 2.0,
                },
                Paint::LinearGradient {
                    from: (self.x, self.y),
                    to: tail,
                    stops: [(0.0, white.with_alpha(0.0)), (0.5, white.with_alpha(0.8)), (1.0, white)],
                },
            )
            .with_alpha(self.opacity)
            .with_shadow(10.0, white.with_alpha(0.8)),
        );
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> StarPhase {
        self.phase
    }

    /// Returns true while streaking.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == StarPhase::Active
    }

    /// Streaks launched since creation.
    #[must_use]
    pub fn streaks(&self) -> u64 {
        self.streaks
    }

    /// Streak head position.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}
