//! Fireworks: a rocket rises to a random altitude, bursts into a ring of
//! sparks, and relaunches once the last spark has burned out.
//!
//! ```text
//!   Ascending ──(y ≤ target)──→ Exploded ──(no sparks left)──→ Ascending
//! ```

use std::f32::consts::TAU;

use folio_ui::{Color, DrawCommand, Paint, Shape, Surface};
use rand::Rng;

use super::{uniform, FrameContext};

/// Downward acceleration applied to sparks, per frame.
const GRAVITY: f32 = 0.1;
/// Alpha lost by a spark per frame.
const FADE: f32 = 0.01;
/// Smallest burst.
const MIN_SPARKS: usize = 40;
/// Largest burst.
const MAX_SPARKS: usize = 70;

/// Firework lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkPhase {
    /// The rocket is climbing.
    Ascending,
    /// The rocket has burst; sparks are falling.
    Exploded,
}

/// One burst fragment.
#[derive(Debug, Clone, Copy)]
pub struct Spark {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    alpha: f32,
    /// Remaining frames.
    life: f32,
    size: f32,
}

impl Spark {
    /// Current alpha.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Remaining lifetime in frames.
    #[must_use]
    pub fn life(&self) -> f32 {
        self.life
    }

    fn is_spent(&self) -> bool {
        self.life <= 0.0 || self.alpha <= 0.0
    }
}

/// A rocket and, once it bursts, its sparks.
#[derive(Debug, Clone)]
pub struct Firework {
    x: f32,
    y: f32,
    target_y: f32,
    phase: FireworkPhase,
    sparks: Vec<Spark>,
    hue: f32,
    speed: f32,
    bursts: u64,
}

impl Firework {
    /// Creates a rocket on the bottom edge.
    #[must_use]
    pub fn new(ctx: &mut FrameContext<'_>) -> Self {
        let mut firework = Self {
            x: 0.0,
            y: 0.0,
            target_y: 0.0,
            phase: FireworkPhase::Ascending,
            sparks: Vec::with_capacity(MAX_SPARKS),
            hue: 0.0,
            speed: 0.0,
            bursts: 0,
        };
        firework.reset(ctx);
        firework
    }

    fn reset(&mut self, ctx: &mut FrameContext<'_>) {
        let height = ctx.viewport.height;
        let rng = &mut *ctx.rng;
        self.x = uniform(rng, 0.0, ctx.viewport.width);
        self.y = height;
        self.target_y = uniform(rng, height * 0.2, height * 0.4);
        self.phase = FireworkPhase::Ascending;
        self.sparks.clear();
        // Blue through white-gold.
        self.hue = uniform(rng, 180.0, 60.0);
        self.speed = uniform(rng, 5.0, 3.0);
    }

    fn explode(&mut self, ctx: &mut FrameContext<'_>) {
        self.phase = FireworkPhase::Exploded;
        self.bursts += 1;

        let rng = &mut *ctx.rng;
        let count = rng.gen_range(MIN_SPARKS..=MAX_SPARKS);
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / count as f32;

        for i in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f32;
            let speed = uniform(rng, 2.0, 3.0);
            self.sparks.push(Spark {
                x: self.x,
                y: self.y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                alpha: 1.0,
                life: uniform(rng, 60.0, 60.0),
                size: uniform(rng, 2.0, 2.0),
            });
        }

        tracing::trace!("Firework burst at ({:.0}, {:.0}) with {} sparks", self.x, self.y, count);
    }

    /// Advances one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        match self.phase {
            FireworkPhase::Ascending => {
                self.y -= self.speed;
                if self.y <= self.target_y {
                    self.explode(ctx);
                }
            }
            FireworkPhase::Exploded => {
                for spark in &mut self.sparks {
                    spark.x += spark.vx;
                    spark.y += spark.vy;
                    spark.vy += GRAVITY;
                    spark.alpha = (spark.alpha - FADE).max(0.0);
                    spark.life -= 1.0;
                }
                self.sparks.retain(|spark| !spark.is_spent());

                if self.sparks.is_empty() {
                    self.reset(ctx);
                }
            }
        }
    }

    /// Draws the rocket head, or every live spark with a glow.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match self.phase {
            FireworkPhase::Ascending => {
                surface.draw(&DrawCommand::new(
                    Shape::Circle {
                        center: (self.x, self.y),
                        radius: 3.0,
                    },
                    Paint::Solid(Color::hsla(self.hue, 1.0, 0.8, 0.8)),
                ));
            }
            FireworkPhase::Exploded => {
                let color = Color::hsla(self.hue, 1.0, 0.7, 1.0);
                for spark in &self.sparks {
                    surface.draw(
                        &DrawCommand::new(
                            Shape::Circle {
                                center: (spark.x, spark.y),
                                radius: spark.size,
                            },
                            Paint::Solid(color),
                        )
                        .with_alpha(spark.alpha)
                        .with_shadow(15.0, color),
                    );
                }
            }
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> FireworkPhase {
        self.phase
    }

    /// Live sparks.
    #[must_use]
    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Number of live sparks.
    #[must_use]
    pub fn spark_count(&self) -> usize {
        self.sparks.len()
    }

    /// Bursts since creation.
    #[must_use]
    pub fn bursts(&self) -> u64 {
        self.bursts
    }

    /// Rocket position, or the burst origin once exploded.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{ctx, rng};
    use super::*;

    /// Runs until the rocket bursts; returns the frame count.
    fn run_to_burst(firework: &mut Firework, ctx: &mut FrameContext<'_>) -> usize {
        let mut frames = 0;
        while firework.phase() == FireworkPhase::Ascending {
            firework.update(ctx);
            frames += 1;
            assert!(frames < 1_000, "rocket never burst");
        }
        frames
    }

    #[test]
    fn test_one_burst_per_ascent() {
        let mut rng = rng(3);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut firework = Firework::new(&mut ctx);

        for cycle in 1..=5 {
            run_to_burst(&mut firework, &mut ctx);
            assert_eq!(firework.bursts(), cycle);
            assert!((MIN_SPARKS..=MAX_SPARKS).contains(&firework.spark_count()));

            while firework.phase() == FireworkPhase::Exploded {
                firework.update(&mut ctx);
                assert_eq!(firework.bursts(), cycle, "burst while already exploded");
            }
            assert_eq!(firework.phase(), FireworkPhase::Ascending);
            assert_eq!(firework.position().1, 720.0);
        }
    }

    #[test]
    fn test_sparks_expire_within_lifespan() {
        let mut rng = rng(4);
        let mut ctx = ctx(&mut rng, 0.0);
        let mut firework = Firework::new(&mut ctx);
        run_to_burst(&mut firework, &mut ctx);

        let longest = firework
            .sparks()
            .iter()
            .map(Spark::life)
            .fold(0.0_f32, f32::max);
        assert!(longest <= 120.0);

        let mut frames = 0.0;
        while firework.phase() == FireworkPhase::Exploded {
            firework.update(&mut ctx);
            frames += 1.0;
            for spark in firework.sparks() {
                assert!(spark.alpha() > 0.0 && spark.life() > 0.0);
            }
        }
        // Alpha hits zero after 100 frames, so no spark outlives that.
        assert!(frames <= longest.min(100.0) + 1.0);
    }
}
