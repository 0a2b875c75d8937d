//! # Particles
//!
//! One closed enum, one variant per effect. Every variant is an independent
//! state machine with the same two steps:
//!
//! - `update` advances physics by exactly one frame and recycles the particle
//!   in place when it crosses its bound;
//! - `draw` emits the particle's current look onto a [`Surface`].
//!
//! Particles never see each other. All randomness comes from the
//! [`FrameContext`] RNG and all wall-clock reads from its `now_ms`, so a seeded
//! engine with a manual clock replays frame for frame.

mod firework;
mod fog;
mod heart;
mod orbit;
mod rain;
mod snow;
mod star;
mod tumble;

pub use firework::{Firework, FireworkPhase, Spark};
pub use fog::FogCloud;
pub use heart::FloatingHeart;
pub use orbit::{Butterfly, FloatingParticle};
pub use rain::Raindrop;
pub use snow::Snowflake;
pub use star::{ShootingStar, StarPhase};
pub use tumble::{AutumnLeaf, SakuraPetal};

use folio_ui::{Surface, Viewport};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::{EffectType, Intensity};

/// The engine's random source.
pub type EffectRng = ChaCha8Rng;

/// Everything a particle may read while spawning or updating.
pub struct FrameContext<'a> {
    /// Current viewport; bounds for recycling.
    pub viewport: Viewport,
    /// Current time from the engine's clock.
    pub now_ms: f64,
    /// Shared random source.
    pub rng: &'a mut EffectRng,
}

/// `base + U[0, 1) × spread`, never panics on an empty span.
pub(crate) fn uniform(rng: &mut EffectRng, base: f32, spread: f32) -> f32 {
    base + rng.gen::<f32>() * spread
}

/// A uniformly chosen element of a non-empty palette.
pub(crate) fn pick<T: Copy>(rng: &mut EffectRng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// A random phase in `[0, 2π)`.
pub(crate) fn phase(rng: &mut EffectRng) -> f32 {
    uniform(rng, 0.0, std::f32::consts::TAU)
}

/// One pooled particle.
#[derive(Debug, Clone)]
pub enum Particle {
    /// Falling snowflake.
    Snowflake(Snowflake),
    /// Rocket and its sparks.
    Firework(Firework),
    /// Cherry-blossom petal.
    SakuraPetal(SakuraPetal),
    /// Autumn leaf.
    AutumnLeaf(AutumnLeaf),
    /// Glowing mote.
    FloatingParticle(FloatingParticle),
    /// Fog bank.
    FogCloud(FogCloud),
    /// Rising heart.
    FloatingHeart(FloatingHeart),
    /// Shooting star slot.
    ShootingStar(ShootingStar),
    /// Raindrop.
    Raindrop(Raindrop),
    /// Butterfly.
    Butterfly(Butterfly),
}

impl Particle {
    /// Creates a fresh particle for an effect, or `None` for
    /// [`EffectType::None`].
    #[must_use]
    pub fn spawn(effect: EffectType, intensity: Intensity, ctx: &mut FrameContext<'_>) -> Option<Self> {
        let particle = match effect {
            EffectType::None => return None,
            EffectType::Snowfall => Self::Snowflake(Snowflake::new(ctx)),
            EffectType::Fireworks => Self::Firework(Firework::new(ctx)),
            EffectType::Sakura => Self::SakuraPetal(SakuraPetal::new(ctx)),
            EffectType::Leaves => Self::AutumnLeaf(AutumnLeaf::new(ctx)),
            EffectType::Particles => Self::FloatingParticle(FloatingParticle::new(ctx)),
            EffectType::Fog => Self::FogCloud(FogCloud::new(ctx)),
            EffectType::Hearts => Self::FloatingHeart(FloatingHeart::new(ctx)),
            EffectType::Stars => Self::ShootingStar(ShootingStar::new(ctx, intensity)),
            EffectType::Rain => Self::Raindrop(Raindrop::new(ctx)),
            EffectType::Butterflies => Self::Butterfly(Butterfly::new(ctx)),
        };
        Some(particle)
    }

    /// Advances the particle by one frame.
    pub fn update(&mut self, ctx: &mut FrameContext<'_>) {
        match self {
            Self::Snowflake(p) => p.update(ctx),
            Self::Firework(p) => p.update(ctx),
            Self::SakuraPetal(p) => p.update(ctx),
            Self::AutumnLeaf(p) => p.update(ctx),
            Self::FloatingParticle(p) => p.update(ctx),
            Self::FogCloud(p) => p.update(ctx),
            Self::FloatingHeart(p) => p.update(ctx),
            Self::ShootingStar(p) => p.update(ctx),
            Self::Raindrop(p) => p.update(ctx),
            Self::Butterfly(p) => p.update(ctx),
        }
    }

    /// Draws the particle's current state.
    pub fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Self::Snowflake(p) => p.draw(surface),
            Self::Firework(p) => p.draw(surface),
            Self::SakuraPetal(p) => p.draw(surface),
            Self::AutumnLeaf(p) => p.draw(surface),
            Self::FloatingParticle(p) => p.draw(surface),
            Self::FogCloud(p) => p.draw(surface),
            Self::FloatingHeart(p) => p.draw(surface),
            Self::ShootingStar(p) => p.draw(surface),
            Self::Raindrop(p) => p.draw(surface),
            Self::Butterfly(p) => p.draw(surface),
        }
    }

    /// The effect this particle belongs to.
    #[must_use]
    pub const fn kind(&self) -> EffectType {
        match self {
            Self::Snowflake(_) => EffectType::Snowfall,
            Self::Firework(_) => EffectType::Fireworks,
            Self::SakuraPetal(_) => EffectType::Sakura,
            Self::AutumnLeaf(_) => EffectType::Leaves,
            Self::FloatingParticle(_) => EffectType::Particles,
            Self::FogCloud(_) => EffectType::Fog,
            Self::FloatingHeart(_) => EffectType::Hearts,
            Self::ShootingStar(_) => EffectType::Stars,
            Self::Raindrop(_) => EffectType::Rain,
            Self::Butterfly(_) => EffectType::Butterflies,
        }
    }

    /// Current anchor position: the rocket or burst origin for fireworks,
    /// the streak head for shooting stars.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        match self {
            Self::Snowflake(p) => p.position(),
            Self::Firework(p) => p.position(),
            Self::SakuraPetal(p) => p.position(),
            Self::AutumnLeaf(p) => p.position(),
            Self::FloatingParticle(p) => p.position(),
            Self::FogCloud(p) => p.position(),
            Self::FloatingHeart(p) => p.position(),
            Self::ShootingStar(p) => p.position(),
            Self::Raindrop(p) => p.position(),
            Self::Butterfly(p) => p.position(),
        }
    }

    /// Live firework sparks held by this particle.
    #[must_use]
    pub fn sub_particle_count(&self) -> usize {
        match self {
            Self::Firework(p) => p.spark_count(),
            _ => 0,
        }
    }
}
