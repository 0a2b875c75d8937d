//! # Particle Engine
//!
//! Owns the drawing surface, the particle pool and the frame loop's cancel
//! token.
//!
//! ## Lifecycle
//!
//! ```text
//!            start(config)                     frame() × N
//!   Idle ───────────────────→ Running ──────────────────────→ Running
//!    ↑                          │   │
//!    │        teardown()        │   │ start(other config)
//!    └──────────────────────────┘   └──→ teardown, then Running again
//! ```
//!
//! `start` always tears the previous run down first, so there is never more
//! than one live loop. A host schedules frames for as long as
//! [`ParticleEngine::frame`] returns [`FrameStatus::Continue`].

use folio_ui::{wall_seed, CancelToken, Clock, FrameStatus, Surface, SystemClock, Viewport};
use rand::SeedableRng;

use crate::config::EffectConfig;
use crate::device::DeviceClass;
use crate::particle::{EffectRng, FrameContext, Particle};

/// What [`ParticleEngine::start`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The effect is `none`; nothing was allocated.
    Disabled,
    /// No surface is attached yet; nothing was allocated.
    NoSurface,
    /// The loop is live with this many particles.
    Running {
        /// Particles in the pool.
        pool_size: usize,
    },
}

/// Counters for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Frames rendered since the last start.
    pub frames: u64,
    /// Particles in the pool.
    pub pool_size: usize,
    /// Firework sparks alive after the last frame.
    pub active_sub_particles: usize,
}

/// The ambient particle engine.
pub struct ParticleEngine<S: Surface, C: Clock = SystemClock> {
    surface: Option<S>,
    clock: C,
    rng: EffectRng,
    device: DeviceClass,
    config: EffectConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    /// Present only while a run is live.
    cancel: Option<CancelToken>,
    /// Whether viewport changes currently reach the surface.
    resize_listener: bool,
    stats: EngineStats,
}

impl<S: Surface, C: Clock> ParticleEngine<S, C> {
    /// Creates an idle engine.
    ///
    /// With `seed` set, every run replays identically for the same clock
    /// readings; otherwise the seed comes from the wall clock.
    #[must_use]
    pub fn new(clock: C, seed: Option<u64>) -> Self {
        Self {
            surface: None,
            clock,
            rng: EffectRng::seed_from_u64(seed.unwrap_or_else(wall_seed)),
            device: DeviceClass::default(),
            config: EffectConfig::default(),
            viewport: Viewport::default(),
            particles: Vec::new(),
            cancel: None,
            resize_listener: false,
            stats: EngineStats::default(),
        }
    }

    /// Hands the engine its drawing surface.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    /// Tears down any run and gives the surface back.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.teardown();
        self.surface.take()
    }

    /// Sets the device class used by the next `start`.
    pub fn set_device(&mut self, device: DeviceClass) {
        self.device = device;
    }

    /// Starts a run for `config`, replacing any previous one.
    pub fn start(&mut self, config: EffectConfig, viewport: Viewport) -> StartOutcome {
        self.teardown();
        self.config = config;
        self.viewport = viewport;

        if config.is_disabled() {
            tracing::debug!("Effects disabled");
            return StartOutcome::Disabled;
        }
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("No surface attached, {} not started", config.effect_type);
            return StartOutcome::NoSurface;
        };

        surface.resize(viewport);
        self.resize_listener = true;

        let pool_size = config.pool_size(self.device);
        let mut ctx = FrameContext {
            viewport,
            now_ms: self.clock.now_ms(),
            rng: &mut self.rng,
        };
        self.particles.reserve_exact(pool_size);
        self.particles.extend(
            (0..pool_size).filter_map(|_| Particle::spawn(config.effect_type, config.intensity, &mut ctx)),
        );

        self.stats = EngineStats {
            frames: 0,
            pool_size: self.particles.len(),
            active_sub_particles: 0,
        };
        self.cancel = Some(CancelToken::new());

        tracing::info!(
            "Effect {} started: intensity {}, {} particles on {:?}",
            config.effect_type,
            config.intensity,
            pool_size,
            self.device
        );
        StartOutcome::Running { pool_size }
    }

    /// Keeps the surface matched to the viewport while a run is live.
    pub fn resize(&mut self, viewport: Viewport) {
        if !self.resize_listener {
            return;
        }
        self.viewport = viewport;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
    }

    /// Renders one frame: clear, then update and draw each particle in pool
    /// order.
    pub fn frame(&mut self) -> FrameStatus {
        if !self.is_running() {
            return FrameStatus::Stopped;
        }
        let Some(surface) = self.surface.as_mut() else {
            return FrameStatus::Stopped;
        };

        surface.clear();
        let mut ctx = FrameContext {
            viewport: self.viewport,
            now_ms: self.clock.now_ms(),
            rng: &mut self.rng,
        };
        let mut sparks = 0;
        for particle in &mut self.particles {
            particle.update(&mut ctx);
            particle.draw(&mut *surface);
            sparks += particle.sub_particle_count();
        }

        self.stats.frames += 1;
        self.stats.active_sub_particles = sparks;
        FrameStatus::Continue
    }

    /// Stops the run: cancels the loop, drops the pool and detaches the
    /// resize listener. Safe to call any number of times.
    pub fn teardown(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
            tracing::info!(
                "Effect {} torn down after {} frames",
                self.config.effect_type,
                self.stats.frames
            );
        }
        self.particles.clear();
        self.resize_listener = false;
        self.stats = EngineStats::default();
    }

    /// Returns true while a run is live and not cancelled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.cancel.as_ref().is_some_and(|token| !token.is_cancelled())
    }

    /// A handle on the live run's cancel token.
    ///
    /// Cancelling it stops the loop at the next frame, as `teardown` would.
    #[must_use]
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.cancel.clone()
    }

    /// Returns true while viewport changes are forwarded to the surface.
    #[must_use]
    pub fn has_resize_listener(&self) -> bool {
        self.resize_listener
    }

    /// Particles in the pool.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.particles.len()
    }

    /// The pool, in draw order.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Counters for the current run.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// The configuration of the last `start`.
    #[must_use]
    pub fn config(&self) -> EffectConfig {
        self.config
    }

    /// The viewport particles are bounded by.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The attached surface.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EffectType, Intensity};
    use folio_ui::{ManualClock, RecordingSurface};

    fn engine() -> ParticleEngine<RecordingSurface, ManualClock> {
        let mut engine = ParticleEngine::new(ManualClock::new(), Some(42));
        engine.attach_surface(RecordingSurface::new());
        engine
    }

    #[test]
    fn test_start_sizes_surface_and_pool() {
        let mut engine = engine();
        let viewport = Viewport::new(1024.0, 768.0);
        let outcome = engine.start(EffectConfig::new(EffectType::Snowfall, Intensity::Low), viewport);

        assert_eq!(outcome, StartOutcome::Running { pool_size: 36 });
        assert_eq!(engine.pool_size(), 36);
        assert!(engine.has_resize_listener());
        assert_eq!(engine.surface().and_then(RecordingSurface::size), Some(viewport));
    }

    #[test]
    fn test_frame_clears_then_draws_every_particle() {
        let mut engine = engine();
        engine.start(EffectConfig::new(EffectType::Rain, Intensity::Medium), Viewport::default());

        assert_eq!(engine.frame(), FrameStatus::Continue);
        assert_eq!(engine.frame(), FrameStatus::Continue);

        let surface = engine.surface().expect("attached");
        assert_eq!(surface.clear_count(), 2);
        assert_eq!(surface.commands().len(), 150);
        assert_eq!(engine.stats().frames, 2);
    }

    #[test]
    fn test_missing_surface_is_a_no_op() {
        let mut engine: ParticleEngine<RecordingSurface, ManualClock> =
            ParticleEngine::new(ManualClock::new(), Some(1));
        let outcome = engine.start(EffectConfig::new(EffectType::Hearts, Intensity::High), Viewport::default());

        assert_eq!(outcome, StartOutcome::NoSurface);
        assert_eq!(engine.pool_size(), 0);
        assert_eq!(engine.frame(), FrameStatus::Stopped);
    }

    #[test]
    fn test_resize_only_while_running() {
        let mut engine = engine();
        engine.resize(Viewport::new(10.0, 10.0));
        assert_eq!(engine.surface().and_then(RecordingSurface::size), None);

        engine.start(EffectConfig::new(EffectType::Fog, Intensity::Low), Viewport::default());
        engine.resize(Viewport::new(640.0, 480.0));
        assert_eq!(engine.viewport(), Viewport::new(640.0, 480.0));
        assert_eq!(engine.surface().map(RecordingSurface::resize_count), Some(2));

        engine.teardown();
        engine.resize(Viewport::new(1.0, 1.0));
        assert_eq!(engine.surface().map(RecordingSurface::resize_count), Some(2));
    }

    #[test]
    fn test_cancel_token_stops_loop() {
        let mut engine = engine();
        engine.start(EffectConfig::new(EffectType::Sakura, Intensity::Medium), Viewport::default());
        let token = engine.cancel_token().expect("live run has a token");

        token.cancel();
        assert_eq!(engine.frame(), FrameStatus::Stopped);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_restart_cancels_previous_token() {
        let mut engine = engine();
        engine.start(EffectConfig::new(EffectType::Leaves, Intensity::Medium), Viewport::default());
        let first = engine.cancel_token().expect("token");

        engine.start(EffectConfig::new(EffectType::Stars, Intensity::Medium), Viewport::default());
        assert!(first.is_cancelled());
        assert!(engine.is_running());
        assert_eq!(engine.pool_size(), 5);
    }
}
