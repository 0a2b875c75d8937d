//! # FOLIO Effects
//!
//! Ambient particle effects drawn over the whole page.
//!
//! ## Design Principles
//!
//! 1. **Closed set of effects** - one `Particle` enum variant per effect, one
//!    match per behavior
//! 2. **Pool built once** - particles are recycled in place when they leave the
//!    viewport, never reallocated per frame
//! 3. **Nothing for `none`** - a disabled configuration allocates nothing
//! 4. **Replayable** - seeded RNG plus an injected clock
//!
//! ## Example
//!
//! ```rust,ignore
//! use folio_effects::{EffectConfig, ParticleEngine};
//! use folio_ui::{RecordingSurface, SystemClock, Viewport};
//!
//! let config = EffectConfig::from_json_lossy(r#"{"effectType":"snowfall","intensity":"high"}"#);
//! let mut engine = ParticleEngine::new(SystemClock::new(), None);
//! engine.attach_surface(RecordingSurface::new());
//! engine.start(config, Viewport::new(1920.0, 1080.0));
//!
//! while engine.frame().should_continue() {
//!     // wait for the next paint tick
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod particle;

pub use config::{EffectConfig, EffectType, Intensity};
pub use device::DeviceClass;
pub use engine::{EngineStats, ParticleEngine, StartOutcome};
pub use error::{ConfigError, ConfigResult};
pub use particle::{EffectRng, FrameContext, Particle};
