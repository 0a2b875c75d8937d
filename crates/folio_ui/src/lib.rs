//! # FOLIO UI Primitives
//!
//! The small vocabulary both page engines speak:
//! - Geometry for the viewport and page sections
//! - Colors that format straight into CSS strings
//! - A `Surface` that particles draw onto, backed by a canvas in the browser
//!   or by a command recorder in tests and headless runs
//! - Easing curves for smooth scrolling
//! - Clocks and cancel tokens so every timed behavior can be driven by hand
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       HOST PAGE                           │
//! ├──────────────────────────────────────────────────────────┤
//! │  Events ─→ Scroll-Snap Controller ─→ SmoothScroll         │
//! │  Frames ─→ Particle Engine ─→ Surface (canvas / recorder) │
//! │              ↑                    ↑                       │
//! │            Clock             CancelToken                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod clock;
pub mod frame;
pub mod input;
pub mod layout;
pub mod render;
pub mod style;

pub use animation::{Animation, Easing};
pub use clock::{wall_seed, Clock, ManualClock, SystemClock};
pub use frame::{CancelToken, FrameStatus};
pub use input::{Key, ScrollDirection, WheelDelta};
pub use layout::{Rect, Viewport};
pub use render::{DrawCommand, Paint, RecordingSurface, Shadow, Shape, Surface, Transform};
pub use style::Color;
