//! # FOLIO Scroll
//!
//! Full-page section snapping.
//!
//! One wheel notch or arrow key moves exactly one section, animated by a
//! [`SmoothScroll`] driver. Wheel and key input that starts inside a nested
//! scroll region (a modal body, a code listing) is left alone until that
//! region reaches its edge.
//!
//! ## Example
//!
//! ```rust,ignore
//! use folio_scroll::{EasedScroll, PageTree, SectionMap, SnapConfig, SnapController};
//! use folio_ui::{SystemClock, WheelDelta};
//!
//! let config = SnapConfig::default();
//! let sections = SectionMap::discover(&tree, &config.section_marker);
//! let mut snap = SnapController::new(config, sections, EasedScroll::default(), SystemClock::new(), 900.0);
//!
//! if snap.handle_wheel(WheelDelta::vertical(120.0), target, &tree).prevents_default() {
//!     event.prevent_default();
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controller;
pub mod driver;
pub mod lock;
pub mod nested;
pub mod section;
pub mod tree;

pub use config::SnapConfig;
pub use controller::{ControllerStats, EventOutcome, SnapController, SnapPhase};
pub use driver::{EasedScroll, ScrollTick, ScrollToOptions, SmoothScroll, TickState};
pub use lock::{LockTransition, ScrollLock};
pub use section::{Section, SectionMap};
pub use tree::{NodeId, Overflow, PageTree, ScrollMetrics, ScrollTree};
