//! # FOLIO
//!
//! The portfolio page host: one ambient particle effect behind the content
//! and whole-section paging over it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  SiteSettings (TOML)                                     │
//! │       │                                                  │
//! │       ↓                                                  │
//! │     Page ──── HostEvent ───→ SnapController ─→ EasedScroll│
//! │       │                                                  │
//! │       └────── frame() ─────→ ParticleEngine ─→ Surface    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! On `wasm32` the [`web`] module supplies the canvas surface and the
//! `requestAnimationFrame` loop.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod page;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use page::{HostEvent, Page, PageFrame};
pub use settings::{SettingsError, SettingsResult, SiteSettings};

/// Re-export the particle engine.
pub use folio_effects as effects;
/// Re-export the snap controller.
pub use folio_scroll as scroll;
/// Re-export the shared primitives.
pub use folio_ui as ui;
