//! # Page
//!
//! One page owns one particle engine and one snap controller. The host feeds
//! it DOM events and animation frames; the page routes each to the engine
//! that cares.
//!
//! ```text
//!   Resize ──→ ParticleEngine::resize + SnapController::set_viewport_height
//!   Wheel  ──→ SnapController::handle_wheel
//!   Key    ──→ SnapController::handle_key
//!   Scroll ──→ SnapController::on_scroll
//!   Frame  ──→ ParticleEngine::frame + SnapController::tick
//! ```

use folio_effects::{EffectConfig, ParticleEngine, StartOutcome};
use folio_scroll::{
    EasedScroll, EventOutcome, LockTransition, NodeId, PageTree, ScrollTick, SectionMap, SnapController,
};
use folio_ui::{Clock, FrameStatus, Key, Surface, SystemClock, Viewport, WheelDelta};

use crate::settings::SiteSettings;

/// An input the host forwards to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The window changed size.
    Resize(Viewport),
    /// A wheel event and the element it started on.
    Wheel {
        /// Wheel movement.
        delta: WheelDelta,
        /// Element under the pointer.
        target: Option<NodeId>,
    },
    /// A key press.
    Key(Key),
    /// The document scrolled to this offset.
    Scroll(f32),
}

/// What one animation frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFrame {
    /// Whether the effect loop wants another frame.
    pub effects: FrameStatus,
    /// Scroll offset the host should apply.
    pub scroll: ScrollTick,
}

/// A portfolio page.
pub struct Page<S: Surface, C: Clock + Clone = SystemClock> {
    effects: ParticleEngine<S, C>,
    snap: SnapController<EasedScroll, C>,
    tree: PageTree,
    viewport: Viewport,
}

impl<S: Surface, C: Clock + Clone> Page<S, C> {
    /// Builds the page and starts the configured effect.
    ///
    /// Sections are discovered once from `tree`. Without a surface the page
    /// still pages, and the effect reports [`StartOutcome::NoSurface`].
    pub fn new(settings: &SiteSettings, surface: Option<S>, tree: PageTree, viewport: Viewport, clock: C) -> Self {
        let mut effects = ParticleEngine::new(clock.clone(), settings.seed);
        if let Some(surface) = surface {
            effects.attach_surface(surface);
        }
        effects.set_device(settings.device());
        effects.start(settings.effects, viewport);

        let sections = SectionMap::discover(&tree, &settings.scroll.section_marker);
        let snap = SnapController::new(
            settings.scroll.clone(),
            sections,
            EasedScroll::default(),
            clock,
            viewport.height,
        );

        Self {
            effects,
            snap,
            tree,
            viewport,
        }
    }

    /// Routes a host event.
    ///
    /// Returns what the host should do with the underlying DOM event; only
    /// wheel and key events can be consumed.
    pub fn handle(&mut self, event: HostEvent) -> EventOutcome {
        match event {
            HostEvent::Resize(viewport) => {
                self.viewport = viewport;
                self.effects.resize(viewport);
                self.snap.set_viewport_height(viewport.height);
                EventOutcome::Ignored
            }
            HostEvent::Wheel { delta, target } => self.snap.handle_wheel(delta, target, &self.tree),
            HostEvent::Key(key) => self.snap.handle_key(key, &self.tree),
            HostEvent::Scroll(offset) => {
                self.snap.on_scroll(offset);
                EventOutcome::Ignored
            }
        }
    }

    /// Runs one animation frame of both engines.
    pub fn frame(&mut self) -> PageFrame {
        PageFrame {
            effects: self.effects.frame(),
            scroll: self.snap.tick(),
        }
    }

    /// Switches the ambient effect, tearing the old one down first.
    pub fn set_effect_config(&mut self, config: EffectConfig) -> StartOutcome {
        self.effects.start(config, self.viewport)
    }

    /// Returns true once the back-to-top control should show.
    #[must_use]
    pub fn back_to_top_visible(&self) -> bool {
        self.snap.back_to_top_visible()
    }

    /// Animates to the top of the page.
    pub fn scroll_to_top(&mut self) -> bool {
        self.snap.scroll_to_top()
    }

    /// Animates to the section with `id` (a navigation link).
    pub fn jump_to_section(&mut self, id: &str) -> bool {
        self.snap.jump_to(id)
    }

    /// Locks page scrolling while a modal is open.
    pub fn open_modal(&mut self) -> LockTransition {
        self.snap.lock()
    }

    /// Releases the modal lock.
    pub fn close_modal(&mut self) -> LockTransition {
        self.snap.unlock()
    }

    /// Stops both engines. Safe to call any number of times.
    pub fn teardown(&mut self) {
        self.effects.teardown();
        self.snap.teardown();
    }

    /// The element tree, for the host to keep nested scroll state current.
    pub fn tree_mut(&mut self) -> &mut PageTree {
        &mut self.tree
    }

    /// The element tree.
    #[must_use]
    pub fn tree(&self) -> &PageTree {
        &self.tree
    }

    /// The particle engine.
    #[must_use]
    pub fn effects(&self) -> &ParticleEngine<S, C> {
        &self.effects
    }

    /// The snap controller.
    #[must_use]
    pub fn snap(&self) -> &SnapController<EasedScroll, C> {
        &self.snap
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_effects::{EffectType, Intensity};
    use folio_ui::{ManualClock, RecordingSurface};

    fn page(settings: &SiteSettings) -> Page<RecordingSurface, ManualClock> {
        let mut tree = PageTree::new();
        let body = tree.add_root();
        tree.add_block(body, "home", &["snap-section"], 0.0, 720.0);
        tree.add_block(body, "projects", &["snap-section"], 720.0, 720.0);
        Page::new(
            settings,
            Some(RecordingSurface::new()),
            tree,
            Viewport::new(1280.0, 720.0),
            ManualClock::new(),
        )
    }

    #[test]
    fn test_resize_reaches_both_engines() {
        let settings = SiteSettings {
            effects: EffectConfig::new(EffectType::Snowfall, Intensity::Low),
            seed: Some(1),
            ..SiteSettings::default()
        };
        let mut page = page(&settings);
        page.handle(HostEvent::Resize(Viewport::new(640.0, 360.0)));

        assert_eq!(page.viewport(), Viewport::new(640.0, 360.0));
        assert_eq!(page.effects().viewport(), Viewport::new(640.0, 360.0));
        assert_eq!(
            page.effects().surface().and_then(RecordingSurface::size),
            Some(Viewport::new(640.0, 360.0))
        );
    }

    #[test]
    fn test_disabled_effects_still_page() {
        let mut page = page(&SiteSettings::default());
        assert!(!page.effects().is_running());

        let outcome = page.handle(HostEvent::Key(Key::ArrowDown));
        assert_eq!(outcome, EventOutcome::Consumed);
        assert_eq!(page.snap().current_index(), 1);
        assert_eq!(page.frame().effects, FrameStatus::Stopped);
    }

    #[test]
    fn test_page_without_surface_still_pages() {
        let settings = SiteSettings {
            effects: EffectConfig::new(EffectType::Rain, Intensity::High),
            ..SiteSettings::default()
        };
        let mut tree = PageTree::new();
        let body = tree.add_root();
        tree.add_block(body, "home", &["snap-section"], 0.0, 720.0);
        tree.add_block(body, "work", &["snap-section"], 720.0, 720.0);
        let mut page: Page<RecordingSurface, ManualClock> =
            Page::new(&settings, None, tree, Viewport::new(1280.0, 720.0), ManualClock::new());

        assert!(!page.effects().is_running());
        assert!(page.jump_to_section("work"));
        assert_eq!(page.snap().current_index(), 1);
    }
}
