//! # Snap Controller
//!
//! Maps wheel and arrow-key input to one-section steps.
//!
//! ## State Machine
//!
//! ```text
//!                 qualifying input                 driver completes
//!   ┌──────┐  ───────────────────→  ┌──────────┐  ─────────────────→  ┌──────────┐
//!   │ Idle │                        │ Snapping │                      │ Settling │
//!   └──────┘  ←──────────────────────────────────────────────────────  └──────────┘
//!      │  ↑                        settle delay elapsed
//!      │  │ cooldown elapsed
//!      ↓  │
//!   ┌──────────┐
//!   │ Cooldown │  ← wheel step past the first or last section
//!   └──────────┘
//! ```
//!
//! Input that starts inside a nested scroll region with room left in the
//! requested direction is never treated as navigation, in any state.
//!
//! Time is read from the injected [`Clock`]; the settle and cooldown phases
//! expire lazily when the next input or tick observes the clock past their
//! deadline.

use folio_ui::{Clock, Key, ScrollDirection, SystemClock, WheelDelta};

use crate::config::SnapConfig;
use crate::driver::{EasedScroll, ScrollTick, ScrollToOptions, SmoothScroll, TickState};
use crate::lock::{LockTransition, ScrollLock};
use crate::nested::nested_consumes;
use crate::section::SectionMap;
use crate::tree::{NodeId, ScrollTree};

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPhase {
    /// Accepting navigation input.
    Idle,
    /// Animating to a section.
    Snapping {
        /// Index being animated to.
        target: usize,
    },
    /// Landed; ignoring input until the deadline.
    Settling {
        /// Clock time at which input is accepted again.
        until_ms: f64,
    },
    /// Absorbing input after a step past either end.
    Cooldown {
        /// Clock time at which input is accepted again.
        until_ms: f64,
    },
}

/// What the host should do with the DOM event it passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// A nested region scrolls natively; leave the event alone.
    Passthrough,
    /// The controller acted on or absorbed the event; prevent the default.
    Consumed,
    /// Not navigation input; leave the event alone.
    Ignored,
    /// The controller is torn down and no longer listens.
    Unhandled,
}

impl EventOutcome {
    /// Returns true if the host should call `preventDefault`.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Event counters, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Wheel events handled.
    pub wheel_events: u64,
    /// Key events handled.
    pub key_events: u64,
    /// Scroll-position updates handled.
    pub scroll_events: u64,
    /// Snap animations started.
    pub snaps: u64,
    /// Wheel steps absorbed at the first or last section.
    pub boundary_hits: u64,
}

#[derive(Debug, Clone, Copy)]
struct Listeners {
    wheel: bool,
    key: bool,
    scroll: bool,
}

impl Listeners {
    const INSTALLED: Self = Self {
        wheel: true,
        key: true,
        scroll: true,
    };
    const REMOVED: Self = Self {
        wheel: false,
        key: false,
        scroll: false,
    };

    fn any(self) -> bool {
        self.wheel || self.key || self.scroll
    }
}

/// The section-snap controller.
pub struct SnapController<D: SmoothScroll = EasedScroll, C: Clock = SystemClock> {
    config: SnapConfig,
    sections: SectionMap,
    driver: D,
    clock: C,
    lock: ScrollLock,
    index: usize,
    phase: SnapPhase,
    viewport_height: f32,
    listeners: Listeners,
    stats: ControllerStats,
}

impl<D: SmoothScroll, C: Clock> SnapController<D, C> {
    /// Starts a controller over `sections` and installs its listeners.
    ///
    /// The initial index is the section under the viewport midpoint at the
    /// driver's current position.
    #[must_use]
    pub fn new(config: SnapConfig, sections: SectionMap, driver: D, clock: C, viewport_height: f32) -> Self {
        let index = sections
            .index_at(driver.position(), viewport_height)
            .unwrap_or(0);
        if sections.is_empty() {
            tracing::warn!("No {:?} sections found, section navigation disabled", config.section_marker);
        }
        tracing::debug!("Snap controller started: {} sections, at {}", sections.len(), index);

        Self {
            config,
            sections,
            driver,
            clock,
            lock: ScrollLock::new(),
            index,
            phase: SnapPhase::Idle,
            viewport_height,
            listeners: Listeners::INSTALLED,
            stats: ControllerStats::default(),
        }
    }

    /// Expires settle and cooldown phases whose deadline has passed.
    fn refresh_phase(&mut self, now_ms: f64) {
        match self.phase {
            SnapPhase::Settling { until_ms } | SnapPhase::Cooldown { until_ms } if now_ms >= until_ms => {
                self.phase = SnapPhase::Idle;
            }
            _ => {}
        }
    }

    fn is_busy(&self) -> bool {
        !matches!(self.phase, SnapPhase::Idle)
    }

    fn begin_snap(&mut self, index: usize) {
        let Some(top) = self.sections.get(index).map(|s| s.top) else {
            return;
        };
        self.index = index;
        self.phase = SnapPhase::Snapping { target: index };
        self.driver
            .scroll_to(top, ScrollToOptions::over(self.config.snap_duration_ms));
        self.stats.snaps += 1;
        tracing::debug!("Snapping to section {} at {}", index, top);
    }

    /// The neighbor of the current section in `direction`, if it exists.
    fn step_target(&self, direction: ScrollDirection) -> Option<usize> {
        self.index
            .checked_add_signed(direction.step())
            .filter(|&next| next < self.sections.len())
    }

    /// Handles a wheel event whose target is `origin`.
    pub fn handle_wheel<T: ScrollTree + ?Sized>(
        &mut self,
        delta: WheelDelta,
        origin: Option<NodeId>,
        tree: &T,
    ) -> EventOutcome {
        if !self.listeners.wheel {
            return EventOutcome::Unhandled;
        }
        self.stats.wheel_events += 1;

        let Some(direction) = delta.direction() else {
            return EventOutcome::Ignored;
        };
        if nested_consumes(tree, origin, direction, self.config.boundary_tolerance_px) {
            return EventOutcome::Passthrough;
        }

        let now = self.clock.now_ms();
        self.refresh_phase(now);

        if self.lock.is_locked() || self.is_busy() {
            return EventOutcome::Consumed;
        }
        if self.sections.is_empty() {
            return EventOutcome::Ignored;
        }

        match self.step_target(direction) {
            Some(next) => self.begin_snap(next),
            None => {
                self.phase = SnapPhase::Cooldown {
                    until_ms: now + self.config.boundary_cooldown_ms,
                };
                self.stats.boundary_hits += 1;
                tracing::debug!("Wheel {:?} absorbed at section {}", direction, self.index);
            }
        }
        EventOutcome::Consumed
    }

    /// Handles a key press; the nested check uses the focused element.
    pub fn handle_key<T: ScrollTree + ?Sized>(&mut self, key: Key, tree: &T) -> EventOutcome {
        if !self.listeners.key {
            return EventOutcome::Unhandled;
        }
        self.stats.key_events += 1;

        let Some(direction) = key.step_direction() else {
            return EventOutcome::Ignored;
        };
        if nested_consumes(tree, tree.focused(), direction, self.config.boundary_tolerance_px) {
            return EventOutcome::Passthrough;
        }

        self.refresh_phase(self.clock.now_ms());
        if self.lock.is_locked() || self.is_busy() {
            return EventOutcome::Ignored;
        }

        match self.step_target(direction) {
            Some(next) => {
                self.begin_snap(next);
                EventOutcome::Consumed
            }
            None => EventOutcome::Ignored,
        }
    }

    /// Reports the page's scroll offset after a scroll event.
    ///
    /// Outside a programmatic snap the current index follows the section
    /// under the viewport midpoint. While a scroll lock is held the offset
    /// is not tracked. Returns the index afterwards.
    pub fn on_scroll(&mut self, scroll_y: f32) -> Option<usize> {
        if !self.listeners.scroll {
            return None;
        }
        self.stats.scroll_events += 1;
        if self.lock.is_locked() {
            return Some(self.index);
        }
        self.driver.set_position(scroll_y);

        if !matches!(self.phase, SnapPhase::Snapping { .. }) {
            if let Some(index) = self.sections.index_at(scroll_y, self.viewport_height) {
                self.index = index;
            }
        }
        Some(self.index)
    }

    /// Advances the driver by one animation frame.
    ///
    /// When the snap animation lands, the settle delay starts. The driver
    /// holds still while a scroll lock is held.
    pub fn tick(&mut self) -> ScrollTick {
        if !self.is_attached() || self.lock.is_locked() {
            return ScrollTick {
                position: self.driver.position(),
                state: TickState::Idle,
            };
        }

        let now = self.clock.now_ms();
        let tick = self.driver.tick(now);
        if tick.state == TickState::Completed {
            if let SnapPhase::Snapping { target } = self.phase {
                self.phase = SnapPhase::Settling {
                    until_ms: now + self.config.settle_delay_ms,
                };
                tracing::debug!("Landed on section {}, settling", target);
            }
        }
        self.refresh_phase(now);
        tick
    }

    /// Animates to the section with `id`, from anywhere.
    ///
    /// Returns false if no such section exists, the page is locked, or the
    /// controller is torn down.
    pub fn jump_to(&mut self, id: &str) -> bool {
        if !self.is_attached() || self.lock.is_locked() {
            return false;
        }
        match self.sections.index_of(id) {
            Some(index) => {
                self.begin_snap(index);
                true
            }
            None => {
                tracing::warn!("No section with id {:?}", id);
                false
            }
        }
    }

    /// Animates back to the top of the page.
    pub fn scroll_to_top(&mut self) -> bool {
        if !self.is_attached() || self.lock.is_locked() {
            return false;
        }
        self.index = 0;
        self.phase = SnapPhase::Snapping { target: 0 };
        self.driver
            .scroll_to(0.0, ScrollToOptions::over(self.config.snap_duration_ms));
        self.stats.snaps += 1;
        true
    }

    /// Returns true once the page is scrolled past the back-to-top threshold.
    #[must_use]
    pub fn back_to_top_visible(&self) -> bool {
        self.driver.position() > self.config.back_to_top_threshold_px
    }

    /// Locks page scrolling for a modal.
    ///
    /// A snap in flight lands on its section at once, so the saved offset is
    /// always a section top.
    pub fn lock(&mut self) -> LockTransition {
        if let SnapPhase::Snapping { target } = self.phase {
            self.driver.finish();
            self.phase = SnapPhase::Idle;
            tracing::debug!("Snap to section {} cut short by scroll lock", target);
        }
        self.lock.lock(self.driver.position())
    }

    /// Releases a modal lock. On the last release the driver is moved back
    /// to the saved offset and the index follows it.
    pub fn unlock(&mut self) -> LockTransition {
        let transition = self.lock.unlock();
        if let LockTransition::Unlocked { restore_offset } = transition {
            self.driver.set_position(restore_offset);
            if let Some(index) = self.sections.index_at(restore_offset, self.viewport_height) {
                self.index = index;
            }
        }
        transition
    }

    /// Tracks a viewport resize.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    /// Removes every listener and releases the driver. Safe to call any
    /// number of times.
    pub fn teardown(&mut self) {
        let was_attached = self.listeners.any();
        self.listeners = Listeners::REMOVED;
        if !self.driver.is_destroyed() {
            self.driver.destroy();
        }
        self.phase = SnapPhase::Idle;
        if was_attached {
            tracing::debug!("Snap controller torn down after {} snaps", self.stats.snaps);
        }
    }

    /// Returns true while listeners are installed.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.listeners.any()
    }

    /// Index of the current section.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Returns true while a snap is animating or settling.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        matches!(self.phase, SnapPhase::Snapping { .. } | SnapPhase::Settling { .. })
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SnapPhase {
        self.phase
    }

    /// The sections, fixed at start-up.
    #[must_use]
    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    /// The smooth-scroll driver.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Returns true while a modal lock is held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Event counters.
    #[must_use]
    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }
}
