//! # Smooth-Scroll Driver
//!
//! The controller never moves the page itself. It asks a [`SmoothScroll`]
//! driver to animate to an offset and learns about completion from the
//! driver's per-frame [`SmoothScroll::tick`], which the host calls from its
//! animation-frame loop.
//!
//! [`EasedScroll`] is the stock driver: a single eased scalar animation.

use folio_ui::{Animation, Easing};

/// Options for one animated scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollToOptions {
    /// Animation length.
    pub duration_ms: f64,
    /// Added to the target offset.
    pub offset: f32,
}

impl ScrollToOptions {
    /// Animates over `duration_ms` with no offset.
    #[must_use]
    pub const fn over(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            offset: 0.0,
        }
    }
}

/// State reported by one driver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    /// No animation in flight.
    Idle,
    /// Animation in flight.
    Animating,
    /// The animation landed on this tick. Reported exactly once per
    /// `scroll_to`.
    Completed,
}

/// Result of one driver tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTick {
    /// Scroll offset the host should apply.
    pub position: f32,
    /// Animation state after this tick.
    pub state: TickState,
}

/// An animated-scroll primitive.
pub trait SmoothScroll {
    /// Starts animating to `target`, replacing any animation in flight.
    fn scroll_to(&mut self, target: f32, options: ScrollToOptions);

    /// Advances the animation to `now_ms`.
    fn tick(&mut self, now_ms: f64) -> ScrollTick;

    /// Syncs the driver to a scroll offset the page reached natively.
    fn set_position(&mut self, position: f32);

    /// Lands an animation in flight on its target at once. The next tick
    /// reports [`TickState::Idle`], not [`TickState::Completed`].
    fn finish(&mut self);

    /// Current offset.
    fn position(&self) -> f32;

    /// Returns true while an animation is in flight.
    fn is_animating(&self) -> bool;

    /// Releases the driver. Later calls are ignored.
    fn destroy(&mut self);

    /// Returns true once destroyed.
    fn is_destroyed(&self) -> bool;
}

/// Eased single-axis scroll driver.
#[derive(Debug, Clone)]
pub struct EasedScroll {
    animation: Animation,
    in_flight: bool,
    /// Time of the previous tick of the current animation.
    last_tick_ms: Option<f64>,
    destroyed: bool,
}

impl EasedScroll {
    /// Creates a driver resting at `position`.
    #[must_use]
    pub fn new(position: f32) -> Self {
        Self::with_easing(position, Easing::ExponentialSettle)
    }

    /// Creates a driver with a custom easing curve.
    #[must_use]
    pub fn with_easing(position: f32, easing: Easing) -> Self {
        Self {
            animation: Animation::new(position, easing),
            in_flight: false,
            last_tick_ms: None,
            destroyed: false,
        }
    }

    /// Where the current animation is heading.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.animation.target()
    }
}

impl Default for EasedScroll {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl SmoothScroll for EasedScroll {
    fn scroll_to(&mut self, target: f32, options: ScrollToOptions) {
        if self.destroyed {
            tracing::warn!("scroll_to({}) on a destroyed driver", target);
            return;
        }
        #[allow(clippy::cast_possible_truncation)]
        let duration_secs = (options.duration_ms / 1000.0) as f32;
        self.animation.set_duration(duration_secs);
        self.animation.set_target(target + options.offset);
        self.in_flight = true;
        // The first tick anchors the clock.
        self.last_tick_ms = None;
    }

    fn tick(&mut self, now_ms: f64) -> ScrollTick {
        let position = self.animation.value();
        if self.destroyed || !self.in_flight {
            return ScrollTick {
                position,
                state: TickState::Idle,
            };
        }

        let elapsed_ms = self.last_tick_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_tick_ms = Some(now_ms);
        #[allow(clippy::cast_possible_truncation)]
        let dt = (elapsed_ms / 1000.0) as f32;
        self.animation.update(dt);

        let state = if self.animation.is_complete() {
            self.in_flight = false;
            self.last_tick_ms = None;
            TickState::Completed
        } else {
            TickState::Animating
        };

        ScrollTick {
            position: self.animation.value(),
            state,
        }
    }

    /// Ignored while an animation is in flight: the animation owns the offset
    /// until it completes.
    fn set_position(&mut self, position: f32) {
        if !self.in_flight && !self.destroyed {
            self.animation.set_immediate(position);
        }
    }

    fn finish(&mut self) {
        if !self.in_flight || self.destroyed {
            return;
        }
        self.animation.set_immediate(self.animation.target());
        self.in_flight = false;
        self.last_tick_ms = None;
    }

    fn position(&self) -> f32 {
        self.animation.value()
    }

    fn is_animating(&self) -> bool {
        self.in_flight
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.in_flight = false;
        self.last_tick_ms = None;
        tracing::debug!("Smooth-scroll driver destroyed");
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_once_after_duration() {
        let mut driver = EasedScroll::new(0.0);
        driver.scroll_to(1_000.0, ScrollToOptions::over(1_000.0));

        assert_eq!(driver.tick(5_000.0).state, TickState::Animating);
        let halfway = driver.tick(5_500.0);
        assert_eq!(halfway.state, TickState::Animating);
        // The settle curve is past 95% at the halfway mark.
        assert!(halfway.position > 950.0);

        let done = driver.tick(6_000.0);
        assert_eq!(done.state, TickState::Completed);
        assert_eq!(done.position, 1_000.0);
        assert_eq!(driver.tick(6_016.0).state, TickState::Idle);
    }

    #[test]
    fn test_zero_duration_lands_on_first_tick() {
        let mut driver = EasedScroll::new(300.0);
        driver.scroll_to(0.0, ScrollToOptions::over(0.0));

        let tick = driver.tick(0.0);
        assert_eq!(tick.state, TickState::Completed);
        assert_eq!(tick.position, 0.0);
    }

    #[test]
    fn test_native_sync_waits_for_animation() {
        let mut driver = EasedScroll::new(0.0);
        driver.set_position(420.0);
        assert_eq!(driver.position(), 420.0);

        driver.scroll_to(
            800.0,
            ScrollToOptions {
                duration_ms: 500.0,
                offset: -20.0,
            },
        );
        driver.set_position(0.0);
        assert_eq!(driver.target(), 780.0);
        assert!(driver.is_animating());
    }

    #[test]
    fn test_finish_lands_without_completing() {
        let mut driver = EasedScroll::new(0.0);
        driver.scroll_to(900.0, ScrollToOptions::over(1_000.0));
        driver.tick(0.0);
        driver.tick(100.0);

        driver.finish();
        assert!(!driver.is_animating());
        assert_eq!(driver.position(), 900.0);
        assert_eq!(driver.tick(116.0).state, TickState::Idle);

        driver.finish();
        assert_eq!(driver.position(), 900.0);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut driver = EasedScroll::new(0.0);
        driver.scroll_to(500.0, ScrollToOptions::over(1_000.0));
        driver.destroy();
        driver.destroy();

        assert!(driver.is_destroyed());
        assert_eq!(driver.tick(100.0).state, TickState::Idle);
        driver.scroll_to(900.0, ScrollToOptions::over(1_000.0));
        assert!(!driver.is_animating());
    }
}
