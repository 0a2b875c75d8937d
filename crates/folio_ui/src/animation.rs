//! Easing curves and scalar tweening.
//!
//! Section snaps use [`Easing::ExponentialSettle`]: most of the distance is
//! covered early, and the curve lands without a visible crawl at the end.

/// Maps normalized time to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// `min(1, 1.001 - 2^(-10t))`: reaches the target just before `t = 1`.
    #[default]
    ExponentialSettle,
}

impl Easing {
    /// Progress at time `t`, clamped to 0-1.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let decay = 2.0_f32.powf(-10.0 * t);
        match self {
            Self::Linear => t,
            Self::ExponentialSettle => (1.001 - decay).min(1.0),
        }
    }
}

/// A scalar moving from one value to another over a fixed time.
///
/// At rest until [`Animation::set_target`]; lands exactly on the target when
/// the duration has elapsed.
#[derive(Debug, Clone)]
pub struct Animation {
    from: f32,
    to: f32,
    value: f32,
    elapsed_secs: f32,
    duration_secs: f32,
    easing: Easing,
}

impl Animation {
    /// Duration used until [`Animation::set_duration`] is called.
    pub const DEFAULT_DURATION: f32 = 1.0;

    /// Creates a tween resting at `value`.
    #[must_use]
    pub fn new(value: f32, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            value,
            elapsed_secs: Self::DEFAULT_DURATION,
            duration_secs: Self::DEFAULT_DURATION,
            easing,
        }
    }

    /// Sets the duration for the next run, in seconds.
    pub fn set_duration(&mut self, secs: f32) {
        self.duration_secs = secs.max(0.0);
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Where the current run ends.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Returns true once the current run has landed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }

    /// Starts a run from the current value to `target`.
    ///
    /// Restarts even when `target` equals the current target, so a caller
    /// waiting for completion always gets one.
    pub fn set_target(&mut self, target: f32) {
        self.from = self.value;
        self.to = target;
        self.elapsed_secs = 0.0;
        if self.duration_secs == 0.0 {
            // Nothing to animate; the next update lands.
            self.elapsed_secs = -f32::MIN_POSITIVE;
        }
    }

    /// Jumps to `value` and stops any run.
    pub fn set_immediate(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.value = value;
        self.elapsed_secs = self.duration_secs;
    }

    /// Advances by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.is_complete() {
            return;
        }
        self.elapsed_secs = (self.elapsed_secs.max(0.0) + dt).min(self.duration_secs);

        if self.is_complete() {
            self.value = self.to;
            return;
        }
        let progress = self.easing.apply(self.elapsed_secs / self.duration_secs);
        self.value = self.from + (self.to - self.from) * progress;
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(0.0, Easing::ExponentialSettle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_lands_early() {
        assert!((Easing::ExponentialSettle.apply(0.999) - 1.0).abs() < f32::EPSILON);
        assert!(Easing::ExponentialSettle.apply(0.0) < 0.01);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_run_lands_on_target() {
        let mut tween = Animation::default();
        tween.set_target(720.0);

        for _ in 0..70 {
            tween.update(0.016);
        }
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 720.0);
    }

    #[test]
    fn test_same_target_restarts() {
        let mut tween = Animation::new(100.0, Easing::Linear);
        tween.set_target(100.0);
        assert!(!tween.is_complete());
        tween.update(2.0);
        assert!(tween.is_complete());
    }

    #[test]
    fn test_zero_duration_lands_on_next_update() {
        let mut tween = Animation::new(300.0, Easing::Linear);
        tween.set_duration(0.0);
        tween.set_target(0.0);
        assert!(!tween.is_complete());

        tween.update(0.0);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 0.0);
    }
}
