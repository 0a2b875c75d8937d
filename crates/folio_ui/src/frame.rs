//! Frame-loop cancellation.
//!
//! A frame loop checks its [`CancelToken`] at the top of every iteration;
//! tearing the loop down is a single `cancel()`. Whoever schedules frames
//! (a `requestAnimationFrame` chain, a headless driver) stops rescheduling
//! once a frame reports [`FrameStatus::Stopped`].

use std::cell::Cell;
use std::rc::Rc;

/// Shared, single-threaded cancellation flag.
///
/// Clones observe the same flag. Cancelling is idempotent and permanent;
/// a restarted loop gets a fresh token.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the loop. Safe to call any number of times.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns true once `cancel` has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Result of one frame-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Work was done; schedule the next frame.
    Continue,
    /// The loop is cancelled or was never started; do not reschedule.
    Stopped,
}

impl FrameStatus {
    /// Returns true if another frame should be requested.
    #[must_use]
    pub const fn should_continue(self) -> bool {
        matches!(self, Self::Continue)
    }
}
