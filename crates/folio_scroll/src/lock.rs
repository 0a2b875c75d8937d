//! Page scroll lock for modal dialogs.
//!
//! The first `lock` pins the page and remembers where it was; the matching
//! last `unlock` hands that offset back so the host can restore it. Nested
//! modals only adjust the depth. The saved offset lives in the lock value
//! itself, so two controllers never share it.

/// What a lock or unlock call changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LockTransition {
    /// The page just became locked at this offset.
    Locked {
        /// Offset saved for the later restore.
        saved_offset: f32,
    },
    /// The page just became unlocked; scroll back here.
    Unlocked {
        /// Offset to restore.
        restore_offset: f32,
    },
    /// Depth changed, page state did not.
    Nested {
        /// Lock depth after the call.
        depth: u32,
    },
    /// `unlock` without a matching `lock`.
    NotLocked,
}

/// Depth-counted scroll lock.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    depth: u32,
    saved_offset: f32,
}

impl ScrollLock {
    /// Creates an unlocked lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the lock; `current_offset` is saved on the outermost call.
    pub fn lock(&mut self, current_offset: f32) -> LockTransition {
        self.depth += 1;
        if self.depth == 1 {
            self.saved_offset = current_offset;
            tracing::debug!("Page scroll locked at {}", current_offset);
            LockTransition::Locked {
                saved_offset: current_offset,
            }
        } else {
            LockTransition::Nested { depth: self.depth }
        }
    }

    /// Releases the lock.
    pub fn unlock(&mut self) -> LockTransition {
        match self.depth {
            0 => LockTransition::NotLocked,
            1 => {
                self.depth = 0;
                tracing::debug!("Page scroll unlocked, restoring {}", self.saved_offset);
                LockTransition::Unlocked {
                    restore_offset: self.saved_offset,
                }
            }
            _ => {
                self.depth -= 1;
                LockTransition::Nested { depth: self.depth }
            }
        }
    }

    /// Returns true while at least one lock is held.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.depth > 0
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }
}
