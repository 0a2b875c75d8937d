//! Input vocabulary for page navigation.

/// Keyboard key, as far as page navigation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Anything else.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => Self::Other,
        }
    }

    /// Direction of a section-step key.
    #[must_use]
    pub const fn step_direction(self) -> Option<ScrollDirection> {
        match self {
            Self::ArrowDown => Some(ScrollDirection::Down),
            Self::ArrowUp => Some(ScrollDirection::Up),
            _ => None,
        }
    }
}

/// Vertical scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Towards the top of the page (negative delta).
    Up,
    /// Towards the bottom of the page (positive delta).
    Down,
}

impl ScrollDirection {
    /// Signed section step: -1 for up, +1 for down.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// Wheel movement, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDelta {
    /// Horizontal delta.
    pub dx: f32,
    /// Vertical delta (positive scrolls down).
    pub dy: f32,
}

impl WheelDelta {
    /// A purely vertical delta.
    #[must_use]
    pub const fn vertical(dy: f32) -> Self {
        Self { dx: 0.0, dy }
    }

    /// Vertical direction, or `None` for a purely horizontal wheel.
    #[must_use]
    pub fn direction(&self) -> Option<ScrollDirection> {
        if self.dy > 0.0 {
            Some(ScrollDirection::Down)
        } else if self.dy < 0.0 {
            Some(ScrollDirection::Up)
        } else {
            None
        }
    }
}
