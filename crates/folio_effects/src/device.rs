//! Device classification for particle density.
//!
//! Best-effort: a handheld user agent gets 40% of the particles.

/// Broad device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    /// Desktop or laptop browser.
    #[default]
    Desktop,
    /// Phone or tablet browser.
    Handheld,
}

impl DeviceClass {
    /// Device families that count as handheld.
    const HANDHELD_MARKERS: [&'static str; 4] = ["iphone", "ipad", "ipod", "android"];

    /// Classifies a user-agent string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if Self::HANDHELD_MARKERS.iter().any(|marker| ua.contains(marker)) {
            Self::Handheld
        } else {
            Self::Desktop
        }
    }

    /// Share of the pool kept on this device, in percent.
    #[must_use]
    pub const fn reduction_percent(self) -> u32 {
        match self {
            Self::Desktop => 100,
            Self::Handheld => 40,
        }
    }
}
