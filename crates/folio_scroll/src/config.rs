//! Snap timing and thresholds.

use serde::{Deserialize, Serialize};

/// Controller configuration. Every field has a default, so a partial table
/// deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Duration of one section snap animation.
    pub snap_duration_ms: f64,
    /// Pause after a snap lands before input is accepted again.
    pub settle_delay_ms: f64,
    /// Input is absorbed for this long after a step past the first or last
    /// section.
    pub boundary_cooldown_ms: f64,
    /// Slack when deciding whether a nested scrollable is at its boundary.
    pub boundary_tolerance_px: f32,
    /// Class shared by every snap section.
    pub section_marker: String,
    /// Scroll offset past which the back-to-top control shows.
    pub back_to_top_threshold_px: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_duration_ms: 1_000.0,
            settle_delay_ms: 500.0,
            boundary_cooldown_ms: 300.0,
            boundary_tolerance_px: 1.0,
            section_marker: "snap-section".to_owned(),
            back_to_top_threshold_px: 300.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: SnapConfig =
            serde_json::from_str(r#"{"settle_delay_ms": 250.0}"#).expect("valid config");

        assert_eq!(config.settle_delay_ms, 250.0);
        assert_eq!(config.snap_duration_ms, 1_000.0);
        assert_eq!(config.section_marker, "snap-section");
    }
}
