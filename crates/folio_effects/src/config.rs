//! # Effect Configuration
//!
//! The page's CMS supplies one record, `{ effectType, intensity }`, that picks
//! the ambient effect. Anything missing or unrecognized falls back to
//! `{ none, medium }`, which renders nothing.
//!
//! Pool size is computed in integer percent so boundary cases such as
//! `60 × 1.5 × 0.4 = 36` floor exactly instead of to `35.999…`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::DeviceClass;
use crate::error::{ConfigError, ConfigResult};

/// Which ambient effect to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    /// No effect. Nothing is allocated or drawn.
    #[default]
    None,
    /// Falling snowflakes.
    Snowfall,
    /// Rockets that burst into sparks.
    Fireworks,
    /// Tumbling cherry-blossom petals.
    Sakura,
    /// Tumbling autumn leaves.
    Leaves,
    /// Glowing motes orbiting in place.
    Particles,
    /// Rising, spreading fog banks.
    Fog,
    /// Rising hearts.
    Hearts,
    /// Occasional shooting stars.
    Stars,
    /// Slanted rain.
    Rain,
    /// Fluttering butterflies.
    Butterflies,
}

impl EffectType {
    /// Every effect, `None` first.
    pub const ALL: [Self; 11] = [
        Self::None,
        Self::Snowfall,
        Self::Fireworks,
        Self::Sakura,
        Self::Leaves,
        Self::Particles,
        Self::Fog,
        Self::Hearts,
        Self::Stars,
        Self::Rain,
        Self::Butterflies,
    ];

    /// Pool size at medium intensity on a desktop device.
    #[must_use]
    pub const fn base_count(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Snowfall => 60,
            Self::Fireworks => 3,
            Self::Sakura => 40,
            Self::Leaves => 50,
            Self::Particles => 100,
            Self::Fog => 10,
            Self::Hearts => 30,
            Self::Stars => 5,
            Self::Rain => 150,
            Self::Butterflies => 15,
        }
    }

    /// The name used in CMS records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Snowfall => "snowfall",
            Self::Fireworks => "fireworks",
            Self::Sakura => "sakura",
            Self::Leaves => "leaves",
            Self::Particles => "particles",
            Self::Fog => "fog",
            Self::Hearts => "hearts",
            Self::Stars => "stars",
            Self::Rain => "rain",
            Self::Butterflies => "butterflies",
        }
    }
}

impl FromStr for EffectType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownEffect(s.to_owned()))
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How dense the effect is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    /// 60% of the base count; shooting stars every 10 s or more.
    Low,
    /// 100% of the base count; shooting stars every 5 s or more.
    #[default]
    Medium,
    /// 150% of the base count; shooting stars every 3 s or more.
    High,
}

impl Intensity {
    /// Pool multiplier, in percent.
    #[must_use]
    pub const fn multiplier_percent(self) -> u32 {
        match self {
            Self::Low => 60,
            Self::Medium => 100,
            Self::High => 150,
        }
    }

    /// Minimum dormant time between two shooting stars from one slot.
    #[must_use]
    pub const fn star_interval_ms(self) -> f64 {
        match self {
            Self::Low => 10_000.0,
            Self::Medium => 5_000.0,
            Self::High => 3_000.0,
        }
    }

    /// The name used in CMS records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Intensity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ConfigError::UnknownIntensity(other.to_owned())),
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record as it arrives, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawEffectConfig {
    #[serde(alias = "effect_type")]
    effect_type: Option<String>,
    intensity: Option<String>,
}

/// Effect selection and density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawEffectConfig")]
pub struct EffectConfig {
    /// Which effect to run.
    pub effect_type: EffectType,
    /// How dense it is.
    pub intensity: Intensity,
}

impl EffectConfig {
    /// Creates a configuration.
    #[must_use]
    pub const fn new(effect_type: EffectType, intensity: Intensity) -> Self {
        Self {
            effect_type,
            intensity,
        }
    }

    /// Returns true if this configuration renders nothing.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self.effect_type, EffectType::None)
    }

    /// Parses a CMS record, rejecting unknown values.
    ///
    /// Missing or empty fields still take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the JSON is malformed or a field names an
    /// unknown effect or intensity.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let raw: RawEffectConfig = serde_json::from_str(json)?;

        let effect_type = match non_empty(raw.effect_type.as_deref()) {
            Some(name) => name.parse()?,
            None => EffectType::default(),
        };
        let intensity = match non_empty(raw.intensity.as_deref()) {
            Some(name) => name.parse()?,
            None => Intensity::default(),
        };

        Ok(Self::new(effect_type, intensity))
    }

    /// Parses a CMS record, falling back to defaults for anything unusable.
    #[must_use]
    pub fn from_json_lossy(json: &str) -> Self {
        match serde_json::from_str::<Self>(json) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Effect record unreadable ({}), effects disabled", err);
                Self::default()
            }
        }
    }

    /// Number of particles to allocate on the given device.
    ///
    /// `floor(base × intensity × device)`, zero for [`EffectType::None`].
    #[must_use]
    pub fn pool_size(&self, device: DeviceClass) -> usize {
        let scaled = u64::from(self.effect_type.base_count())
            * u64::from(self.intensity.multiplier_percent())
            * u64::from(device.reduction_percent())
            / 10_000;
        usize::try_from(scaled).unwrap_or(usize::MAX)
    }
}

impl From<RawEffectConfig> for EffectConfig {
    fn from(raw: RawEffectConfig) -> Self {
        let effect_type = non_empty(raw.effect_type.as_deref())
            .map_or(Ok(EffectType::default()), str::parse)
            .unwrap_or_else(|err| {
                tracing::warn!("{}, falling back to none", err);
                EffectType::default()
            });
        let intensity = non_empty(raw.intensity.as_deref())
            .map_or(Ok(Intensity::default()), str::parse)
            .unwrap_or_else(|err| {
                tracing::warn!("{}, falling back to medium", err);
                Intensity::default()
            });

        Self::new(effect_type, intensity)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
