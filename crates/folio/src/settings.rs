//! # Site Settings
//!
//! One TOML document configures a page:
//!
//! ```toml
//! seed = 42
//! user_agent = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
//!
//! [effects]
//! effectType = "sakura"
//! intensity = "high"
//!
//! [scroll]
//! settle_delay_ms = 400.0
//! ```
//!
//! Every table and field is optional.

use std::path::{Path, PathBuf};

use folio_effects::{DeviceClass, EffectConfig};
use folio_scroll::SnapConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading site settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("cannot read settings {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The settings are not valid TOML or have the wrong shape.
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for settings loading.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Page configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// The ambient effect record.
    pub effects: EffectConfig,
    /// Section snapping.
    pub scroll: SnapConfig,
    /// Fixed RNG seed; the wall clock seeds the engine when absent.
    pub seed: Option<u64>,
    /// Visitor's user agent, used to thin out particles on handhelds.
    pub user_agent: Option<String>,
}

impl SiteSettings {
    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Toml`] if the document does not parse.
    pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read and
    /// [`SettingsError::Toml`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Device class derived from the user agent; desktop when unknown.
    #[must_use]
    pub fn device(&self) -> DeviceClass {
        self.user_agent
            .as_deref()
            .map(DeviceClass::from_user_agent)
            .unwrap_or_default()
    }
}
