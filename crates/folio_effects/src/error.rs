//! # Effects Error Types
//!
//! Only strict configuration parsing can fail. The engine itself never
//! returns errors: a missing surface or a disabled effect is an outcome,
//! not a failure.

use thiserror::Error;

/// Errors from parsing an effect configuration strictly.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The record is not valid JSON or has the wrong shape.
    #[error("malformed effect record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `effectType` names an effect this engine does not have.
    #[error("unknown effect type: {0:?}")]
    UnknownEffect(String),

    /// `intensity` is not one of low, medium or high.
    #[error("unknown intensity: {0:?}")]
    UnknownIntensity(String),
}

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;
