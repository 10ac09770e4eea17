//! Configuration errors
//!
//! The simulation never fails at runtime. Bad tuning or catalog data is a
//! configuration bug and gets rejected here, before a match starts.

use thiserror::Error;

use crate::sim::SkinPowerKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("winning score must be at least 1")]
    WinningScore,

    #[error("skin power {kind:?} needs at least one hit to trigger")]
    HitsRequired { kind: SkinPowerKind },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f32 },

    #[error("{name} cap must be non-zero")]
    ZeroCap { name: &'static str },

    #[error("game speed multiplier must be positive, got {0}")]
    SpeedMultiplier(f32),
}
