//! Game settings and spawn tuning
//!
//! Loaded from JSON by the host and validated before a match starts.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{AiTier, SkinPowerSpec};

/// Global speed presets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum GameSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
    Superfast,
    /// Arbitrary multiplier supplied by the host
    Custom(f32),
}

impl GameSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameSpeed::Slow => "Slow",
            GameSpeed::Medium => "Medium",
            GameSpeed::Fast => "Fast",
            GameSpeed::Superfast => "Superfast",
            GameSpeed::Custom(_) => "Custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(GameSpeed::Slow),
            "medium" | "med" | "normal" => Some(GameSpeed::Medium),
            "fast" => Some(GameSpeed::Fast),
            "superfast" => Some(GameSpeed::Superfast),
            _ => None,
        }
    }

    /// Scale applied to ball and paddle motion
    pub fn multiplier(&self) -> f32 {
        match self {
            GameSpeed::Slow => 0.7,
            GameSpeed::Medium => 1.0,
            GameSpeed::Fast => 1.3,
            GameSpeed::Superfast => 1.6,
            GameSpeed::Custom(m) => *m,
        }
    }
}

/// Pickup spawn rates and caps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Chance per paddle hit once the rally gap is met
    pub power_up_chance: f32,
    /// Hits required since the last power-up spawn
    pub power_up_min_rally_gap: u32,
    pub max_power_ups: u32,
    /// Chance per paddle hit
    pub coin_chance: f32,
    pub max_coins: u32,
    /// Most secondary balls alive at once
    pub max_multiballs: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            power_up_chance: 0.4,
            power_up_min_rally_gap: 3,
            max_power_ups: 2,
            coin_chance: 0.15,
            max_coins: 3,
            max_multiballs: 4,
        }
    }
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game_speed: GameSpeed,
    pub ai_tier: AiTier,
    /// Points needed to win a round
    pub winning_score: u8,

    // === Cosmetics ===
    /// Awakened power equipped on the player's paddle
    pub player_skin_power: Option<SkinPowerSpec>,
    pub ai_skin_power: Option<SkinPowerSpec>,
    /// Opaque map id, only echoed back in round results
    pub map_theme: Option<String>,

    // === Visual cues ===
    pub screen_shake: bool,
    /// Reduced motion (suppresses shake)
    pub reduced_motion: bool,

    pub tuning: SpawnTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_speed: GameSpeed::Medium,
            ai_tier: AiTier::Normal,
            winning_score: 5,

            player_skin_power: None,
            ai_skin_power: None,
            map_theme: None,

            screen_shake: true,
            reduced_motion: false,

            tuning: SpawnTuning::default(),
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tuning that would break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.winning_score == 0 {
            return Err(ConfigError::WinningScore);
        }

        let speed = self.game_speed.multiplier();
        if !(speed > 0.0 && speed.is_finite()) {
            return Err(ConfigError::SpeedMultiplier(speed));
        }

        for spec in [self.player_skin_power, self.ai_skin_power].into_iter().flatten() {
            if spec.hits_required == 0 {
                return Err(ConfigError::HitsRequired { kind: spec.kind });
            }
        }

        let tuning = &self.tuning;
        for (name, value) in [
            ("power_up_chance", tuning.power_up_chance),
            ("coin_chance", tuning.coin_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        for (name, cap) in [
            ("max_power_ups", tuning.max_power_ups),
            ("max_coins", tuning.max_coins),
            ("max_multiballs", tuning.max_multiballs),
        ] {
            if cap == 0 {
                return Err(ConfigError::ZeroCap { name });
            }
        }

        Ok(())
    }
}
