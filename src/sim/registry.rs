//! Static catalog of power-ups, timed effects and awakened skin powers

use serde::{Deserialize, Serialize};

/// Pickups that spawn on the court during a rally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    BigPaddle,
    SlowBall,
    SpeedBoost,
    MultiBall,
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::BigPaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::SpeedBoost,
        PowerUpKind::MultiBall,
        PowerUpKind::Shield,
    ];

    /// Timed buff granted on pickup, if this kind is a timed buff
    pub fn effect(self) -> Option<EffectKind> {
        match self {
            PowerUpKind::BigPaddle => Some(EffectKind::BigPaddle),
            PowerUpKind::SlowBall => Some(EffectKind::SlowBall),
            PowerUpKind::SpeedBoost => Some(EffectKind::SpeedBoost),
            PowerUpKind::MultiBall | PowerUpKind::Shield => None,
        }
    }
}

/// Timed buffs attached to one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Paddle depth x1.5
    BigPaddle,
    /// Ball travels slower while heading toward the owner
    SlowBall,
    /// Paddle moves faster
    SpeedBoost,
}

impl EffectKind {
    /// Duration in seconds. Speed boost is the shortest.
    pub fn duration(self) -> f64 {
        match self {
            EffectKind::BigPaddle => 8.0,
            EffectKind::SlowBall => 6.0,
            EffectKind::SpeedBoost => 5.0,
        }
    }
}

/// Abilities unlocked by awakened paddle skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinPowerKind {
    /// Timed shield for the owner
    SecondChance,
    /// Doubles the ball's velocity (still capped by max speed)
    PowerSurge,
    /// Large random-signed curve on the ball
    Swerve,
    /// Predicted landing point on the opponent's goal line
    Foresight,
    /// Big paddle buff
    Titan,
    /// Speed boost buff
    Overdrive,
}

impl SkinPowerKind {
    /// Default tuning used by the built-in skin catalog
    pub fn default_spec(self) -> SkinPowerSpec {
        let (hits_required, duration_ms) = match self {
            SkinPowerKind::SecondChance => (6, 5000),
            SkinPowerKind::PowerSurge => (5, 0),
            SkinPowerKind::Swerve => (4, 0),
            SkinPowerKind::Foresight => (5, 4000),
            SkinPowerKind::Titan => (6, 6000),
            SkinPowerKind::Overdrive => (5, 5000),
        };
        SkinPowerSpec {
            kind: self,
            hits_required,
            duration_ms,
        }
    }
}

/// Equipped skin power for one side, as handed over by the cosmetics layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinPowerSpec {
    pub kind: SkinPowerKind,
    pub hits_required: u32,
    pub duration_ms: u32,
}

impl SkinPowerSpec {
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

/// Paddle cosmetics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaddleSkin {
    #[default]
    Default,
    Neon,
    Chrome,
    Fire,
    Ice,
}

impl PaddleSkin {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleSkin::Default => "Default",
            PaddleSkin::Neon => "Neon",
            PaddleSkin::Chrome => "Chrome",
            PaddleSkin::Fire => "Fire",
            PaddleSkin::Ice => "Ice",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(PaddleSkin::Default),
            "neon" => Some(PaddleSkin::Neon),
            "chrome" => Some(PaddleSkin::Chrome),
            "fire" => Some(PaddleSkin::Fire),
            "ice" => Some(PaddleSkin::Ice),
            _ => None,
        }
    }

    /// Power carried by the awakened version of this skin
    pub fn awakened_power(&self) -> Option<SkinPowerSpec> {
        let kind = match self {
            PaddleSkin::Default => return None,
            PaddleSkin::Neon => SkinPowerKind::Swerve,
            PaddleSkin::Chrome => SkinPowerKind::Foresight,
            PaddleSkin::Fire => SkinPowerKind::PowerSurge,
            PaddleSkin::Ice => SkinPowerKind::SecondChance,
        };
        Some(kind.default_spec())
    }
}
