//! Events handed to the rendering and progression layers

use serde::{Deserialize, Serialize};

use super::registry::{PowerUpKind, SkinPowerKind};
use super::state::{GamePhase, Side};

/// Summary of a finished round, consumed by progression/achievement bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Player won the round
    pub won: bool,
    pub round: u32,
    pub max_combo: u32,
    /// Points the player scored this round
    pub points_scored: u8,
    /// Skin powers fired by either side this game
    pub abilities_triggered: u32,
    /// Goals saved by shields this round
    pub shields_blocked: u32,
    /// Opaque map id passed through from settings
    pub map_theme: Option<String>,
}

/// Everything that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    /// `primary` is false for multiball returns
    PaddleHit { side: Side, combo: u32, primary: bool },
    PowerUpCollected { side: Side, kind: PowerUpKind },
    CoinCollected { side: Side },
    /// A shield ate a goal for `side`
    ShieldBlocked { side: Side },
    PointScored { side: Side, player: u8, ai: u8 },
    MultiballSpawned { count: usize },
    SkinPowerTriggered { side: Side, kind: SkinPowerKind },
    PhaseChanged { from: GamePhase, to: GamePhase },
    RoundEnded(RoundResult),
    /// Camera shake cue
    Shake { intensity: f32 },
    /// Paddle flash cue
    Flash { side: Side },
}
