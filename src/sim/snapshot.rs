//! Read-only view of the match for the rendering layer

use serde::Serialize;

use super::difficulty::DifficultySettings;
use super::lifecycle::{ActiveEffect, Coin, PowerUp, Shield};
use super::skin_power::ActiveAbility;
use super::state::{Ball, GamePhase, GameState, Paddle, Score, Side};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub round: u32,
    pub score: Score,
    pub winner: Option<Side>,
    pub difficulty: DifficultySettings,
    /// `None` while the ball waits to respawn after a point
    pub ball: Option<Ball>,
    pub multiballs: Vec<Ball>,
    pub paddles: [Paddle; 2],
    pub power_ups: Vec<PowerUp>,
    pub coins: Vec<Coin>,
    pub effects: Vec<ActiveEffect>,
    pub shields: [Shield; 2],
    pub abilities: [Option<ActiveAbility>; 2],
    /// Foresight landing previews per side
    pub previews: [Option<f32>; 2],
    pub combo: u32,
    pub max_combo: u32,
    pub abilities_triggered: u32,
    pub screen_shake: f32,
    pub hit_flash: Option<Side>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            round: self.round,
            score: self.score,
            winner: self.winner,
            difficulty: self.difficulty,
            ball: (!self.point_resolved && self.phase != GamePhase::Menu).then_some(self.ball),
            multiballs: self.lifecycle.multiballs.clone(),
            paddles: self.paddles,
            power_ups: self.lifecycle.power_ups.clone(),
            coins: self.lifecycle.coins.clone(),
            effects: self.lifecycle.effects.clone(),
            shields: self.lifecycle.shields,
            abilities: self.skin_powers.active,
            previews: self.skin_powers.preview,
            combo: self.combo,
            max_combo: self.max_combo,
            abilities_triggered: self.skin_powers.triggered_total,
            screen_shake: self.screen_shake,
            hit_flash: self.hit_flash,
        }
    }
}
