//! Power-up, coin, buff, shield and multiball bookkeeping
//!
//! Everything timed is stamped with an expiry on the simulation clock and
//! removed by `sweep`, which is safe to run every frame.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultySettings;
use super::registry::{EffectKind, PowerUpKind};
use super::state::{Ball, Side};
use crate::consts::*;
use crate::settings::SpawnTuning;

/// Uncollected power-up on the court
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// Uncollected coin on the court
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
}

/// Timed buff owned by one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub side: Side,
    pub expires_at: f64,
}

/// One-shot goal-line save
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub active: bool,
    /// `None` lasts until consumed or the round ends
    pub expires_at: Option<f64>,
}

/// What collecting a power-up did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupOutcome {
    Effect(EffectKind),
    Shield,
    Multiball,
}

#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    pub power_ups: Vec<PowerUp>,
    pub coins: Vec<Coin>,
    pub effects: Vec<ActiveEffect>,
    /// Indexed by `Side::index`
    pub shields: [Shield; 2],
    pub multiballs: Vec<Ball>,
    /// Combo value at the last power-up spawn
    pub last_spawn_rally: u32,
    next_id: u32,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything; used on round start and return to menu
    pub fn clear(&mut self) {
        self.power_ups.clear();
        self.coins.clear();
        self.effects.clear();
        self.shields = [Shield::default(); 2];
        self.multiballs.clear();
        self.last_spawn_rally = 0;
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    // === Timed effects ===

    pub fn has_effect(&self, kind: EffectKind, side: Side) -> bool {
        self.effects.iter().any(|e| e.kind == kind && e.side == side)
    }

    /// Grant a buff for its standard duration
    pub fn add_effect(&mut self, kind: EffectKind, side: Side, now: f64) {
        self.add_effect_until(kind, side, now + kind.duration());
    }

    /// Grant a buff until `expires_at`. Re-granting an active one extends it.
    pub fn add_effect_until(&mut self, kind: EffectKind, side: Side, expires_at: f64) {
        if let Some(existing) = self
            .effects
            .iter_mut()
            .find(|e| e.kind == kind && e.side == side)
        {
            existing.expires_at = existing.expires_at.max(expires_at);
        } else {
            self.effects.push(ActiveEffect {
                kind,
                side,
                expires_at,
            });
        }
    }

    // === Shields ===

    pub fn has_shield(&self, side: Side) -> bool {
        self.shields[side.index()].active
    }

    /// Raise a shield. An untimed shield is never downgraded to a timed one.
    pub fn grant_shield(&mut self, side: Side, expires_at: Option<f64>) {
        let shield = &mut self.shields[side.index()];
        shield.expires_at = match (shield.active, shield.expires_at, expires_at) {
            (true, None, _) => None,
            (true, Some(current), Some(new)) => Some(current.max(new)),
            (_, _, new) => new,
        };
        shield.active = true;
    }

    /// Consume the side's shield. Returns true if there was one.
    pub fn take_shield(&mut self, side: Side) -> bool {
        let shield = &mut self.shields[side.index()];
        let had = shield.active;
        *shield = Shield::default();
        had
    }

    /// Clear every effect and shield whose expiry has passed
    pub fn sweep(&mut self, now: f64) {
        self.effects.retain(|e| e.expires_at > now);
        for shield in &mut self.shields {
            if shield.active && shield.expires_at.is_some_and(|t| t <= now) {
                *shield = Shield::default();
            }
        }
    }

    // === Spawning ===

    /// Roll for a power-up after a paddle hit at rally length `combo`
    pub fn maybe_spawn_power_up<R: Rng>(
        &mut self,
        rng: &mut R,
        combo: u32,
        tuning: &SpawnTuning,
    ) -> Option<PowerUpKind> {
        if self.power_ups.len() >= tuning.max_power_ups as usize
            || combo.saturating_sub(self.last_spawn_rally) < tuning.power_up_min_rally_gap
            || !rng.random_bool(tuning.power_up_chance as f64)
        {
            return None;
        }
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let pos = random_spawn_pos(rng);
        let id = self.alloc_id();
        self.power_ups.push(PowerUp { id, kind, pos });
        self.last_spawn_rally = combo;
        log::debug!("Spawned {:?} power-up #{} at {:?}", kind, id, pos);
        Some(kind)
    }

    /// Roll for a coin after a paddle hit
    pub fn maybe_spawn_coin<R: Rng>(&mut self, rng: &mut R, tuning: &SpawnTuning) -> bool {
        if self.coins.len() >= tuning.max_coins as usize
            || !rng.random_bool(tuning.coin_chance as f64)
        {
            return false;
        }
        let pos = random_spawn_pos(rng);
        let id = self.alloc_id();
        self.coins.push(Coin { id, pos });
        true
    }

    pub fn take_power_up(&mut self, id: u32) -> Option<PowerUp> {
        let index = self.power_ups.iter().position(|p| p.id == id)?;
        Some(self.power_ups.remove(index))
    }

    pub fn take_coin(&mut self, id: u32) -> Option<Coin> {
        let index = self.coins.iter().position(|c| c.id == id)?;
        Some(self.coins.remove(index))
    }

    /// Apply a collected power-up for `side`
    ///
    /// Multiball is only reported; the caller spawns the batch at the
    /// collecting ball's position.
    pub fn apply_power_up(&mut self, kind: PowerUpKind, side: Side, now: f64) -> PickupOutcome {
        match (kind, kind.effect()) {
            (_, Some(effect)) => {
                self.add_effect(effect, side, now);
                PickupOutcome::Effect(effect)
            }
            (PowerUpKind::Shield, None) => {
                self.grant_shield(side, None);
                PickupOutcome::Shield
            }
            (_, None) => PickupOutcome::Multiball,
        }
    }

    /// Spawn a batch of 2-3 secondary balls, never exceeding `cap` in total
    pub fn spawn_multiballs<R: Rng>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        difficulty: &DifficultySettings,
        cap: u32,
    ) -> usize {
        let room = (cap as usize).saturating_sub(self.multiballs.len());
        let batch = rng
            .random_range(MULTIBALL_MIN_BATCH..=MULTIBALL_MAX_BATCH)
            .min(room);

        for _ in 0..batch {
            let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let angle = rng.random_range(-std::f32::consts::FRAC_PI_4..std::f32::consts::FRAC_PI_4);
            let vel = Vec2::new(direction * angle.cos(), angle.sin()) * difficulty.ball_initial_speed;
            self.multiballs.push(Ball::new(origin, vel));
        }
        batch
    }
}

fn random_spawn_pos<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(-SPAWN_HALF_X..SPAWN_HALF_X),
        rng.random_range(-SPAWN_HALF_Z..SPAWN_HALF_Z),
    )
}
