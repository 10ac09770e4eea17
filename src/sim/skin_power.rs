//! Awakened skin powers
//!
//! Each side counts its primary-ball returns. Reaching the equipped power's
//! threshold fires it and drops the count back to zero.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::predict_landing;
use super::events::GameEvent;
use super::registry::{EffectKind, SkinPowerKind, SkinPowerSpec};
use super::state::{Ball, GameState, Side};
use crate::consts::CURVE_INJECTION;

/// Ability currently running for one side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbility {
    pub kind: SkinPowerKind,
    pub expires_at: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinPowerTracker {
    /// Equipped power per side, indexed by `Side::index`
    pub specs: [Option<SkinPowerSpec>; 2],
    pub hits: [u32; 2],
    pub active: [Option<ActiveAbility>; 2],
    /// Predicted landing z on the opponent's goal line while foresight runs
    pub preview: [Option<f32>; 2],
    /// Abilities fired this game by either side
    pub triggered_total: u32,
}

impl SkinPowerTracker {
    pub fn new(player: Option<SkinPowerSpec>, ai: Option<SkinPowerSpec>) -> Self {
        Self {
            specs: [player, ai],
            ..Self::default()
        }
    }

    /// Count a hit. Returns the spec to fire once the threshold is reached.
    pub fn register_hit(&mut self, side: Side) -> Option<SkinPowerSpec> {
        let spec = self.specs[side.index()]?;
        let hits = &mut self.hits[side.index()];
        *hits += 1;
        if *hits >= spec.hits_required {
            *hits = 0;
            Some(spec)
        } else {
            None
        }
    }

    /// Record a fired ability, replacing whatever the side had running
    pub fn activate(&mut self, side: Side, spec: SkinPowerSpec, now: f64) {
        self.active[side.index()] = Some(ActiveAbility {
            kind: spec.kind,
            expires_at: now + spec.duration_secs(),
        });
        if spec.kind != SkinPowerKind::Foresight {
            self.preview[side.index()] = None;
        }
        self.triggered_total += 1;
    }

    pub fn is_active(&self, side: Side, kind: SkinPowerKind) -> bool {
        self.active[side.index()].is_some_and(|a| a.kind == kind)
    }

    /// Drop expired abilities and their previews
    pub fn sweep(&mut self, now: f64) {
        for side in Side::BOTH {
            let i = side.index();
            if self.active[i].is_some_and(|a| a.expires_at <= now) {
                self.active[i] = None;
                self.preview[i] = None;
            }
        }
    }

    /// Recompute foresight previews from the primary ball
    pub fn update_previews(&mut self, ball: Option<&Ball>) {
        for side in Side::BOTH {
            if self.is_active(side, SkinPowerKind::Foresight) {
                self.preview[side.index()] =
                    ball.and_then(|b| predict_landing(b, side.opponent()));
            }
        }
    }

    /// Round reset: progress and running abilities go, the game total stays
    pub fn reset_round(&mut self) {
        self.hits = [0; 2];
        self.active = [None; 2];
        self.preview = [None; 2];
    }
}

impl GameState {
    /// Count a primary-ball return for `side` and fire its power on threshold
    pub(crate) fn register_skin_hit(&mut self, side: Side) {
        let Some(spec) = self.skin_powers.register_hit(side) else {
            return;
        };
        let now = self.now;
        self.skin_powers.activate(side, spec, now);

        // Buff powers with no configured duration fall back to the buff's own
        let until = |effect: EffectKind| {
            if spec.duration_ms > 0 {
                now + spec.duration_secs()
            } else {
                now + effect.duration()
            }
        };

        match spec.kind {
            SkinPowerKind::SecondChance => {
                let expiry = (spec.duration_ms > 0).then(|| now + spec.duration_secs());
                self.lifecycle.grant_shield(side, expiry);
            }
            SkinPowerKind::PowerSurge => {
                self.ball.vel =
                    (self.ball.vel * 2.0).clamp_length_max(self.difficulty.ball_max_speed);
            }
            SkinPowerKind::Swerve => {
                let sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
                self.ball.curve = sign * CURVE_INJECTION;
            }
            SkinPowerKind::Foresight => {
                self.skin_powers.update_previews(Some(&self.ball));
            }
            SkinPowerKind::Titan => {
                self.lifecycle
                    .add_effect_until(EffectKind::BigPaddle, side, until(EffectKind::BigPaddle));
            }
            SkinPowerKind::Overdrive => {
                self.lifecycle
                    .add_effect_until(EffectKind::SpeedBoost, side, until(EffectKind::SpeedBoost));
            }
        }

        log::debug!("{:?} skin power fired: {:?}", side, spec.kind);
        self.emit(GameEvent::SkinPowerTriggered {
            side,
            kind: spec.kind,
        });
    }
}
