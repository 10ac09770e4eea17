//! Match/round state machine
//!
//! Phase transitions, scoring and the deferred actions that go with them.
//! Invalid transitions are ignored, never errors.

use glam::Vec2;

use super::ball::{serve, shield_bounce};
use super::difficulty::DifficultySettings;
use super::events::{GameEvent, RoundResult};
use super::state::{GamePhase, GameState, Paddle, ScheduledAction, Score, Side};
use crate::consts::*;

impl GameState {
    // === Transitions ===

    /// Menu/GameOver -> Playing at round 1
    pub fn start_game(&mut self) {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
            log::debug!("start_game ignored in {:?}", self.phase);
            return;
        }
        self.round = 1;
        self.skin_powers.triggered_total = 0;
        self.reset_round();
        self.set_phase(GamePhase::Playing);
    }

    /// GameOver -> Playing at the next round, only after a player win
    pub fn next_round(&mut self) {
        if self.phase != GamePhase::GameOver || self.winner != Some(Side::Player) {
            log::debug!(
                "next_round ignored in {:?} (winner {:?})",
                self.phase,
                self.winner
            );
            return;
        }
        self.round += 1;
        self.reset_round();
        self.set_phase(GamePhase::Playing);
    }

    pub fn pause(&mut self) {
        if self.phase != GamePhase::Playing {
            log::debug!("pause ignored in {:?}", self.phase);
            return;
        }
        self.set_phase(GamePhase::Paused);
    }

    pub fn resume(&mut self) {
        if self.phase != GamePhase::Paused {
            log::debug!("resume ignored in {:?}", self.phase);
            return;
        }
        self.set_phase(GamePhase::Playing);
    }

    /// Abandon the match. Valid from any phase.
    pub fn return_to_menu(&mut self) {
        self.round = 1;
        self.skin_powers.triggered_total = 0;
        self.reset_round();
        self.ball.vel = Vec2::ZERO;
        if self.phase != GamePhase::Menu {
            self.set_phase(GamePhase::Menu);
        }
    }

    fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        self.phase = to;
        log::info!("Phase {:?} -> {:?} (round {})", from, to, self.round);
        self.emit(GameEvent::PhaseChanged { from, to });
    }

    /// Fresh round at `self.round`: new difficulty, empty court, new serve
    fn reset_round(&mut self) {
        self.score = Score::default();
        self.winner = None;
        self.difficulty = DifficultySettings::for_round(self.round, self.settings.ai_tier);

        self.lifecycle.clear();
        self.skin_powers.specs = [self.settings.player_skin_power, self.settings.ai_skin_power];
        self.skin_powers.reset_round();
        self.combo = 0;
        self.max_combo = 0;
        self.shields_blocked = 0;
        self.last_hitter = None;

        self.paddles = [Paddle::new(Side::Player), Paddle::new(Side::Ai)];
        self.ai.reset();
        self.screen_shake = 0.0;
        self.hit_flash = None;

        // Anything still pending belongs to the old round
        self.generation = self.generation.wrapping_add(1);
        self.scheduled.clear();

        self.respawn_ball();
        log::info!(
            "Round {} ({}) difficulty: {:?}",
            self.round,
            self.settings.ai_tier.as_str(),
            self.difficulty
        );
    }

    /// Put the primary ball back at center with a fresh serve
    pub(crate) fn respawn_ball(&mut self) {
        serve(&mut self.ball, &mut self.rng, &self.difficulty);
        self.point_resolved = false;
        self.last_hitter = None;
    }

    // === Scoring ===

    /// Primary ball crossed `defender`'s goal line
    pub(crate) fn resolve_primary_goal(&mut self, defender: Side) {
        if self.point_resolved {
            return;
        }
        if self.try_shield_save(defender) {
            shield_bounce(&mut self.ball, defender);
            return;
        }

        self.point_resolved = true;
        self.lifecycle.multiballs.clear();
        self.award_point(defender.opponent());
        if self.phase == GamePhase::Playing {
            self.schedule(RESPAWN_DELAY, ScheduledAction::RespawnBall);
        }
    }

    /// Consume `defender`'s shield if it has one
    pub(crate) fn try_shield_save(&mut self, defender: Side) -> bool {
        if !self.lifecycle.take_shield(defender) {
            return false;
        }
        self.shields_blocked += 1;
        log::debug!("{:?} shield saved a goal", defender);
        self.emit(GameEvent::ShieldBlocked { side: defender });
        self.shake(SHAKE_SHIELD);
        true
    }

    /// Credit one point to `scorer`, ending the round on the winning score
    pub(crate) fn award_point(&mut self, scorer: Side) {
        self.score.increment(scorer);
        self.combo = 0;
        self.lifecycle.last_spawn_rally = 0;

        self.emit(GameEvent::PointScored {
            side: scorer,
            player: self.score.player,
            ai: self.score.ai,
        });
        self.shake(SHAKE_POINT);

        if let Some(winner) = self.score.has_winner(self.settings.winning_score) {
            self.end_round(winner);
        }
    }

    fn end_round(&mut self, winner: Side) {
        self.winner = Some(winner);
        self.lifecycle.multiballs.clear();
        // Pending respawns and cue clears must not touch the finished round
        self.generation = self.generation.wrapping_add(1);
        self.scheduled.clear();
        self.screen_shake = 0.0;
        self.hit_flash = None;
        self.set_phase(GamePhase::GameOver);

        let result = RoundResult {
            won: winner == Side::Player,
            round: self.round,
            max_combo: self.max_combo,
            points_scored: self.score.player,
            abilities_triggered: self.skin_powers.triggered_total,
            shields_blocked: self.shields_blocked,
            map_theme: self.settings.map_theme.clone(),
        };
        log::info!(
            "Round {} over: {} ({}-{}), max combo {}",
            result.round,
            if result.won { "won" } else { "lost" },
            self.score.player,
            self.score.ai,
            result.max_combo
        );
        self.emit(GameEvent::RoundEnded(result));
    }

    // === Visual cues ===

    pub(crate) fn shake(&mut self, intensity: f32) {
        if !self.settings.effective_screen_shake() {
            return;
        }
        self.screen_shake = self.screen_shake.max(intensity);
        self.schedule(SHAKE_DURATION, ScheduledAction::ClearShake);
        self.emit(GameEvent::Shake { intensity });
    }

    pub(crate) fn flash(&mut self, side: Side) {
        self.hit_flash = Some(side);
        self.schedule(FLASH_DURATION, ScheduledAction::ClearFlash);
        self.emit(GameEvent::Flash { side });
    }

    /// Fire every due action from the current generation, drop stale ones
    pub(crate) fn run_scheduled(&mut self) {
        let now = self.now;
        let generation = self.generation;
        let mut due = Vec::new();
        self.scheduled.retain(|s| {
            if s.generation != generation {
                return false;
            }
            if s.at <= now {
                due.push(s.action);
                return false;
            }
            true
        });

        for action in due {
            match action {
                ScheduledAction::RespawnBall => self.respawn_ball(),
                ScheduledAction::ClearShake => self.screen_shake = 0.0,
                ScheduledAction::ClearFlash => self.hit_flash = None,
            }
        }
    }
}
