//! Game state and core simulation types
//!
//! `GameState` is the simulation context for one match. The host owns it and
//! passes it to `tick`; nothing in the core reaches for global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::AiController;
use super::difficulty::DifficultySettings;
use super::events::GameEvent;
use super::lifecycle::Lifecycle;
use super::skin_power::SkinPowerTracker;
use crate::consts::*;
use crate::settings::Settings;

/// Which end of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled paddle at negative x
    Player,
    /// AI-controlled paddle at positive x
    Ai,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Ai];

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Ai => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Direction a ball leaves this side's paddle (+1 toward the AI)
    pub fn outward(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Ai => -1.0,
        }
    }

    /// Play-axis position of this side's paddle center
    pub fn paddle_x(self) -> f32 {
        -self.outward() * (COURT_WIDTH / 2.0 - PADDLE_INSET)
    }

    /// Play-axis position past which this side concedes
    pub fn goal_x(self) -> f32 {
        -self.outward() * GOAL_LINE_X
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// A ball. `pos.y`/`vel.y` are the lateral axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Lateral acceleration that decays every sub-step
    pub curve: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            curve: 0.0,
            radius: BALL_RADIUS,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Side the ball is travelling toward, if it is moving along the play axis
    pub fn heading(&self) -> Option<Side> {
        if self.vel.x > 0.0 {
            Some(Side::Ai)
        } else if self.vel.x < 0.0 {
            Some(Side::Player)
        } else {
            None
        }
    }
}

/// A paddle, living for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Lateral position
    pub z: f32,
    /// Lateral velocity over the last frame (units/s), feeds ball curve
    pub lateral_vel: f32,
    /// 1.0 normally, `BIG_PADDLE_SCALE` while big paddle is active
    pub scale: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            z: 0.0,
            lateral_vel: 0.0,
            scale: 1.0,
        }
    }

    pub fn x(&self) -> f32 {
        self.side.paddle_x()
    }

    pub fn depth(&self) -> f32 {
        PADDLE_DEPTH * self.scale
    }

    /// Largest |z| the paddle center may reach at its current scale
    pub fn max_z(&self) -> f32 {
        Self::max_z_for_scale(self.scale)
    }

    pub fn max_z_for_scale(scale: f32) -> f32 {
        (COURT_HALF_DEPTH - PADDLE_DEPTH * scale / 2.0 - PADDLE_MARGIN).max(0.0)
    }

    /// Move to `z` (clamped) and record the frame's lateral velocity
    pub fn move_to(&mut self, z: f32, dt: f32) {
        let prev = self.z;
        let max_z = self.max_z();
        self.z = z.clamp(-max_z, max_z);
        self.lateral_vel = if dt > 0.0 { (self.z - prev) / dt } else { 0.0 };
    }

    /// Apply a new scale and re-clamp so a shrinking paddle stays in bounds
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        let max_z = self.max_z();
        self.z = self.z.clamp(-max_z, max_z);
    }
}

/// Per-round score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u8,
    pub ai: u8,
}

impl Score {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player = self.player.saturating_add(1),
            Side::Ai => self.ai = self.ai.saturating_add(1),
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.player >= win_score {
            Some(Side::Player)
        } else if self.ai >= win_score {
            Some(Side::Ai)
        } else {
            None
        }
    }
}

/// Deferred mutations, fired on a later tick once the clock passes `at`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledAction {
    /// Put the primary ball back in play
    RespawnBall,
    ClearShake,
    ClearFlash,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduled {
    pub at: f64,
    /// Round generation the action was scheduled in; stale ones are dropped
    pub generation: u32,
    pub action: ScheduledAction,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub phase: GamePhase,
    pub score: Score,
    pub round: u32,
    pub winner: Option<Side>,
    pub difficulty: DifficultySettings,
    /// Simulation clock in seconds; only advances while playing
    pub now: f64,

    pub ball: Ball,
    /// Set the instant the primary ball crosses a goal line, cleared on respawn
    pub point_resolved: bool,
    /// Side that last returned the primary ball this rally
    pub last_hitter: Option<Side>,
    pub paddles: [Paddle; 2],
    pub ai: AiController,

    /// Rally length in paddle hits
    pub combo: u32,
    /// High-water mark of `combo` this round
    pub max_combo: u32,

    pub lifecycle: Lifecycle,
    pub skin_powers: SkinPowerTracker,
    /// Shield saves this round
    pub shields_blocked: u32,

    /// Visual cues, cleared by scheduled actions
    pub screen_shake: f32,
    pub hit_flash: Option<Side>,

    pub scheduled: Vec<Scheduled>,
    /// Bumped on every round reset so pending timers from old rounds go stale
    pub generation: u32,

    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a match sitting in the menu
    pub fn new(settings: Settings, seed: u64) -> Self {
        let difficulty = DifficultySettings::for_round(1, settings.ai_tier);
        let skin_powers = SkinPowerTracker::new(settings.player_skin_power, settings.ai_skin_power);
        Self {
            settings,
            phase: GamePhase::Menu,
            score: Score::default(),
            round: 1,
            winner: None,
            difficulty,
            now: 0.0,
            ball: Ball::new(Vec2::ZERO, Vec2::ZERO),
            point_resolved: false,
            last_hitter: None,
            paddles: [Paddle::new(Side::Player), Paddle::new(Side::Ai)],
            ai: AiController::new(),
            combo: 0,
            max_combo: 0,
            lifecycle: Lifecycle::new(),
            skin_powers,
            shields_blocked: 0,
            screen_shake: 0.0,
            hit_flash: None,
            scheduled: Vec::new(),
            generation: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    /// Hand all events produced since the last call to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn schedule(&mut self, delay: f64, action: ScheduledAction) {
        // Only one pending action of each kind; a newer one replaces it
        self.scheduled.retain(|s| s.action != action);
        self.scheduled.push(Scheduled {
            at: self.now + delay,
            generation: self.generation,
            action,
        });
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
