//! Rally Pong - arcade Pong with escalating rounds and awakened paddle skins
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (ball physics, AI, power-ups, match flow)
//! - `settings`: Player-facing configuration and spawn tuning
//! - `error`: Configuration errors reported at the boundary
//!
//! Rendering, menus, input mapping and progression live outside this crate.
//! They feed intents in and read snapshots/events out.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{GameSpeed, Settings, SpawnTuning};

/// Game configuration constants
///
/// Play axis is `x`, lateral (court depth) axis is carried in `Vec2::y`.
pub mod consts {
    /// Court length along the play axis
    pub const COURT_WIDTH: f32 = 20.0;
    /// Court depth along the lateral axis
    pub const COURT_DEPTH: f32 = 14.0;
    pub const COURT_HALF_DEPTH: f32 = COURT_DEPTH / 2.0;
    /// Ball is scored once it passes this far past center
    pub const GOAL_LINE_X: f32 = COURT_WIDTH / 2.0 + 1.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 0.5;
    pub const PADDLE_DEPTH: f32 = 2.5;
    /// Gap kept between paddle end and side wall
    pub const PADDLE_MARGIN: f32 = 0.5;
    /// Paddle face offset from the end of the court
    pub const PADDLE_INSET: f32 = 1.0;
    pub const PLAYER_PADDLE_SPEED: f32 = 21.0;
    pub const PLAYER_SPEED_BOOST: f32 = 1.8;
    pub const AI_SPEED_BOOST: f32 = 1.5;
    pub const BIG_PADDLE_SCALE: f32 = 1.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.3;
    /// Lateral velocity added per unit of hit offset (scaled by angle multiplier)
    pub const HIT_SPIN: f32 = 3.0;
    /// Curve acceleration per unit of paddle lateral velocity
    pub const CURVE_TRANSFER: f32 = 1.8;
    /// Curve retained per 1/60 s
    pub const CURVE_DECAY: f32 = 0.98;
    /// Curve set by the swerve skin power (sign is random)
    pub const CURVE_INJECTION: f32 = 24.0;
    pub const SLOW_BALL_MULTIPLIER: f32 = 0.85;
    pub const PRIMARY_SUBSTEPS: u32 = 5;
    pub const MULTIBALL_SUBSTEPS: u32 = 3;

    /// Pickups
    pub const POWER_UP_RADIUS: f32 = 0.8;
    pub const COIN_RADIUS: f32 = 0.25;
    /// Half extents of the spawn region for pickups
    pub const SPAWN_HALF_X: f32 = 5.0;
    pub const SPAWN_HALF_Z: f32 = 4.5;

    /// Timing
    pub const MAX_FRAME_DT: f32 = 0.1;
    pub const RESPAWN_DELAY: f64 = 0.5;
    pub const SHAKE_DURATION: f64 = 0.3;
    pub const FLASH_DURATION: f64 = 0.15;

    /// Shake cue intensities
    pub const SHAKE_WALL: f32 = 0.05;
    pub const SHAKE_HIT: f32 = 0.15;
    pub const SHAKE_SHIELD: f32 = 0.3;
    pub const SHAKE_POINT: f32 = 0.5;

    /// AI paddle stops moving inside this distance of its target
    pub const AI_DEAD_ZONE: f32 = 0.1;

    pub const MULTIBALL_MIN_BATCH: usize = 2;
    pub const MULTIBALL_MAX_BATCH: usize = 3;
}

/// Fold an unbounded lateral coordinate back into `[-bound, bound]`,
/// mirroring it off the side walls the way a bouncing ball would travel.
#[inline]
pub fn fold_lateral(z: f32, bound: f32) -> f32 {
    if bound <= 0.0 {
        return 0.0;
    }
    let period = 4.0 * bound;
    let shifted = (z + bound).rem_euclid(period);
    if shifted <= 2.0 * bound {
        shifted - bound
    } else {
        3.0 * bound - shifted
    }
}

/// Move `current` toward `target` by at most `max_step`
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = target - current;
    current + diff.signum() * diff.abs().min(max_step)
}
