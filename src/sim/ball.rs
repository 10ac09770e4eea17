//! Ball simulator
//!
//! Sub-stepped motion with curve, wall/paddle response and goal detection.
//! The functions here only touch the ball; the tick applies the side effects
//! (combo, pickups, scoring) based on what a sub-step reports.

use glam::Vec2;
use rand::Rng;

use super::collision::{ball_paddle_collision, ball_wall_collision, wall_bound, within_reach};
use super::difficulty::DifficultySettings;
use super::lifecycle::{Coin, PowerUp};
use super::state::{Ball, Paddle, Side};
use crate::consts::*;
use crate::fold_lateral;

/// What the ball sees during one sub-step
#[derive(Debug, Clone, Copy)]
pub struct BallEnv<'a> {
    pub paddles: &'a [Paddle; 2],
    pub difficulty: &'a DifficultySettings,
    /// Displacement multiplier: slow-ball effect times global game speed
    pub motion_scale: f32,
}

/// What happened during one sub-step, in resolution order
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SubstepOutcome {
    pub wall_bounce: bool,
    pub power_up: Option<u32>,
    pub coin: Option<u32>,
    pub paddle_hit: Option<Side>,
}

/// Advance a ball by one sub-step
///
/// Order is fixed: curve, translate, wall, power-up, coin, player paddle,
/// AI paddle. At most one paddle hit is reported.
pub fn substep(
    ball: &mut Ball,
    env: &BallEnv,
    power_ups: &[PowerUp],
    coins: &[Coin],
    dt: f32,
) -> SubstepOutcome {
    let mut outcome = SubstepOutcome::default();

    integrate(ball, dt, env.motion_scale);
    // Curve feeds or drains lateral speed; keep the ball inside the round's speed band
    clamp_speed(ball, env.difficulty);
    outcome.wall_bounce = resolve_walls(ball);

    outcome.power_up = power_ups
        .iter()
        .find(|p| within_reach(ball.pos, p.pos, POWER_UP_RADIUS))
        .map(|p| p.id);
    outcome.coin = coins
        .iter()
        .find(|c| within_reach(ball.pos, c.pos, ball.radius + COIN_RADIUS))
        .map(|c| c.id);

    outcome.paddle_hit = resolve_paddles(ball, env.paddles, env.difficulty);
    outcome
}

/// Apply decaying curve to lateral velocity, then move
///
/// `motion_scale` scales the curve push as well as the displacement.
pub fn integrate(ball: &mut Ball, dt: f32, motion_scale: f32) {
    ball.vel.y += ball.curve * motion_scale * dt;
    ball.curve *= CURVE_DECAY.powf(60.0 * dt);
    ball.pos += ball.vel * motion_scale * dt;
}

/// Reflect off a side wall. Returns true on a bounce.
pub fn resolve_walls(ball: &mut Ball) -> bool {
    let Some(contact) = ball_wall_collision(ball) else {
        return false;
    };
    // Always send the ball back toward the middle
    ball.vel.y = -ball.pos.y.signum() * ball.vel.y.abs();
    ball.curve = -ball.curve;
    ball.pos.y = contact.clamped_z;
    true
}

/// Test player paddle, then AI paddle; stop at the first hit
pub fn resolve_paddles(
    ball: &mut Ball,
    paddles: &[Paddle; 2],
    difficulty: &DifficultySettings,
) -> Option<Side> {
    for paddle in paddles {
        if let Some(contact) = ball_paddle_collision(ball, paddle) {
            apply_paddle_hit(ball, paddle, contact.offset, contact.face_x, difficulty);
            return Some(paddle.side);
        }
    }
    None
}

/// Paddle response: send the ball away, add spin and curve, speed it up
pub fn apply_paddle_hit(
    ball: &mut Ball,
    paddle: &Paddle,
    offset: f32,
    face_x: f32,
    difficulty: &DifficultySettings,
) {
    let outward = paddle.side.outward();
    ball.vel.x = outward * ball.vel.x.abs();
    ball.vel.y += offset * HIT_SPIN * difficulty.angle_multiplier;
    ball.curve = paddle.lateral_vel * CURVE_TRANSFER;

    let new_speed = (ball.speed() + difficulty.ball_speed_increment)
        .clamp(difficulty.ball_initial_speed, difficulty.ball_max_speed);
    let dir = ball.vel.try_normalize().unwrap_or(Vec2::new(outward, 0.0));
    ball.vel = dir * new_speed;

    // Snap outside the paddle face so the next sub-step cannot hit again
    ball.pos.x = face_x;
}

/// Side whose goal line the ball has passed, if any
pub fn goal_crossed(ball: &Ball) -> Option<Side> {
    if ball.pos.x < Side::Player.goal_x() {
        Some(Side::Player)
    } else if ball.pos.x > Side::Ai.goal_x() {
        Some(Side::Ai)
    } else {
        None
    }
}

/// Shield save: reverse forward travel and park the ball on the goal line
pub fn shield_bounce(ball: &mut Ball, defender: Side) {
    ball.vel.x = defender.outward() * ball.vel.x.abs();
    ball.pos.x = defender.goal_x();
}

/// Clamp velocity magnitude to `[initial, max]` for the round
///
/// A stationary ball stays stationary.
pub fn clamp_speed(ball: &mut Ball, difficulty: &DifficultySettings) {
    if ball.vel == Vec2::ZERO {
        return;
    }
    ball.vel = ball
        .vel
        .clamp_length(difficulty.ball_initial_speed, difficulty.ball_max_speed);
}

/// Serve velocity: `direction` is +1 toward the AI, -1 toward the player
pub fn serve_velocity<R: Rng>(rng: &mut R, difficulty: &DifficultySettings, direction: f32) -> Vec2 {
    let angle_range = std::f32::consts::FRAC_PI_3 * difficulty.angle_multiplier;
    let angle = (rng.random::<f32>() - 0.5) * angle_range;
    Vec2::new(direction * angle.cos(), angle.sin()) * difficulty.ball_initial_speed
}

/// Reset a ball to center court with a random serve
pub fn serve<R: Rng>(ball: &mut Ball, rng: &mut R, difficulty: &DifficultySettings) {
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    ball.pos = Vec2::ZERO;
    ball.vel = serve_velocity(rng, difficulty, direction);
    ball.curve = 0.0;
}

/// Lateral position where the ball will cross `target`'s goal line
///
/// Straight-line projection folded off the side walls; curve is ignored.
/// `None` when the ball is not heading toward `target` or is already past
/// the line.
pub fn predict_landing(ball: &Ball, target: Side) -> Option<f32> {
    if ball.heading() != Some(target) {
        return None;
    }
    let time_to_reach = (target.goal_x() - ball.pos.x) / ball.vel.x;
    if time_to_reach < 0.0 {
        return None;
    }
    Some(fold_lateral(
        ball.pos.y + ball.vel.y * time_to_reach,
        wall_bound(ball.radius),
    ))
}
