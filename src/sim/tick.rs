//! Per-frame simulation tick
//!
//! Core game loop. The host calls `tick` once per display frame with the
//! elapsed seconds; everything else happens in here.

use super::ball::{BallEnv, goal_crossed, shield_bounce, substep};
use super::events::GameEvent;
use super::lifecycle::{Lifecycle, PickupOutcome};
use super::registry::EffectKind;
use super::state::{Ball, GamePhase, GameState, Side};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the player paddle toward +z
    pub up: bool,
    /// Move the player paddle toward -z
    pub down: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause();
                return;
            }
            GamePhase::Paused => state.resume(),
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    // A stalled host must not tunnel the ball through a paddle
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    if dt <= 0.0 {
        return;
    }
    state.now += dt as f64;

    state.run_scheduled();

    // Expire timed buffs, shields and abilities
    state.lifecycle.sweep(state.now);
    state.skin_powers.sweep(state.now);
    for side in Side::BOTH {
        let scale = if state.lifecycle.has_effect(EffectKind::BigPaddle, side) {
            BIG_PADDLE_SCALE
        } else {
            1.0
        };
        state.paddle_mut(side).set_scale(scale);
    }

    move_player(state, input, dt);
    move_ai(state, dt);

    step_primary(state, dt);
    if state.phase == GamePhase::Playing {
        step_multiballs(state, dt);
    }

    let ball = (!state.point_resolved).then_some(&state.ball);
    state.skin_powers.update_previews(ball);
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let dir = input.up as i32 as f32 - input.down as i32 as f32;
    let boost = if state.lifecycle.has_effect(EffectKind::SpeedBoost, Side::Player) {
        PLAYER_SPEED_BOOST
    } else {
        1.0
    };
    let speed = PLAYER_PADDLE_SPEED * boost * state.settings.game_speed.multiplier();
    let paddle = state.paddle_mut(Side::Player);
    let target = paddle.z + dir * speed * dt;
    paddle.move_to(target, dt);
}

fn move_ai(state: &mut GameState, dt: f32) {
    let boost = if state.lifecycle.has_effect(EffectKind::SpeedBoost, Side::Ai) {
        AI_SPEED_BOOST
    } else {
        1.0
    };
    let speed_scale = boost * state.settings.game_speed.multiplier();
    // Nothing to chase while the primary ball waits to respawn
    let ball = (!state.point_resolved).then_some(&state.ball);
    state.ai.update(
        &mut state.paddles[Side::Ai.index()],
        ball,
        &state.difficulty,
        speed_scale,
        dt,
    );
}

/// Displacement scale for a ball: slowed while heading at a slow-ball owner
fn motion_scale(lifecycle: &Lifecycle, ball: &Ball, game_speed: f32) -> f32 {
    let slowed = ball
        .heading()
        .is_some_and(|side| lifecycle.has_effect(EffectKind::SlowBall, side));
    if slowed {
        SLOW_BALL_MULTIPLIER * game_speed
    } else {
        game_speed
    }
}

fn step_primary(state: &mut GameState, dt: f32) {
    // Ball is out of play until the scheduled respawn
    if state.point_resolved {
        return;
    }

    let sub_dt = dt / PRIMARY_SUBSTEPS as f32;
    let game_speed = state.settings.game_speed.multiplier();

    for _ in 0..PRIMARY_SUBSTEPS {
        let env = BallEnv {
            paddles: &state.paddles,
            difficulty: &state.difficulty,
            motion_scale: motion_scale(&state.lifecycle, &state.ball, game_speed),
        };
        let outcome = substep(
            &mut state.ball,
            &env,
            &state.lifecycle.power_ups,
            &state.lifecycle.coins,
            sub_dt,
        );

        if outcome.wall_bounce {
            state.emit(GameEvent::WallBounce);
            state.shake(SHAKE_WALL);
        }
        if let Some(id) = outcome.power_up {
            collect_power_up(state, id);
        }
        if let Some(id) = outcome.coin {
            collect_coin(state, id);
        }
        if let Some(side) = outcome.paddle_hit {
            on_primary_hit(state, side);
        }
    }

    if let Some(defender) = goal_crossed(&state.ball) {
        state.resolve_primary_goal(defender);
    }
}

/// Side credited with a pickup: the last hitter, or failing that the side the
/// ball is travelling away from
fn pickup_owner(state: &GameState) -> Side {
    state.last_hitter.unwrap_or_else(|| {
        state
            .ball
            .heading()
            .map(Side::opponent)
            .unwrap_or(Side::Player)
    })
}

fn collect_power_up(state: &mut GameState, id: u32) {
    let Some(power_up) = state.lifecycle.take_power_up(id) else {
        return;
    };
    let side = pickup_owner(state);
    log::debug!("{:?} collected {:?}", side, power_up.kind);
    state.emit(GameEvent::PowerUpCollected {
        side,
        kind: power_up.kind,
    });

    let now = state.now;
    if state.lifecycle.apply_power_up(power_up.kind, side, now) == PickupOutcome::Multiball {
        let count = state.lifecycle.spawn_multiballs(
            &mut state.rng,
            state.ball.pos,
            &state.difficulty,
            state.settings.tuning.max_multiballs,
        );
        if count > 0 {
            state.emit(GameEvent::MultiballSpawned { count });
        }
    }
}

fn collect_coin(state: &mut GameState, id: u32) {
    if state.lifecycle.take_coin(id).is_none() {
        return;
    }
    let side = pickup_owner(state);
    state.emit(GameEvent::CoinCollected { side });
}

fn on_primary_hit(state: &mut GameState, side: Side) {
    state.combo += 1;
    state.max_combo = state.max_combo.max(state.combo);
    state.last_hitter = Some(side);
    state.emit(GameEvent::PaddleHit {
        side,
        combo: state.combo,
        primary: true,
    });
    state.flash(side);
    state.shake(SHAKE_HIT);

    state.register_skin_hit(side);

    let tuning = state.settings.tuning;
    state
        .lifecycle
        .maybe_spawn_power_up(&mut state.rng, state.combo, &tuning);
    state.lifecycle.maybe_spawn_coin(&mut state.rng, &tuning);
}

/// Secondary balls: same walls and paddles, no pickups, no skin progress.
/// Their returns still count toward the rally combo.
fn step_multiballs(state: &mut GameState, dt: f32) {
    let sub_dt = dt / MULTIBALL_SUBSTEPS as f32;
    let game_speed = state.settings.game_speed.multiplier();

    let mut i = 0;
    while i < state.lifecycle.multiballs.len() {
        let mut ball = state.lifecycle.multiballs[i];

        for _ in 0..MULTIBALL_SUBSTEPS {
            let env = BallEnv {
                paddles: &state.paddles,
                difficulty: &state.difficulty,
                motion_scale: motion_scale(&state.lifecycle, &ball, game_speed),
            };
            let outcome = substep(&mut ball, &env, &[], &[], sub_dt);
            if outcome.wall_bounce {
                state.emit(GameEvent::WallBounce);
            }
            if let Some(side) = outcome.paddle_hit {
                state.combo += 1;
                state.max_combo = state.max_combo.max(state.combo);
                state.emit(GameEvent::PaddleHit {
                    side,
                    combo: state.combo,
                    primary: false,
                });
            }
        }

        match goal_crossed(&ball) {
            Some(defender) if state.try_shield_save(defender) => {
                shield_bounce(&mut ball, defender);
                state.lifecycle.multiballs[i] = ball;
                i += 1;
            }
            Some(defender) => {
                state.lifecycle.multiballs.remove(i);
                state.award_point(defender.opponent());
                if state.phase != GamePhase::Playing {
                    return;
                }
            }
            None => {
                state.lifecycle.multiballs[i] = ball;
                i += 1;
            }
        }
    }
}
