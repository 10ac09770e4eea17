//! End-to-end match scenarios driven through `tick`

use glam::Vec2;

use rally_pong::Settings;
use rally_pong::consts::*;
use rally_pong::sim::{
    AiController, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind, Side, TickInput, tick,
};

const FRAME: f32 = 1.0 / 60.0;

fn playing(seed: u64) -> GameState {
    let mut state = GameState::new(Settings::default(), seed);
    state.start_game();
    state.drain_events();
    state
}

fn count_points(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::PointScored { .. }))
        .count()
}

#[test]
fn winning_point_ends_round_with_result() {
    let mut state = playing(100);
    state.score.player = 4;
    state.ball.pos = Vec2::new(GOAL_LINE_X - 0.05, 6.0);
    state.ball.vel = Vec2::new(10.0, 0.0);

    tick(&mut state, &TickInput::default(), FRAME);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.winner, Some(Side::Player));
    let events = state.drain_events();
    assert_eq!(count_points(&events), 1);
    let result = events
        .iter()
        .find_map(|e| match e {
            GameEvent::RoundEnded(result) => Some(result.clone()),
            _ => None,
        })
        .expect("round result");
    assert!(result.won);
    assert_eq!(result.round, 1);
    assert_eq!(result.points_scored, 5);

    // Nothing moves after the round is over
    let ball = state.ball;
    tick(&mut state, &TickInput::default(), FRAME);
    assert_eq!(state.ball, ball);

    state.next_round();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.round, 2);
}

#[test]
fn shield_bounces_ball_back_without_scoring() {
    let mut state = playing(101);
    state.lifecycle.grant_shield(Side::Player, None);
    state.ball.pos = Vec2::new(-GOAL_LINE_X + 0.05, -6.0);
    state.ball.vel = Vec2::new(-10.0, 0.0);

    tick(&mut state, &TickInput::default(), FRAME);

    assert_eq!(state.score.player, 0);
    assert_eq!(state.score.ai, 0);
    assert!(!state.lifecycle.has_shield(Side::Player));
    assert!(state.ball.vel.x > 0.0);
    assert!(!state.point_resolved);

    let events = state.drain_events();
    assert_eq!(count_points(&events), 0);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ShieldBlocked { side: Side::Player }))
    );

    // Ball comes back into the court
    for _ in 0..10 {
        tick(&mut state, &TickInput::default(), FRAME);
    }
    assert!(state.ball.pos.x > -GOAL_LINE_X);
    assert_eq!(state.score.ai, 0);
}

#[test]
fn goal_without_shield_scores_exactly_once() {
    let mut state = playing(102);
    state.ball.pos = Vec2::new(-GOAL_LINE_X + 0.05, -6.0);
    state.ball.vel = Vec2::new(-10.0, 0.0);

    let mut points = 0;
    for _ in 0..10 {
        tick(&mut state, &TickInput::default(), FRAME);
        points += count_points(&state.drain_events());
    }
    assert_eq!(points, 1);
    assert_eq!(state.score.ai, 1);
    assert_eq!(state.combo, 0);
}

#[test]
fn multiball_batches_stay_under_cap() {
    let mut state = playing(103);
    let max_speed = state.difficulty.ball_max_speed;

    for k in 0..4 {
        state.ball.pos = Vec2::ZERO;
        state.ball.vel = Vec2::new(1.0, 0.0);
        state.lifecycle.power_ups.push(PowerUp {
            id: 1000 + k,
            kind: PowerUpKind::MultiBall,
            pos: Vec2::new(0.05, 0.0),
        });

        tick(&mut state, &TickInput::default(), FRAME);

        let count = state.lifecycle.multiballs.len();
        if k == 0 {
            assert!((MULTIBALL_MIN_BATCH..=MULTIBALL_MAX_BATCH).contains(&count));
            assert!(
                state
                    .drain_events()
                    .iter()
                    .any(|e| matches!(e, GameEvent::MultiballSpawned { .. }))
            );
        }
        assert!(count <= state.settings.tuning.max_multiballs as usize);
        for ball in &state.lifecycle.multiballs {
            assert!(ball.speed() <= max_speed + 1e-3);
        }
    }
    assert_eq!(state.lifecycle.multiballs.len(), 4);
}

#[test]
fn multiball_point_removes_only_that_ball() {
    let mut state = playing(104);
    state.ball.pos = Vec2::ZERO;
    state.ball.vel = Vec2::new(1.0, 0.0);
    state.combo = 3;
    state.lifecycle.multiballs.push(rally_pong::sim::Ball::new(
        Vec2::new(GOAL_LINE_X - 0.05, 6.0),
        Vec2::new(10.0, 0.0),
    ));
    state.lifecycle.multiballs.push(rally_pong::sim::Ball::new(
        Vec2::new(0.0, 3.0),
        Vec2::new(2.0, 0.0),
    ));

    tick(&mut state, &TickInput::default(), FRAME);

    assert_eq!(state.score.player, 1);
    assert_eq!(state.lifecycle.multiballs.len(), 1);
    assert_eq!(state.combo, 0);
    // Primary ball is still in play
    assert!(!state.point_resolved);
}

#[test]
fn reset_cancels_pending_respawn() {
    let mut state = playing(105);
    state.ball.pos = Vec2::new(GOAL_LINE_X - 0.05, 0.0);
    state.ball.vel = Vec2::new(10.0, 0.0);
    tick(&mut state, &TickInput::default(), FRAME);
    assert!(state.point_resolved);

    state.return_to_menu();
    state.start_game();

    // Park the ball somewhere a respawn would visibly move it from
    state.ball.pos = Vec2::new(3.0, 2.0);
    state.ball.vel = Vec2::ZERO;
    for _ in 0..60 {
        tick(&mut state, &TickInput::default(), FRAME);
    }
    assert_eq!(state.ball.pos, Vec2::new(3.0, 2.0));
    assert_eq!(state.score.player, 0);
}

#[test]
fn long_match_keeps_invariants() {
    let mut state = playing(106);
    let mut pilot = AiController::new();
    let mut prev_combo = 0;
    let mut prev_max = 0;

    for _ in 0..(60 * 120) {
        let mut shadow = *state.paddle(Side::Player);
        let ball = (!state.point_resolved).then_some(&state.ball);
        pilot.update(&mut shadow, ball, &state.difficulty, 1.0, FRAME);
        let diff = pilot.target_z - state.paddle(Side::Player).z;
        let input = TickInput {
            up: diff > AI_DEAD_ZONE,
            down: diff < -AI_DEAD_ZONE,
            pause: false,
        };

        tick(&mut state, &input, FRAME);
        let events = state.drain_events();

        for paddle in &state.paddles {
            assert!(paddle.z.abs() <= paddle.max_z() + 1e-4);
        }
        let band = state.difficulty.ball_initial_speed - 1e-3..=state.difficulty.ball_max_speed + 1e-3;
        if !state.point_resolved {
            assert!(band.contains(&state.ball.speed()), "ball speed {}", state.ball.speed());
        }
        for ball in &state.lifecycle.multiballs {
            assert!(band.contains(&ball.speed()), "multiball speed {}", ball.speed());
        }
        assert!(state.lifecycle.multiballs.len() <= 4);

        let scored = count_points(&events) > 0;
        if state.combo < prev_combo {
            assert!(scored, "combo dropped without a point");
        }
        if scored {
            assert_eq!(state.combo, 0);
        }
        assert!(state.max_combo >= prev_max);
        prev_combo = state.combo;
        prev_max = state.max_combo;

        if state.phase == GamePhase::GameOver {
            if state.winner == Some(Side::Player) {
                state.next_round();
            } else {
                state.start_game();
            }
            pilot.reset();
            prev_combo = 0;
            prev_max = 0;
        }
    }
}
