//! Headless demo: two AI paddles play a match
//!
//! Usage: `rally-pong [settings.json] [seconds]`

use anyhow::{Context, Result};

use rally_pong::Settings;
use rally_pong::consts::AI_DEAD_ZONE;
use rally_pong::sim::{AiController, GameEvent, GamePhase, GameState, Side, TickInput, tick};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 60.0;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path.ends_with(".json") => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {path}"))?;
            Settings::from_json(&json).with_context(|| format!("invalid settings in {path}"))?
        }
        _ => Settings::default(),
    };
    let seconds = match args.next() {
        Some(s) => s
            .parse::<f32>()
            .with_context(|| format!("seconds must be a number, got {s:?}"))?,
        None => DEFAULT_SECONDS,
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Rally Pong (headless) starting with seed {seed}");

    let mut state = GameState::new(settings, seed);
    let mut pilot = AiController::new();
    state.start_game();

    let frames = (seconds / FRAME_DT) as u64;
    for _ in 0..frames {
        let input = pilot_input(&mut pilot, &state);
        tick(&mut state, &input, FRAME_DT);

        for event in state.drain_events() {
            if let GameEvent::RoundEnded(result) = event {
                println!("{}", serde_json::to_string(&result)?);
            }
        }

        if state.phase == GamePhase::GameOver {
            if state.winner == Some(Side::Player) {
                state.next_round();
                pilot.reset();
            } else {
                break;
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

/// Turn an AI controller's aim into up/down intents for the player paddle
fn pilot_input(pilot: &mut AiController, state: &GameState) -> TickInput {
    let mut shadow = *state.paddle(Side::Player);
    let ball = (!state.point_resolved).then_some(&state.ball);
    pilot.update(&mut shadow, ball, &state.difficulty, 1.0, FRAME_DT);

    let diff = pilot.target_z - state.paddle(Side::Player).z;
    TickInput {
        up: diff > AI_DEAD_ZONE,
        down: diff < -AI_DEAD_ZONE,
        pause: false,
    }
}
