//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, clamped per frame and sub-stepped for the ball
//! - Seeded RNG held in the game state
//! - Simulation clock for every timer and expiry
//! - No rendering or platform dependencies

pub mod ai;
pub mod ball;
pub mod collision;
pub mod difficulty;
pub mod events;
pub mod lifecycle;
pub mod registry;
pub mod round;
pub mod skin_power;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ai::AiController;
pub use ball::{BallEnv, SubstepOutcome, predict_landing, substep};
pub use collision::{PaddleContact, WallContact, ball_paddle_collision, ball_wall_collision};
pub use difficulty::{AiTier, DifficultySettings};
pub use events::{GameEvent, RoundResult};
pub use lifecycle::{ActiveEffect, Coin, Lifecycle, PickupOutcome, PowerUp, Shield};
pub use registry::{EffectKind, PaddleSkin, PowerUpKind, SkinPowerKind, SkinPowerSpec};
pub use skin_power::{ActiveAbility, SkinPowerTracker};
pub use snapshot::Snapshot;
pub use state::{Ball, GamePhase, GameState, Paddle, Score, Side};
pub use tick::{TickInput, tick};
