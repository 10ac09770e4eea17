//! Property tests for paddle clamping and post-hit speed bounds

use glam::Vec2;
use proptest::prelude::*;

use rally_pong::consts::*;
use rally_pong::sim::ball::resolve_paddles;
use rally_pong::sim::{AiTier, Ball, DifficultySettings, Paddle, Side};

const TIERS: [AiTier; 3] = [AiTier::Easy, AiTier::Normal, AiTier::Hard];

proptest! {
    #[test]
    fn paddle_always_within_travel(
        targets in prop::collection::vec(-50.0f32..50.0, 1..40),
        big in any::<bool>(),
        ai_side in any::<bool>(),
    ) {
        let side = if ai_side { Side::Ai } else { Side::Player };
        let mut paddle = Paddle::new(side);
        for (i, z) in targets.into_iter().enumerate() {
            // Toggle scale mid-way to exercise the re-clamp
            if big && i % 3 == 0 {
                let scale = if paddle.scale > 1.0 { 1.0 } else { BIG_PADDLE_SCALE };
                paddle.set_scale(scale);
            }
            paddle.move_to(z, 1.0 / 60.0);
            prop_assert!(paddle.z.abs() <= paddle.max_z() + 1e-5);
        }
    }

    #[test]
    fn paddle_hit_speed_never_exceeds_max(
        round in 1u32..10,
        tier in 0usize..3,
        speed in 0.5f32..60.0,
        angle in -1.2f32..1.2,
        offset in -1.5f32..1.5,
        paddle_vel in -40.0f32..40.0,
    ) {
        let difficulty = DifficultySettings::for_round(round, TIERS[tier]);
        let mut paddle = Paddle::new(Side::Ai);
        paddle.lateral_vel = paddle_vel;
        let paddles = [Paddle::new(Side::Player), paddle];

        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        let mut ball = Ball::new(Vec2::new(Side::Ai.paddle_x() - 0.3, offset), vel);

        if resolve_paddles(&mut ball, &paddles, &difficulty) == Some(Side::Ai) {
            prop_assert!(ball.speed() <= difficulty.ball_max_speed + 1e-3);
            prop_assert!(ball.vel.x <= 0.0);
        }
    }
}
