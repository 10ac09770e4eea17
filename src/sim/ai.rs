//! AI paddle controller
//!
//! Re-aims on a reaction-delay cadence and moves toward the cached target
//! every frame. The delay is what keeps it beatable.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultySettings;
use super::state::{Ball, Paddle};
use crate::approach;
use crate::consts::AI_DEAD_ZONE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiController {
    /// Seconds since the last re-aim
    pub reaction_timer: f32,
    /// Lateral position the paddle is heading for
    pub target_z: f32,
    /// Number of re-aims so far (diagnostics)
    pub retargets: u32,
}

impl AiController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current aim, used on round reset
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance one frame and move `paddle`
    ///
    /// `ball` is `None` while no ball is in play; the paddle then drifts back
    /// to center. `speed_scale` folds in speed boost and global game speed.
    pub fn update(
        &mut self,
        paddle: &mut Paddle,
        ball: Option<&Ball>,
        difficulty: &DifficultySettings,
        speed_scale: f32,
        dt: f32,
    ) {
        self.reaction_timer += dt;
        if self.reaction_timer >= difficulty.ai_reaction_delay {
            self.reaction_timer = 0.0;
            self.target_z = match ball {
                Some(ball) => Self::aim(paddle, ball, difficulty.ai_prediction),
                None => 0.0,
            };
            self.retargets += 1;
        }

        let diff = self.target_z - paddle.z;
        if diff.abs() > AI_DEAD_ZONE {
            let max_step = difficulty.ai_speed * speed_scale * dt;
            paddle.move_to(approach(paddle.z, self.target_z, max_step), dt);
        } else {
            paddle.move_to(paddle.z, dt);
        }
    }

    /// Where to aim for this ball, clamped to the paddle's travel
    fn aim(paddle: &Paddle, ball: &Ball, prediction: f32) -> f32 {
        let max_z = paddle.max_z();
        let toward_paddle = ball.vel.x * paddle.side.outward() < 0.0;

        let target = if toward_paddle && prediction > 0.0 {
            let time_to_reach = (paddle.x() - ball.pos.x).abs() / ball.vel.x.abs();
            ball.pos.y + ball.vel.y * time_to_reach * prediction
        } else {
            ball.pos.y
        };
        target.clamp(-max_z, max_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use glam::Vec2;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_static_ball_retargets_and_converges() {
        let mut difficulty = DifficultySettings::default();
        difficulty.ai_reaction_delay = 0.15;
        let mut ai = AiController::new();
        let mut paddle = Paddle::new(Side::Ai);
        let ball = Ball::new(Vec2::new(0.0, 3.0), Vec2::ZERO);

        for _ in 0..60 {
            ai.update(&mut paddle, Some(&ball), &difficulty, 1.0, FRAME);
        }

        assert!(ai.retargets >= 6, "only {} retargets", ai.retargets);
        assert!((paddle.z - 3.0).abs() <= AI_DEAD_ZONE + 1e-4);
    }

    #[test]
    fn test_target_only_changes_after_reaction_delay() {
        let mut difficulty = DifficultySettings::default();
        difficulty.ai_reaction_delay = 0.5;
        let mut ai = AiController::new();
        let mut paddle = Paddle::new(Side::Ai);
        let ball = Ball::new(Vec2::new(0.0, 2.0), Vec2::ZERO);

        ai.update(&mut paddle, Some(&ball), &difficulty, 1.0, 0.1);
        assert_eq!(ai.retargets, 0);
        assert_eq!(ai.target_z, 0.0);
        assert_eq!(paddle.z, 0.0);
    }

    #[test]
    fn test_prediction_leads_incoming_ball() {
        let mut difficulty = DifficultySettings::default();
        difficulty.ai_reaction_delay = 0.0;
        difficulty.ai_prediction = 0.5;
        let mut ai = AiController::new();
        let mut paddle = Paddle::new(Side::Ai);
        // 9 units from the paddle at 9 u/s: one second out
        let ball = Ball::new(Vec2::new(0.0, 0.0), Vec2::new(9.0, 4.0));

        ai.update(&mut paddle, Some(&ball), &difficulty, 1.0, FRAME);
        assert!((ai.target_z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_outgoing_ball_is_tracked_directly() {
        let mut difficulty = DifficultySettings::default();
        difficulty.ai_reaction_delay = 0.0;
        difficulty.ai_prediction = 0.6;
        let mut ai = AiController::new();
        let mut paddle = Paddle::new(Side::Ai);
        let ball = Ball::new(Vec2::new(0.0, -1.5), Vec2::new(-9.0, 4.0));

        ai.update(&mut paddle, Some(&ball), &difficulty, 1.0, FRAME);
        assert_eq!(ai.target_z, -1.5);
    }

    #[test]
    fn test_target_clamped_to_travel() {
        let mut difficulty = DifficultySettings::default();
        difficulty.ai_reaction_delay = 0.0;
        let mut ai = AiController::new();
        let mut paddle = Paddle::new(Side::Ai);
        let ball = Ball::new(Vec2::new(0.0, 6.5), Vec2::ZERO);

        ai.update(&mut paddle, Some(&ball), &difficulty, 1.0, FRAME);
        assert_eq!(ai.target_z, paddle.max_z());
    }

    #[test]
    fn test_speed_scale_and_lateral_velocity() {
        let mut difficulty = DifficultySettings::default();
        difficulty.ai_reaction_delay = 0.0;
        let mut ai = AiController::new();
        let mut paddle = Paddle::new(Side::Ai);
        let ball = Ball::new(Vec2::new(0.0, 5.0), Vec2::ZERO);

        ai.update(&mut paddle, Some(&ball), &difficulty, 1.5, 0.1);
        let expected = difficulty.ai_speed * 1.5 * 0.1;
        assert!((paddle.z - expected).abs() < 1e-4);
        assert!((paddle.lateral_vel - difficulty.ai_speed * 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_no_ball_drifts_to_center() {
        let mut difficulty = DifficultySettings::default();
        difficulty.ai_reaction_delay = 0.0;
        let mut ai = AiController::new();
        let mut paddle = Paddle::new(Side::Ai);
        paddle.z = 2.0;

        for _ in 0..120 {
            ai.update(&mut paddle, None, &difficulty, 1.0, FRAME);
        }
        assert!(paddle.z.abs() <= AI_DEAD_ZONE + 1e-4);
        assert_eq!(paddle.lateral_vel, 0.0);
    }
}
