//! Collision tests for the lateral-plane court
//!
//! Everything here is a pure geometric query. Responses (speed-up, spin,
//! snapping) live in the ball simulator.

use glam::Vec2;

use super::state::{Ball, Paddle};
use crate::consts::*;

/// Result of a wall check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    /// Lateral position the ball must be pushed back to
    pub clamped_z: f32,
}

/// Result of a paddle check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleContact {
    /// Impact offset from paddle center, -1..1 across half the paddle depth
    pub offset: f32,
    /// Play-axis position just outside the paddle face
    pub face_x: f32,
}

/// Largest |z| the ball center may reach before bouncing off a side wall
#[inline]
pub fn wall_bound(ball_radius: f32) -> f32 {
    COURT_HALF_DEPTH - ball_radius
}

/// Check the ball against both side walls
pub fn ball_wall_collision(ball: &Ball) -> Option<WallContact> {
    let bound = wall_bound(ball.radius);
    if ball.pos.y > bound || ball.pos.y < -bound {
        Some(WallContact {
            clamped_z: ball.pos.y.clamp(-bound, bound),
        })
    } else {
        None
    }
}

/// Axis-aligned box test between a ball and a paddle
///
/// The paddle's depth follows its current scale, so a big paddle catches
/// balls further from its center.
pub fn ball_paddle_collision(ball: &Ball, paddle: &Paddle) -> Option<PaddleContact> {
    let half_width = PADDLE_WIDTH / 2.0;
    let half_depth = paddle.depth() / 2.0;
    let px = paddle.x();

    let overlaps_x =
        ball.pos.x - ball.radius < px + half_width && ball.pos.x + ball.radius > px - half_width;
    let overlaps_z = ball.pos.y > paddle.z - half_depth - ball.radius
        && ball.pos.y < paddle.z + half_depth + ball.radius;

    if !(overlaps_x && overlaps_z) {
        return None;
    }

    let offset = (ball.pos.y - paddle.z) / half_depth;
    let face_x = px + paddle.side.outward() * (half_width + ball.radius);
    Some(PaddleContact { offset, face_x })
}

/// Circle proximity check used for pickups
#[inline]
pub fn within_reach(a: Vec2, b: Vec2, reach: f32) -> bool {
    a.distance_squared(b) < reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;

    fn ball_at(x: f32, z: f32) -> Ball {
        Ball::new(Vec2::new(x, z), Vec2::ZERO)
    }

    #[test]
    fn test_wall_contact_clamps_into_court() {
        let bound = wall_bound(BALL_RADIUS);
        let contact = ball_wall_collision(&ball_at(0.0, bound + 0.2)).unwrap();
        assert_eq!(contact.clamped_z, bound);

        let contact = ball_wall_collision(&ball_at(0.0, -bound - 0.2)).unwrap();
        assert_eq!(contact.clamped_z, -bound);

        assert!(ball_wall_collision(&ball_at(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_paddle_contact_center_hit() {
        let paddle = Paddle::new(Side::Player);
        let contact = ball_paddle_collision(&ball_at(paddle.x() + 0.3, 0.0), &paddle).unwrap();
        assert!(contact.offset.abs() < 1e-6);
        // Face is on the court side of the player paddle
        assert!(contact.face_x > paddle.x());
    }

    #[test]
    fn test_paddle_contact_offset_sign() {
        let paddle = Paddle::new(Side::Ai);
        let top = ball_paddle_collision(&ball_at(paddle.x(), 1.0), &paddle).unwrap();
        let bottom = ball_paddle_collision(&ball_at(paddle.x(), -1.0), &paddle).unwrap();
        assert!(top.offset > 0.0);
        assert!(bottom.offset < 0.0);
        assert!(top.face_x < paddle.x());
    }

    #[test]
    fn test_big_paddle_reaches_further() {
        let mut paddle = Paddle::new(Side::Player);
        let ball = ball_at(paddle.x(), 1.8);
        assert!(ball_paddle_collision(&ball, &paddle).is_none());
        paddle.set_scale(BIG_PADDLE_SCALE);
        assert!(ball_paddle_collision(&ball, &paddle).is_some());
    }

    #[test]
    fn test_within_reach() {
        assert!(within_reach(Vec2::ZERO, Vec2::new(0.5, 0.0), POWER_UP_RADIUS));
        assert!(!within_reach(Vec2::ZERO, Vec2::new(1.0, 0.0), POWER_UP_RADIUS));
    }
}
