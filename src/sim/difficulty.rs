//! Round-based difficulty curve
//!
//! Pure mapping from (round, AI tier) to the tuning used for that round.

use serde::{Deserialize, Serialize};

/// Rounds past this many stop making the game harder
pub const ROUND_SCALE_CAP: u32 = 5;
/// Fastest the AI can re-aim, in seconds
pub const MIN_REACTION_DELAY: f32 = 0.02;
/// Most lateral lead the AI will ever use
pub const MAX_PREDICTION: f32 = 0.6;

/// Coarse AI skill selector picked before a game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AiTier {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl AiTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiTier::Easy => "Easy",
            AiTier::Normal => "Normal",
            AiTier::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(AiTier::Easy),
            "normal" | "medium" => Some(AiTier::Normal),
            "hard" => Some(AiTier::Hard),
            _ => None,
        }
    }

    /// (speed, reaction delay, prediction growth) multipliers
    fn multipliers(&self) -> (f32, f32, f32) {
        match self {
            AiTier::Easy => (0.75, 1.5, 0.5),
            AiTier::Normal => (1.0, 1.0, 1.0),
            AiTier::Hard => (1.25, 0.7, 1.5),
        }
    }
}

/// Tuning for a single round. Speeds are units per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// AI paddle lateral speed cap
    pub ai_speed: f32,
    /// Seconds between AI re-aims
    pub ai_reaction_delay: f32,
    /// 0..1, how much lateral lead the AI uses
    pub ai_prediction: f32,
    pub ball_initial_speed: f32,
    pub ball_max_speed: f32,
    /// Speed added on every paddle hit
    pub ball_speed_increment: f32,
    /// Scales hit-offset spin and serve angle spread
    pub angle_multiplier: f32,
}

impl DifficultySettings {
    const BASE: DifficultySettings = DifficultySettings {
        ai_speed: 4.8,
        ai_reaction_delay: 0.15,
        ai_prediction: 0.0,
        ball_initial_speed: 7.2,
        ball_max_speed: 15.0,
        ball_speed_increment: 0.6,
        angle_multiplier: 1.0,
    };

    /// Per-round growth, applied `min(round - 1, cap)` times
    const PER_ROUND: DifficultySettings = DifficultySettings {
        ai_speed: 0.9,
        ai_reaction_delay: -0.025,
        ai_prediction: 0.15,
        ball_initial_speed: 0.9,
        ball_max_speed: 2.4,
        ball_speed_increment: 0.18,
        angle_multiplier: 0.15,
    };

    /// Difficulty for a 1-based round index at the given AI tier
    pub fn for_round(round: u32, tier: AiTier) -> Self {
        let scale = round.saturating_sub(1).min(ROUND_SCALE_CAP) as f32;
        let (speed_mul, reaction_mul, prediction_mul) = tier.multipliers();
        let base = Self::BASE;
        let step = Self::PER_ROUND;

        Self {
            ai_speed: base.ai_speed * speed_mul + scale * step.ai_speed,
            ai_reaction_delay: (base.ai_reaction_delay * reaction_mul
                + scale * step.ai_reaction_delay)
                .max(MIN_REACTION_DELAY),
            ai_prediction: (base.ai_prediction + scale * step.ai_prediction * prediction_mul)
                .min(MAX_PREDICTION),
            ball_initial_speed: base.ball_initial_speed + scale * step.ball_initial_speed,
            ball_max_speed: base.ball_max_speed + scale * step.ball_max_speed,
            ball_speed_increment: base.ball_speed_increment + scale * step.ball_speed_increment,
            angle_multiplier: base.angle_multiplier + scale * step.angle_multiplier,
        }
    }
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self::for_round(1, AiTier::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TIERS: [AiTier; 3] = [AiTier::Easy, AiTier::Normal, AiTier::Hard];

    #[test]
    fn test_round_one_normal_matches_base() {
        let d = DifficultySettings::for_round(1, AiTier::Normal);
        assert_eq!(d, DifficultySettings::BASE);
    }

    #[test]
    fn test_scaling_stops_at_cap() {
        for tier in TIERS {
            let capped = DifficultySettings::for_round(ROUND_SCALE_CAP + 1, tier);
            assert_eq!(DifficultySettings::for_round(50, tier), capped);
        }
    }

    #[test]
    fn test_reaction_delay_floored_and_prediction_capped() {
        let d = DifficultySettings::for_round(6, AiTier::Hard);
        assert!(d.ai_reaction_delay >= MIN_REACTION_DELAY);
        assert!(d.ai_prediction <= MAX_PREDICTION);
    }

    #[test]
    fn test_harder_tier_is_faster_and_quicker() {
        let easy = DifficultySettings::for_round(3, AiTier::Easy);
        let hard = DifficultySettings::for_round(3, AiTier::Hard);
        assert!(hard.ai_speed > easy.ai_speed);
        assert!(hard.ai_reaction_delay < easy.ai_reaction_delay);
        assert!(hard.ai_prediction > easy.ai_prediction);
        // Ball tuning does not depend on the AI tier
        assert_eq!(hard.ball_max_speed, easy.ball_max_speed);
    }

    #[test]
    fn test_round_zero_treated_as_first_round() {
        assert_eq!(
            DifficultySettings::for_round(0, AiTier::Normal),
            DifficultySettings::for_round(1, AiTier::Normal)
        );
    }

    proptest! {
        #[test]
        fn prop_max_speed_never_below_initial(round in 0u32..64, tier in 0usize..3) {
            let d = DifficultySettings::for_round(round, TIERS[tier]);
            prop_assert!(d.ball_max_speed >= d.ball_initial_speed);
        }

        #[test]
        fn prop_challenge_non_decreasing(round in 1u32..64, tier in 0usize..3) {
            let tier = TIERS[tier];
            let a = DifficultySettings::for_round(round, tier);
            let b = DifficultySettings::for_round(round + 1, tier);
            prop_assert!(b.ball_initial_speed >= a.ball_initial_speed);
            prop_assert!(b.ball_max_speed >= a.ball_max_speed);
            prop_assert!(b.ai_speed >= a.ai_speed);
            prop_assert!(b.ai_reaction_delay <= a.ai_reaction_delay);
            prop_assert!(b.ai_prediction >= a.ai_prediction);
        }

        #[test]
        fn prop_deterministic(round in 0u32..64, tier in 0usize..3) {
            let tier = TIERS[tier];
            prop_assert_eq!(
                DifficultySettings::for_round(round, tier),
                DifficultySettings::for_round(round, tier)
            );
        }
    }
}
