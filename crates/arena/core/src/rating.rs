//! Elo-style rating update.
//!
//! Ratings are unbounded integers starting at 1000. A single battle moves the
//! rating by `round(K × (actual − expected))` where the K-factor shrinks once
//! a player reaches level 10.

use crate::combat::BattleResult;

/// Rating every player (and every drone) starts with.
pub const INITIAL_RATING: i32 = 1000;

/// Level at which the K-factor drops from 32 to 24.
pub const VETERAN_LEVEL: u32 = 10;

/// Rating sensitivity for a player of the given level.
pub const fn k_factor(level: u32) -> u32 {
    if level >= VETERAN_LEVEL { 24 } else { 32 }
}

/// Expected score of `rating` against `opponent_rating`:
/// `1 / (1 + 10^((opponent − rating) / 400))`.
pub fn expected_score(rating: i32, opponent_rating: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent_rating - rating) / 400.0))
}

/// Signed rating change for one side of a resolved battle.
///
/// `level` is that side's own level (it selects the K-factor), and `result`
/// is the battle seen from that side's perspective; call with
/// [`BattleResult::inverse`] to score the other side.
pub fn rating_delta(rating: i32, opponent_rating: i32, level: u32, result: BattleResult) -> i32 {
    let k = f64::from(k_factor(level));
    let expected = expected_score(rating, opponent_rating);
    (k * (result.score() - expected)).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_match_moves_sixteen_points() {
        assert_eq!(rating_delta(1000, 1000, 1, BattleResult::Win), 16);
        assert_eq!(rating_delta(1000, 1000, 1, BattleResult::Lose), -16);
        assert_eq!(rating_delta(1000, 1000, 1, BattleResult::Draw), 0);
    }

    #[test]
    fn veteran_k_factor_dampens_swing() {
        assert_eq!(k_factor(9), 32);
        assert_eq!(k_factor(10), 24);
        assert_eq!(rating_delta(1000, 1000, 10, BattleResult::Win), 12);
    }

    #[test]
    fn expected_score_is_symmetric() {
        let a = expected_score(1200, 1000);
        let b = expected_score(1000, 1200);
        assert!((a + b - 1.0).abs() < 1e-12);
        assert!(a > 0.5);
    }

    #[test]
    fn upsets_pay_more_than_expected_wins() {
        let underdog = rating_delta(900, 1100, 1, BattleResult::Win);
        let favorite = rating_delta(1100, 900, 1, BattleResult::Win);
        assert!(underdog > favorite);
        assert!(favorite > 0);
    }

    #[test]
    fn mirrored_perspectives_cancel_for_equal_ratings() {
        for result in [BattleResult::Win, BattleResult::Lose, BattleResult::Draw] {
            let mine = rating_delta(1000, 1000, 3, result);
            let theirs = rating_delta(1000, 1000, 3, result.inverse());
            assert_eq!(mine + theirs, 0);
        }
    }
}
