//! Full battle simulation from a frozen seed.

use arrayvec::ArrayVec;

use crate::rng::Lcg32;
use crate::stats::StatBlock;

use super::moves::Move;
use super::round::{Combatant, RoundEntry, play_round};

/// Hard cap on rounds per battle.
pub const MAX_ROUNDS: usize = 3;

/// Hit points each side starts the simulation with.
pub const STARTING_HP: i32 = 100;

/// Stamina each side starts the simulation with.
pub const STARTING_STAMINA: i32 = 30;

/// The bounded per-battle round log.
pub type RoundLog = ArrayVec<RoundEntry, MAX_ROUNDS>;

/// Outcome of a battle from the owning user's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BattleResult {
    Win,
    Lose,
    Draw,
}

impl BattleResult {
    /// Actual-score mapping used by the rating update.
    pub const fn score(self) -> f64 {
        match self {
            BattleResult::Win => 1.0,
            BattleResult::Draw => 0.5,
            BattleResult::Lose => 0.0,
        }
    }

    /// The same battle seen from the other side.
    pub const fn inverse(self) -> Self {
        match self {
            BattleResult::Win => BattleResult::Lose,
            BattleResult::Lose => BattleResult::Win,
            BattleResult::Draw => BattleResult::Draw,
        }
    }
}

impl std::fmt::Display for BattleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BattleResult::Win => "win",
            BattleResult::Lose => "lose",
            BattleResult::Draw => "draw",
        };
        write!(f, "{}", label)
    }
}

/// Final HP/stamina of one side, raw and unclamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meters {
    pub hp: i32,
    pub stamina: i32,
}

/// Everything a resolved simulation produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub result: BattleResult,
    pub log: RoundLog,
    pub user: Meters,
    pub opponent: Meters,
}

/// Replay a battle from its seed.
///
/// Pure: identical `(seed, stats, moves)` always yield an identical outcome,
/// field for field. The audit and idempotent-resolve guarantees rest on
/// this. The user's committed moves cover up to [`MAX_ROUNDS`] rounds;
/// missing entries default to [`Move::Strike`]. The opponent's move each
/// round is drawn uniformly from the same stream, never strategically.
///
/// Rounds stop early as soon as either side's HP reaches zero or below. The
/// winner is the side with strictly more remaining HP; exact equality,
/// including a simultaneous KO, is a draw.
pub fn resolve_battle(
    seed: u32,
    user_stats: &StatBlock,
    opponent_stats: &StatBlock,
    moves: &[Move],
) -> BattleOutcome {
    let mut rng = Lcg32::new(seed);
    let mut user = Combatant::fresh(*user_stats, STARTING_HP, STARTING_STAMINA);
    let mut opponent = Combatant::fresh(*opponent_stats, STARTING_HP, STARTING_STAMINA);
    let mut log = RoundLog::new();

    for round in 0..MAX_ROUNDS {
        let user_move = moves.get(round).copied().unwrap_or_default();
        let opponent_move = Move::draw(&mut rng);

        let entry = play_round(
            (round + 1) as u8,
            &mut user,
            &mut opponent,
            user_move,
            opponent_move,
            &mut rng,
        );
        log.push(entry);

        if user.hp <= 0 || opponent.hp <= 0 {
            break;
        }
    }

    let result = if user.hp > opponent.hp {
        BattleResult::Win
    } else if opponent.hp > user.hp {
        BattleResult::Lose
    } else {
        BattleResult::Draw
    };

    BattleOutcome {
        result,
        log,
        user: Meters {
            hp: user.hp,
            stamina: user.stamina,
        },
        opponent: Meters {
            hp: opponent.hp,
            stamina: opponent.stamina,
        },
    }
}
