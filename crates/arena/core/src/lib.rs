//! Deterministic battle rules shared across the arena services.
//!
//! `arena-core` defines the canonical mechanics (seeded combat resolution,
//! the Elo-style rating update, and progression accrual) as pure APIs that
//! the runtime and offline tools can both replay. Nothing in this crate
//! touches storage, clocks, or ambient entropy; a battle is a function of
//! its seed and the two stat snapshots, nothing else.
pub mod combat;
pub mod progression;
pub mod rating;
pub mod rng;
pub mod stats;

pub use combat::{
    BattleOutcome, BattleResult, MAX_ROUNDS, Meters, Move, RoundEntry, RoundLog, STARTING_HP,
    STARTING_STAMINA, crit_chance, dodge_chance, resolve_battle,
};
pub use progression::{
    BattleRewards, Progression, ProgressionError, SKILL_POINTS_PER_LEVEL, XP_LEVEL_STEP,
    spend_skill_point,
};
pub use rating::{INITIAL_RATING, expected_score, k_factor, rating_delta};
pub use rng::{Lcg32, WeightedTable};
pub use stats::{BASE_STAT, StatBlock, StatKind};
