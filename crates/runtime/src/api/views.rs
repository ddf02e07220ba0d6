//! Response shapes returned to clients.

use serde::{Deserialize, Serialize};
use strum::EnumString;

use arena_core::{BattleResult, Meters, RoundLog, StatBlock};

use crate::types::{Cosmetic, InventoryEntry, MatchId, OpponentSnapshot, UserRecord};

/// Result of an enqueue request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnqueueOutcome {
    pub matched: bool,
    pub match_id: Option<MatchId>,
}

/// What a client needs to fight a pending match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleBrief {
    pub match_id: MatchId,
    pub opponent: OpponentSnapshot,
    pub seed: u32,
}

/// Full resolution response.
///
/// `replayed` marks an idempotent re-resolve: the stored outcome is returned
/// and nothing was re-applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub result: BattleResult,
    pub log: RoundLog,
    pub user_final: Meters,
    pub opponent_final: Meters,
    pub reward_coins: u32,
    pub xp_gain: u32,
    pub rating_delta: i32,
    pub battle_score: u64,
    pub level: u32,
    pub skill_points: u32,
    pub replayed: bool,
}

/// Profile summary for the calling user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub stats: StatBlock,
    pub level: u32,
    pub experience: u32,
    pub skill_points: u32,
    pub rating: i32,
    pub battle_score: u64,
    pub arcade_score: u64,
    pub coins: u64,
    pub energy: u32,
    pub crate_keys: u32,
}

impl ProfileView {
    pub fn of(user: &UserRecord) -> Self {
        Self {
            stats: user.stats,
            level: user.progression.level,
            experience: user.progression.experience,
            skill_points: user.progression.skill_points,
            rating: user.rating,
            battle_score: user.battle_score,
            arcade_score: user.arcade_score,
            coins: user.coins,
            energy: user.energy,
            crate_keys: user.crate_keys,
        }
    }
}

/// Stat block after a skill-point spend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatAllocation {
    pub stats: StatBlock,
    pub skill_points: u32,
}

/// Which column a leaderboard query ranks by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum LeaderboardMode {
    #[default]
    #[strum(serialize = "score")]
    Score,
    #[strum(serialize = "rating", serialize = "elo")]
    Rating,
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub rating: i32,
    pub arcade_score: u64,
    pub battle_score: u64,
}

impl LeaderboardRow {
    pub fn of(user: &UserRecord) -> Self {
        Self {
            name: user.display_name(),
            rating: user.rating,
            arcade_score: user.arcade_score,
            battle_score: user.battle_score,
        }
    }
}

/// Keys and cosmetics the user owns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryView {
    pub crate_keys: u32,
    pub items: Vec<InventoryEntry>,
}

/// Key count after a store purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyPurchase {
    pub crate_keys: u32,
}

/// Result of opening a loot crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrateOpening {
    pub gained: Cosmetic,
    pub crate_keys: u32,
    pub inventory: Vec<InventoryEntry>,
}
