//! Event types for different topics.

use serde::{Deserialize, Serialize};

use arena_core::{BattleResult, StatKind};

use crate::types::{Cosmetic, MatchId, UserId};

/// Events related to matchmaking and battle lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A user entered the waiting set without finding an opponent.
    Queued { user: UserId },

    /// Two waiting users were paired into a match owned by `user`.
    Paired {
        user: UserId,
        opponent: UserId,
        match_id: MatchId,
    },

    /// A drone match was opened for `user`.
    Started { user: UserId, match_id: MatchId },

    /// A match was settled and rewards applied.
    Resolved {
        user: UserId,
        match_id: MatchId,
        result: BattleResult,
        rating_delta: i32,
    },
}

/// Events related to progression and profile changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProfileEvent {
    /// A battle's XP pushed the user over one or more level thresholds.
    LevelUp { user: UserId, level: u32 },

    /// A skill point was spent on an attribute.
    StatRaised { user: UserId, stat: StatKind },

    /// A new arcade high score was accepted.
    ScoreSubmitted { user: UserId, score: u64 },
}

/// Events related to the loot economy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LootEvent {
    KeyPurchased { user: UserId, crate_keys: u32 },
    CrateOpened { user: UserId, item: Cosmetic },
}
