//! Persisted record shapes: users, matches, queue membership, history.
//!
//! These are logical shapes, not a database schema. Every store trait in
//! [`crate::repository`] moves whole records, and durable backends are free
//! to map them however they like.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use arena_core::{BattleResult, INITIAL_RATING, Meters, Progression, RoundLog, StatBlock};

/// Internal identifier for a registered user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// Identifier of a match, unique across the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// Verified caller identity handed over by the auth boundary.
///
/// The runtime trusts it unconditionally; verifying the transport-level
/// credential is the collaborator's job. An all-zero principal is the one
/// thing rejected here, as unauthenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub external_id: u64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Principal {
    pub fn is_anonymous(&self) -> bool {
        self.external_id == 0
    }
}

/// Battle-entry energy a fresh account starts with.
pub const STARTING_ENERGY: u32 = 10;

/// Per-user history retention, newest first.
pub const HISTORY_CAP: usize = 30;

/// Rows returned by a leaderboard query.
pub const LEADERBOARD_CAP: usize = 50;

/// One cosmetic drop from the loot table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Cosmetic {
    #[strum(serialize = "skin:crimson-shell")]
    CrimsonShell,
    #[strum(serialize = "skin:azure-shell")]
    AzureShell,
    #[strum(serialize = "skin:gilded-shell")]
    GildedShell,
}

/// Stackable inventory line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: Cosmetic,
    pub quantity: u32,
}

/// The complete per-user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub external_id: u64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Allocatable attributes, raised only by spending skill points.
    pub stats: StatBlock,
    pub progression: Progression,
    /// Elo-style rating, unbounded in both directions.
    pub rating: i32,

    /// Cumulative score fed by resolved battles.
    pub battle_score: u64,
    /// Best client-reported arcade score (high-water mark).
    pub arcade_score: u64,
    pub coins: u64,
    /// Battle-entry resource; floored at 0, spent on resolution.
    pub energy: u32,

    pub crate_keys: u32,
    pub inventory: Vec<InventoryEntry>,

    pub banned: bool,
}

impl UserRecord {
    /// Fresh account with default stats, rating, and energy.
    pub fn new(id: UserId, principal: &Principal) -> Self {
        Self {
            id,
            external_id: principal.external_id,
            username: principal.username.clone(),
            first_name: principal.first_name.clone(),
            last_name: principal.last_name.clone(),
            stats: StatBlock::default(),
            progression: Progression::default(),
            rating: INITIAL_RATING,
            battle_score: 0,
            arcade_score: 0,
            coins: 0,
            energy: STARTING_ENERGY,
            crate_keys: 0,
            inventory: Vec::new(),
            banned: false,
        }
    }

    /// Name shown to opponents and on leaderboards.
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.first_name.clone())
            .unwrap_or_else(|| format!("U{}", self.id.0))
    }

    /// Add a cosmetic to the inventory, stacking duplicates.
    pub fn grant_item(&mut self, item: Cosmetic) {
        if let Some(entry) = self.inventory.iter_mut().find(|entry| entry.item == item) {
            entry.quantity += 1;
        } else {
            self.inventory.push(InventoryEntry { item, quantity: 1 });
        }
    }
}

/// Opponent view frozen into a match at creation time.
///
/// Later stat or rating changes on the live user never reach an in-flight
/// match; resolution always replays against this snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentSnapshot {
    pub name: String,
    pub stats: StatBlock,
    pub rating: i32,
}

impl OpponentSnapshot {
    /// Freeze a real user's current state.
    pub fn of_user(user: &UserRecord) -> Self {
        Self {
            name: user.display_name(),
            stats: user.stats,
            rating: user.rating,
        }
    }

    /// Synthesize a drone mirroring the requester's stats.
    pub fn drone(requester: &UserRecord) -> Self {
        Self {
            name: "Drone".to_string(),
            stats: requester.stats,
            rating: INITIAL_RATING,
        }
    }
}

/// Stored result of a settled match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettledOutcome {
    pub result: BattleResult,
    /// Delta that was applied to the owner's rating.
    pub rating_delta: i32,
    pub log: RoundLog,
    pub user_final: Meters,
    pub opponent_final: Meters,
}

/// A match in the registry.
///
/// Created unresolved with a frozen seed and opponent snapshot; mutated
/// exactly once, atomically, to resolved-with-outcome. `opponent_user` is
/// `Some` only for queue-paired human opponents; drones leave it empty, and
/// it is what gates the two-sided rating update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub owner: UserId,
    pub opponent: OpponentSnapshot,
    pub opponent_user: Option<UserId>,
    pub seed: u32,
    pub resolved: bool,
    pub outcome: Option<SettledOutcome>,
}

impl MatchRecord {
    /// Open a fresh, unresolved match.
    pub fn open(
        id: MatchId,
        owner: UserId,
        opponent: OpponentSnapshot,
        opponent_user: Option<UserId>,
        seed: u32,
    ) -> Self {
        Self {
            id,
            owner,
            opponent,
            opponent_user,
            seed,
            resolved: false,
            outcome: None,
        }
    }
}

/// One line of a user's battle history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub at: DateTime<Utc>,
    pub opponent: OpponentSnapshot,
    pub result: BattleResult,
    pub rating_delta: i32,
}
