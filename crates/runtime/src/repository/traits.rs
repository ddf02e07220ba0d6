//! Store contracts for the arena's mutable state.
//!
//! Everything the engine persists goes through these traits, so the worker
//! never assumes a storage technology. The in-memory implementations under
//! [`super::memory`] back tests and single-process deployments; a durable
//! backend implements the same contracts. None of them may assume
//! recovery-on-restart exists.

use crate::repository::Result;
use crate::types::{HistoryEntry, MatchId, MatchRecord, Principal, UserId, UserRecord};

/// Store for user records.
///
/// Users are keyed internally by [`UserId`] but arrive as external
/// principals; `ensure` is the single create-on-first-touch path.
pub trait UserStore: Send + Sync {
    /// Fetch the record for a principal, creating a fresh account on first
    /// touch.
    fn ensure(&self, principal: &Principal) -> Result<UserRecord>;

    /// Load a user by internal id.
    fn get(&self, id: UserId) -> Result<Option<UserRecord>>;

    /// Write back a full record.
    fn put(&self, user: &UserRecord) -> Result<()>;

    /// Snapshot every record (leaderboard queries).
    fn list(&self) -> Result<Vec<UserRecord>>;
}

/// Match registry: match records plus the per-user active-match pointer.
///
/// The pointer enforces at-most-one unresolved match per user: callers
/// must consult it before inserting a new match for the same owner.
pub trait MatchStore: Send + Sync {
    /// Register a newly created match.
    fn insert(&self, record: &MatchRecord) -> Result<()>;

    /// Load a match by id.
    fn get(&self, id: MatchId) -> Result<Option<MatchRecord>>;

    /// Write back a full record (the resolve transition).
    fn put(&self, record: &MatchRecord) -> Result<()>;

    /// The user's pending match, if any.
    fn active_for(&self, user: UserId) -> Result<Option<MatchId>>;

    /// Point the user at their pending match.
    fn set_active(&self, user: UserId, id: MatchId) -> Result<()>;

    /// Drop the user's pending-match pointer.
    fn clear_active(&self, user: UserId) -> Result<()>;
}

/// First-come waiting set for matchmaking.
pub trait QueueStore: Send + Sync {
    /// Add the caller to the waiting set, or pair them with the
    /// longest-waiting other user.
    ///
    /// Returns the partner when a pair was formed; both ids leave the set
    /// in the same call. Re-enqueueing while already waiting is a no-op, and
    /// a user is never paired with themselves.
    fn enqueue_or_pair(&self, user: UserId) -> Result<Option<UserId>>;

    /// Number of users currently waiting.
    fn waiting(&self) -> Result<usize>;
}

/// Append-only, capped per-user battle history.
pub trait HistoryStore: Send + Sync {
    /// Prepend an entry, evicting the oldest past [`crate::types::HISTORY_CAP`].
    fn append(&self, user: UserId, entry: HistoryEntry) -> Result<()>;

    /// Entries newest first, at most the cap.
    fn list(&self, user: UserId) -> Result<Vec<HistoryEntry>>;
}
