//! In-memory battle history.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{HistoryStore, RepositoryError, Result};
use crate::types::{HISTORY_CAP, HistoryEntry, UserId};

/// In-memory implementation of [`HistoryStore`].
///
/// Keeps the newest [`HISTORY_CAP`] entries per user, newest first.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    entries: RwLock<HashMap<UserId, Vec<HistoryEntry>>>,
}

impl InMemoryHistoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&self, user: UserId, entry: HistoryEntry) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let log = entries.entry(user).or_default();
        log.insert(0, entry);
        log.truncate(HISTORY_CAP);
        Ok(())
    }

    fn list(&self, user: UserId) -> Result<Vec<HistoryEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.get(&user).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OpponentSnapshot;
    use arena_core::{BattleResult, StatBlock};
    use chrono::Utc;

    fn entry(delta: i32) -> HistoryEntry {
        HistoryEntry {
            at: Utc::now(),
            opponent: OpponentSnapshot {
                name: "Drone".into(),
                stats: StatBlock::default(),
                rating: 1000,
            },
            result: BattleResult::Win,
            rating_delta: delta,
        }
    }

    #[test]
    fn newest_entry_comes_first() {
        let store = InMemoryHistoryStore::new();
        store.append(UserId(1), entry(1)).unwrap();
        store.append(UserId(1), entry(2)).unwrap();

        let log = store.list(UserId(1)).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].rating_delta, 2);
        assert_eq!(log[1].rating_delta, 1);
    }

    #[test]
    fn history_is_capped() {
        let store = InMemoryHistoryStore::new();
        for i in 0..(HISTORY_CAP as i32 + 5) {
            store.append(UserId(1), entry(i)).unwrap();
        }

        let log = store.list(UserId(1)).unwrap();
        assert_eq!(log.len(), HISTORY_CAP);
        // the oldest five fell off the end
        assert_eq!(log[0].rating_delta, HISTORY_CAP as i32 + 4);
        assert_eq!(log.last().unwrap().rating_delta, 5);
    }

    #[test]
    fn users_do_not_share_history() {
        let store = InMemoryHistoryStore::new();
        store.append(UserId(1), entry(1)).unwrap();
        assert!(store.list(UserId(2)).unwrap().is_empty());
    }
}
