//! In-memory MatchStore implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{MatchStore, RepositoryError, Result};
use crate::types::{MatchId, MatchRecord, UserId};

#[derive(Default)]
struct MatchTable {
    matches: HashMap<MatchId, MatchRecord>,
    active: HashMap<UserId, MatchId>,
}

/// In-memory implementation of [`MatchStore`].
#[derive(Default)]
pub struct InMemoryMatchStore {
    inner: RwLock<MatchTable>,
}

impl InMemoryMatchStore {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn insert(&self, record: &MatchRecord) -> Result<()> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.matches.insert(record.id, record.clone());
        Ok(())
    }

    fn get(&self, id: MatchId) -> Result<Option<MatchRecord>> {
        let table = self
            .inner
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.matches.get(&id).cloned())
    }

    fn put(&self, record: &MatchRecord) -> Result<()> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.matches.insert(record.id, record.clone());
        Ok(())
    }

    fn active_for(&self, user: UserId) -> Result<Option<MatchId>> {
        let table = self
            .inner
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.active.get(&user).copied())
    }

    fn set_active(&self, user: UserId, id: MatchId) -> Result<()> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.active.insert(user, id);
        Ok(())
    }

    fn clear_active(&self, user: UserId) -> Result<()> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.active.remove(&user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OpponentSnapshot;
    use arena_core::StatBlock;

    fn record(id: u64, owner: u64) -> MatchRecord {
        MatchRecord::open(
            MatchId(id),
            UserId(owner),
            OpponentSnapshot {
                name: "Drone".into(),
                stats: StatBlock::default(),
                rating: 1000,
            },
            None,
            7,
        )
    }

    #[test]
    fn insert_then_get_round_trips() {
        let store = InMemoryMatchStore::new();
        let m = record(1, 10);
        store.insert(&m).unwrap();
        assert_eq!(store.get(MatchId(1)).unwrap().unwrap(), m);
        assert!(store.get(MatchId(2)).unwrap().is_none());
    }

    #[test]
    fn active_pointer_lifecycle() {
        let store = InMemoryMatchStore::new();
        let user = UserId(3);
        assert!(store.active_for(user).unwrap().is_none());

        store.set_active(user, MatchId(9)).unwrap();
        assert_eq!(store.active_for(user).unwrap(), Some(MatchId(9)));

        store.clear_active(user).unwrap();
        assert!(store.active_for(user).unwrap().is_none());
    }
}
