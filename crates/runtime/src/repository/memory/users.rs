//! In-memory UserStore implementation for tests and single-process runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, UserStore};
use crate::types::{Principal, UserId, UserRecord};

#[derive(Default)]
struct UserTable {
    users: HashMap<UserId, UserRecord>,
    by_external: HashMap<u64, UserId>,
    next_id: u64,
}

/// In-memory implementation of [`UserStore`].
#[derive(Default)]
pub struct InMemoryUserStore {
    inner: RwLock<UserTable>,
}

impl InMemoryUserStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn ensure(&self, principal: &Principal) -> Result<UserRecord> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if let Some(id) = table.by_external.get(&principal.external_id).copied() {
            if let Some(user) = table.users.get(&id) {
                return Ok(user.clone());
            }
        }

        table.next_id += 1;
        let id = UserId(table.next_id);
        let user = UserRecord::new(id, principal);
        table.by_external.insert(principal.external_id, id);
        table.users.insert(id, user.clone());
        Ok(user)
    }

    fn get(&self, id: UserId) -> Result<Option<UserRecord>> {
        let table = self
            .inner
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.users.get(&id).cloned())
    }

    fn put(&self, user: &UserRecord) -> Result<()> {
        let mut table = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.by_external.insert(user.external_id, user.id);
        table.users.insert(user.id, user.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<UserRecord>> {
        let table = self
            .inner
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.users.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(external_id: u64) -> Principal {
        Principal {
            external_id,
            username: Some(format!("player{external_id}")),
            ..Principal::default()
        }
    }

    #[test]
    fn ensure_is_idempotent_per_principal() {
        let store = InMemoryUserStore::new();
        let first = store.ensure(&principal(77)).unwrap();
        let second = store.ensure(&principal(77)).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn distinct_principals_get_distinct_ids() {
        let store = InMemoryUserStore::new();
        let a = store.ensure(&principal(1)).unwrap();
        let b = store.ensure(&principal(2)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn put_overwrites_in_place() {
        let store = InMemoryUserStore::new();
        let mut user = store.ensure(&principal(5)).unwrap();
        user.coins = 42;
        store.put(&user).unwrap();
        assert_eq!(store.get(user.id).unwrap().unwrap().coins, 42);
    }
}
