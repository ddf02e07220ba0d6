//! Storage layer for the arena's mutable state.
//!
//! State is split by ownership: user records, the match registry (including
//! active-match pointers), transient queue membership, and capped history.
//! The worker only ever talks to the [`traits`] contracts, so swapping the
//! in-memory stores for a durable backend never touches the engine.

mod error;
mod memory;
mod traits;

use std::sync::Arc;

pub use error::{RepositoryError, Result};
pub use memory::{InMemoryHistoryStore, InMemoryMatchStore, InMemoryQueueStore, InMemoryUserStore};
pub use traits::{HistoryStore, MatchStore, QueueStore, UserStore};

/// The full set of stores the worker operates on.
///
/// Cloning is cheap (shared handles); the default wiring is fully in-memory.
#[derive(Clone)]
pub struct StoreSet {
    pub users: Arc<dyn UserStore>,
    pub matches: Arc<dyn MatchStore>,
    pub queue: Arc<dyn QueueStore>,
    pub history: Arc<dyn HistoryStore>,
}

impl StoreSet {
    /// In-memory wiring for tests and single-process deployments.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            matches: Arc::new(InMemoryMatchStore::new()),
            queue: Arc::new(InMemoryQueueStore::new()),
            history: Arc::new(InMemoryHistoryStore::new()),
        }
    }
}
