//! Runtime orchestration for the battle and matchmaking engine.
//!
//! This crate wires the deterministic rules from `arena-core` to injected
//! storage, a matchmaking queue, and a match registry, behind one background
//! worker task. Consumers embed [`Arena`] to spawn the engine and interact
//! with it through [`ArenaHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] holds the storage contracts and in-memory stores
//! - [`types`] defines the persisted record shapes
//! - workers stay internal to the crate

pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod types;

mod workers;

pub use api::{
    ArenaError, ArenaHandle, BattleBrief, BattleReport, CrateOpening, EnqueueOutcome, ErrorKind,
    InventoryView, KeyPurchase, LeaderboardMode, LeaderboardRow, ProfileView, Result,
    StatAllocation,
};
pub use events::{Event, EventBus, LootEvent, MatchEvent, ProfileEvent, Topic};
pub use repository::{
    HistoryStore, InMemoryHistoryStore, InMemoryMatchStore, InMemoryQueueStore, InMemoryUserStore,
    MatchStore, QueueStore, RepositoryError, StoreSet, UserStore,
};
pub use runtime::{Arena, ArenaBuilder, ArenaConfig};
pub use types::{
    Cosmetic, HISTORY_CAP, HistoryEntry, InventoryEntry, LEADERBOARD_CAP, MatchId, MatchRecord,
    OpponentSnapshot, Principal, STARTING_ENERGY, SettledOutcome, UserId, UserRecord,
};
