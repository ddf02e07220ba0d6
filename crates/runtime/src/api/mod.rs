//! The types downstream clients interact with.

mod errors;
mod handle;
mod views;

pub use errors::{ArenaError, ErrorKind, RepositoryError, Result};
pub use handle::ArenaHandle;
pub use views::{
    BattleBrief, BattleReport, CrateOpening, EnqueueOutcome, InventoryView, KeyPurchase,
    LeaderboardMode, LeaderboardRow, ProfileView, StatAllocation,
};
