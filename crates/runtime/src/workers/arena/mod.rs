//! Arena worker that owns the authoritative game state.
//!
//! Receives commands from [`crate::api::ArenaHandle`], runs each one to
//! completion against the stores, and publishes lifecycle events. Because
//! every mutation funnels through this single task, read-modify-write
//! sequences (enqueue-and-pair, resolve-and-reward, skill-point spends)
//! can never interleave, no matter how many handles are cloned.

mod battle;
mod economy;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use arena_core::WeightedTable;

use crate::api::{
    ArenaError, BattleBrief, BattleReport, CrateOpening, EnqueueOutcome, InventoryView,
    KeyPurchase, LeaderboardMode, LeaderboardRow, ProfileView, Result, StatAllocation,
};
use crate::events::EventBus;
use crate::repository::StoreSet;
use crate::types::{Cosmetic, HistoryEntry, MatchId, Principal, UserRecord};

type Reply<T> = oneshot::Sender<Result<T>>;

/// Commands that can be sent to the arena worker.
pub enum Command {
    Enqueue {
        principal: Principal,
        reply: Reply<EnqueueOutcome>,
    },
    StartBattle {
        principal: Principal,
        reply: Reply<BattleBrief>,
    },
    ResolveBattle {
        principal: Principal,
        match_id: MatchId,
        moves: Vec<String>,
        reply: Reply<BattleReport>,
    },
    Profile {
        principal: Principal,
        reply: Reply<ProfileView>,
    },
    Upgrade {
        principal: Principal,
        stat: String,
        reply: Reply<StatAllocation>,
    },
    SubmitScore {
        principal: Principal,
        score: u64,
        reply: Reply<u64>,
    },
    History {
        principal: Principal,
        reply: Reply<Vec<HistoryEntry>>,
    },
    Leaderboard {
        mode: LeaderboardMode,
        reply: Reply<Vec<LeaderboardRow>>,
    },
    Inventory {
        principal: Principal,
        reply: Reply<InventoryView>,
    },
    BuyKey {
        principal: Principal,
        reply: Reply<KeyPurchase>,
    },
    OpenCrate {
        principal: Principal,
        reply: Reply<CrateOpening>,
    },
}

/// Background task that processes arena commands.
pub struct ArenaWorker {
    stores: StoreSet,
    command_rx: mpsc::Receiver<Command>,
    events: EventBus,
    loot: WeightedTable<Cosmetic>,
}

impl ArenaWorker {
    /// Creates a new arena worker.
    pub fn new(stores: StoreSet, command_rx: mpsc::Receiver<Command>, events: EventBus) -> Self {
        Self {
            stores,
            command_rx,
            events,
            loot: Self::loot_table(),
        }
    }

    /// Drop weights for the cosmetic crate pool.
    fn loot_table() -> WeightedTable<Cosmetic> {
        WeightedTable::new(vec![
            (Cosmetic::CrimsonShell, 5),
            (Cosmetic::AzureShell, 3),
            (Cosmetic::GildedShell, 1),
        ])
        .expect("static loot table is non-empty")
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
    }

    fn handle_command(&self, cmd: Command) {
        match cmd {
            Command::Enqueue { principal, reply } => {
                let _ = reply.send(self.enqueue(&principal));
            }
            Command::StartBattle { principal, reply } => {
                let _ = reply.send(self.start_battle(&principal));
            }
            Command::ResolveBattle {
                principal,
                match_id,
                moves,
                reply,
            } => {
                let _ = reply.send(self.resolve_battle(&principal, match_id, &moves));
            }
            Command::Profile { principal, reply } => {
                let _ = reply.send(self.profile(&principal));
            }
            Command::Upgrade {
                principal,
                stat,
                reply,
            } => {
                let _ = reply.send(self.upgrade(&principal, &stat));
            }
            Command::SubmitScore {
                principal,
                score,
                reply,
            } => {
                let _ = reply.send(self.submit_score(&principal, score));
            }
            Command::History { principal, reply } => {
                let _ = reply.send(self.history(&principal));
            }
            Command::Leaderboard { mode, reply } => {
                let _ = reply.send(self.leaderboard(mode));
            }
            Command::Inventory { principal, reply } => {
                let _ = reply.send(self.inventory(&principal));
            }
            Command::BuyKey { principal, reply } => {
                let _ = reply.send(self.buy_key(&principal));
            }
            Command::OpenCrate { principal, reply } => {
                let _ = reply.send(self.open_crate(&principal));
            }
        }
    }

    /// Resolve the caller's record, creating a fresh account on first touch.
    ///
    /// The principal arrives pre-verified from the auth boundary; the only
    /// identities rejected here are the anonymous zero principal and banned
    /// accounts.
    fn authorize(&self, principal: &Principal) -> Result<UserRecord> {
        if principal.is_anonymous() {
            return Err(ArenaError::Unauthenticated);
        }
        let user = self.stores.users.ensure(principal)?;
        if user.banned {
            debug!(target: "arena::worker", user = %user.id, "banned user rejected");
            return Err(ArenaError::Banned);
        }
        Ok(user)
    }
}
