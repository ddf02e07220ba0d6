//! Cloneable façade for issuing commands to the arena.
//!
//! [`ArenaHandle`] hides the channel plumbing: every method enqueues one
//! command for the worker and awaits its oneshot reply, so callers see plain
//! async functions while all mutations stay serialized behind the worker.

use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{ArenaError, Result};
use super::views::{
    BattleBrief, BattleReport, CrateOpening, EnqueueOutcome, InventoryView, KeyPurchase,
    LeaderboardMode, LeaderboardRow, ProfileView, StatAllocation,
};
use crate::events::{Event, EventBus, Topic};
use crate::types::{HistoryEntry, MatchId, Principal};
use crate::workers::Command;

/// Client-facing handle to interact with the arena.
#[derive(Clone)]
pub struct ArenaHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl ArenaHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Send one command and await its reply.
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| ArenaError::CommandChannelClosed)?;

        reply_rx.await.map_err(ArenaError::ReplyChannelClosed)?
    }

    /// Enter the matchmaking queue, pairing immediately when another user is
    /// already waiting.
    pub async fn enqueue(&self, principal: Principal) -> Result<EnqueueOutcome> {
        self.request(|reply| Command::Enqueue { principal, reply })
            .await
    }

    /// Fetch the pending match, or open a drone match when none is pending.
    pub async fn start_battle(&self, principal: Principal) -> Result<BattleBrief> {
        self.request(|reply| Command::StartBattle { principal, reply })
            .await
    }

    /// Submit move choices and settle a match.
    ///
    /// Moves are raw client strings; unknown names lenient-default rather
    /// than erroring. Re-resolving a settled match returns the stored
    /// outcome.
    pub async fn resolve_battle(
        &self,
        principal: Principal,
        match_id: MatchId,
        moves: Vec<String>,
    ) -> Result<BattleReport> {
        self.request(|reply| Command::ResolveBattle {
            principal,
            match_id,
            moves,
            reply,
        })
        .await
    }

    /// Current stats, progression, rating, scores, and economy counters.
    pub async fn profile(&self, principal: Principal) -> Result<ProfileView> {
        self.request(|reply| Command::Profile { principal, reply })
            .await
    }

    /// Spend one skill point on the named attribute (`str`/`agi`/`int` or
    /// full spellings).
    pub async fn upgrade(
        &self,
        principal: Principal,
        stat: impl Into<String>,
    ) -> Result<StatAllocation> {
        let stat = stat.into();
        self.request(|reply| Command::Upgrade {
            principal,
            stat,
            reply,
        })
        .await
    }

    /// Report an arcade score; returns the stored high-water mark.
    pub async fn submit_score(&self, principal: Principal, score: u64) -> Result<u64> {
        self.request(|reply| Command::SubmitScore {
            principal,
            score,
            reply,
        })
        .await
    }

    /// The caller's battle history, newest first.
    pub async fn history(&self, principal: Principal) -> Result<Vec<HistoryEntry>> {
        self.request(|reply| Command::History { principal, reply })
            .await
    }

    /// Public top list, ranked by the requested mode.
    pub async fn leaderboard(&self, mode: LeaderboardMode) -> Result<Vec<LeaderboardRow>> {
        self.request(|reply| Command::Leaderboard { mode, reply })
            .await
    }

    /// Keys and cosmetics the caller owns.
    pub async fn inventory(&self, principal: Principal) -> Result<InventoryView> {
        self.request(|reply| Command::Inventory { principal, reply })
            .await
    }

    /// Buy one crate key.
    pub async fn buy_key(&self, principal: Principal) -> Result<KeyPurchase> {
        self.request(|reply| Command::BuyKey { principal, reply })
            .await
    }

    /// Spend one key on a weighted cosmetic draw.
    pub async fn open_crate(&self, principal: Principal) -> Result<CrateOpening> {
        self.request(|reply| Command::OpenCrate { principal, reply })
            .await
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
