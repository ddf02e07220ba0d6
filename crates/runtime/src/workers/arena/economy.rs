//! Profile, progression-spend, score, and loot paths of the arena worker.

use tracing::{debug, info};

use arena_core::{Lcg32, StatKind, spend_skill_point};

use crate::api::{
    ArenaError, CrateOpening, InventoryView, KeyPurchase, LeaderboardMode, LeaderboardRow,
    ProfileView, Result, StatAllocation,
};
use crate::events::{Event, LootEvent, ProfileEvent};
use crate::types::{HistoryEntry, LEADERBOARD_CAP, Principal};

use super::ArenaWorker;

impl ArenaWorker {
    pub(super) fn profile(&self, principal: &Principal) -> Result<ProfileView> {
        let user = self.authorize(principal)?;
        Ok(ProfileView::of(&user))
    }

    /// Spend one skill point on a named attribute.
    pub(super) fn upgrade(&self, principal: &Principal, stat: &str) -> Result<StatAllocation> {
        let mut user = self.authorize(principal)?;

        let kind: StatKind = stat
            .trim()
            .parse()
            .map_err(|_| ArenaError::UnknownStat(stat.to_string()))?;
        spend_skill_point(&mut user.progression, &mut user.stats, kind)?;
        self.stores.users.put(&user)?;

        debug!(target: "arena::worker", user = %user.id, stat = %kind, "skill point spent");
        self.events.publish(Event::Profile(ProfileEvent::StatRaised {
            user: user.id,
            stat: kind,
        }));

        Ok(StatAllocation {
            stats: user.stats,
            skill_points: user.progression.skill_points,
        })
    }

    /// Record a client-reported arcade score; only a new high-water mark
    /// sticks.
    pub(super) fn submit_score(&self, principal: &Principal, score: u64) -> Result<u64> {
        let mut user = self.authorize(principal)?;

        if score > user.arcade_score {
            user.arcade_score = score;
            self.stores.users.put(&user)?;
            self.events
                .publish(Event::Profile(ProfileEvent::ScoreSubmitted {
                    user: user.id,
                    score,
                }));
        }

        Ok(user.arcade_score)
    }

    pub(super) fn history(&self, principal: &Principal) -> Result<Vec<HistoryEntry>> {
        let user = self.authorize(principal)?;
        Ok(self.stores.history.list(user.id)?)
    }

    /// Top players ranked by the requested column.
    ///
    /// Deliberately unauthenticated; the board is public.
    pub(super) fn leaderboard(&self, mode: LeaderboardMode) -> Result<Vec<LeaderboardRow>> {
        let mut users = self.stores.users.list()?;
        match mode {
            LeaderboardMode::Score => {
                users.sort_by(|a, b| b.arcade_score.cmp(&a.arcade_score));
            }
            LeaderboardMode::Rating => users.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }
        users.truncate(LEADERBOARD_CAP);
        Ok(users.iter().map(LeaderboardRow::of).collect())
    }

    pub(super) fn inventory(&self, principal: &Principal) -> Result<InventoryView> {
        let user = self.authorize(principal)?;
        Ok(InventoryView {
            crate_keys: user.crate_keys,
            items: user.inventory,
        })
    }

    pub(super) fn buy_key(&self, principal: &Principal) -> Result<KeyPurchase> {
        let mut user = self.authorize(principal)?;

        user.crate_keys += 1;
        self.stores.users.put(&user)?;

        self.events.publish(Event::Loot(LootEvent::KeyPurchased {
            user: user.id,
            crate_keys: user.crate_keys,
        }));

        Ok(KeyPurchase {
            crate_keys: user.crate_keys,
        })
    }

    /// Consume one key and draw a cosmetic from the weighted pool.
    pub(super) fn open_crate(&self, principal: &Principal) -> Result<CrateOpening> {
        let mut user = self.authorize(principal)?;

        if user.crate_keys == 0 {
            debug!(target: "arena::worker", user = %user.id, "crate open rejected, no keys");
            return Err(ArenaError::NoKeys);
        }
        user.crate_keys -= 1;

        let mut rng = Lcg32::new(rand::random());
        let gained = *self.loot.draw(&mut rng);
        user.grant_item(gained);
        self.stores.users.put(&user)?;

        info!(target: "arena::worker", user = %user.id, item = %gained, "crate opened");
        self.events.publish(Event::Loot(LootEvent::CrateOpened {
            user: user.id,
            item: gained,
        }));

        Ok(CrateOpening {
            gained,
            crate_keys: user.crate_keys,
            inventory: user.inventory,
        })
    }
}
