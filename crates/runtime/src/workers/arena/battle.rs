//! Matchmaking and battle resolution paths of the arena worker.

use chrono::Utc;
use tracing::{debug, info, warn};

use arena_core::{BattleResult, BattleRewards, MAX_ROUNDS, Move, rating_delta, resolve_battle};

use crate::api::{ArenaError, BattleBrief, BattleReport, EnqueueOutcome, Result};
use crate::events::{Event, MatchEvent, ProfileEvent};
use crate::types::{
    HistoryEntry, MatchId, MatchRecord, OpponentSnapshot, Principal, SettledOutcome, UserId,
    UserRecord,
};

use super::ArenaWorker;

impl ArenaWorker {
    /// Join the waiting set, pairing with the longest-waiting other user if
    /// one is there.
    ///
    /// A pending match short-circuits the queue entirely: the caller gets the
    /// same match back instead of a second unresolved one. Pairing freezes
    /// the partner's snapshot and seed in the same command, so a partner stat
    /// change can never race the match record.
    pub(super) fn enqueue(&self, principal: &Principal) -> Result<EnqueueOutcome> {
        let user = self.authorize(principal)?;

        if let Some(pending) = self.stores.matches.active_for(user.id)? {
            debug!(
                target: "arena::worker",
                user = %user.id,
                match_id = %pending,
                "enqueue reused the pending match"
            );
            return Ok(EnqueueOutcome {
                matched: true,
                match_id: Some(pending),
            });
        }

        if user.energy == 0 {
            debug!(target: "arena::worker", user = %user.id, "enqueue rejected, no energy");
            return Err(ArenaError::NoEnergy);
        }

        let Some(partner_id) = self.stores.queue.enqueue_or_pair(user.id)? else {
            self.events.publish(Event::Match(MatchEvent::Queued { user: user.id }));
            return Ok(EnqueueOutcome {
                matched: false,
                match_id: None,
            });
        };

        let Some(partner) = self.stores.users.get(partner_id)? else {
            // The waiting id no longer resolves to a record; leave the caller
            // unmatched and let the next poll re-queue them.
            warn!(
                target: "arena::worker",
                user = %user.id,
                partner = %partner_id,
                "queued partner has no user record"
            );
            return Ok(EnqueueOutcome {
                matched: false,
                match_id: None,
            });
        };

        let record = self.open_match(
            &user,
            OpponentSnapshot::of_user(&partner),
            Some(partner_id),
        )?;
        info!(
            target: "arena::worker",
            user = %user.id,
            opponent = %partner_id,
            match_id = %record.id,
            "queue pair formed"
        );
        self.events.publish(Event::Match(MatchEvent::Paired {
            user: user.id,
            opponent: partner_id,
            match_id: record.id,
        }));

        Ok(EnqueueOutcome {
            matched: true,
            match_id: Some(record.id),
        })
    }

    /// Hand the caller their pending match, or open a drone match if none is
    /// pending.
    pub(super) fn start_battle(&self, principal: &Principal) -> Result<BattleBrief> {
        let user = self.authorize(principal)?;

        if let Some(pending) = self.stores.matches.active_for(user.id)? {
            if let Some(record) = self.stores.matches.get(pending)? {
                return Ok(BattleBrief {
                    match_id: record.id,
                    opponent: record.opponent,
                    seed: record.seed,
                });
            }
            warn!(
                target: "arena::worker",
                user = %user.id,
                match_id = %pending,
                "active pointer references a missing match, replacing"
            );
        }

        if user.energy == 0 {
            debug!(target: "arena::worker", user = %user.id, "battle start rejected, no energy");
            return Err(ArenaError::NoEnergy);
        }

        let record = self.open_match(&user, OpponentSnapshot::drone(&user), None)?;
        info!(
            target: "arena::worker",
            user = %user.id,
            match_id = %record.id,
            "drone match opened"
        );
        self.events.publish(Event::Match(MatchEvent::Started {
            user: user.id,
            match_id: record.id,
        }));

        Ok(BattleBrief {
            match_id: record.id,
            opponent: record.opponent,
            seed: record.seed,
        })
    }

    /// Settle a match: replay the seeded simulation and apply rating,
    /// rewards, energy, and history exactly once.
    ///
    /// A match that is already settled returns its stored outcome unchanged,
    /// so re-sending the resolve request is always safe.
    pub(super) fn resolve_battle(
        &self,
        principal: &Principal,
        match_id: MatchId,
        raw_moves: &[String],
    ) -> Result<BattleReport> {
        let mut user = self.authorize(principal)?;

        let mut record = self
            .stores
            .matches
            .get(match_id)?
            .filter(|record| record.owner == user.id)
            .ok_or(ArenaError::MatchNotFound(match_id))?;

        if let Some(outcome) = record.outcome.clone() {
            debug!(
                target: "arena::worker",
                user = %user.id,
                match_id = %match_id,
                "match already settled, returning stored outcome"
            );
            return Ok(Self::replayed_report(&user, outcome));
        }

        // Unknown move names intentionally fall back to the default instead
        // of failing the whole battle.
        let moves: Vec<Move> = raw_moves
            .iter()
            .take(MAX_ROUNDS)
            .map(|raw| raw.trim().parse().unwrap_or_default())
            .collect();

        let outcome = resolve_battle(record.seed, &user.stats, &record.opponent.stats, &moves);

        let rating_before = user.rating;
        let delta = rating_delta(
            rating_before,
            record.opponent.rating,
            user.progression.level,
            outcome.result,
        );
        user.rating += delta;

        // Two-sided update: a real paired opponent is scored from their own
        // perspective against the same frozen ratings. Drones have no record
        // to adjust.
        if let Some(partner_id) = record.opponent_user {
            self.settle_partner_rating(
                partner_id,
                record.opponent.rating,
                rating_before,
                outcome.result,
            )?;
        }

        let rewards = BattleRewards::for_result(outcome.result);
        user.coins += u64::from(rewards.coins);
        user.battle_score += u64::from(rewards.score);
        let levels_gained = user.progression.grant_experience(rewards.xp);
        user.energy = user.energy.saturating_sub(1);
        self.stores.users.put(&user)?;

        record.resolved = true;
        record.outcome = Some(SettledOutcome {
            result: outcome.result,
            rating_delta: delta,
            log: outcome.log.clone(),
            user_final: outcome.user,
            opponent_final: outcome.opponent,
        });
        self.stores.matches.put(&record)?;

        self.stores.history.append(
            user.id,
            HistoryEntry {
                at: Utc::now(),
                opponent: record.opponent.clone(),
                result: outcome.result,
                rating_delta: delta,
            },
        )?;
        self.stores.matches.clear_active(user.id)?;

        info!(
            target: "arena::worker",
            user = %user.id,
            match_id = %match_id,
            result = %outcome.result,
            rating_delta = delta,
            "match resolved"
        );
        self.events.publish(Event::Match(MatchEvent::Resolved {
            user: user.id,
            match_id,
            result: outcome.result,
            rating_delta: delta,
        }));
        if levels_gained > 0 {
            self.events.publish(Event::Profile(ProfileEvent::LevelUp {
                user: user.id,
                level: user.progression.level,
            }));
        }

        Ok(BattleReport {
            result: outcome.result,
            log: outcome.log,
            user_final: outcome.user,
            opponent_final: outcome.opponent,
            reward_coins: rewards.coins,
            xp_gain: rewards.xp,
            rating_delta: delta,
            battle_score: user.battle_score,
            level: user.progression.level,
            skill_points: user.progression.skill_points,
            replayed: false,
        })
    }

    /// Register a fresh match with a random seed and id, and point the owner
    /// at it.
    fn open_match(
        &self,
        owner: &UserRecord,
        opponent: OpponentSnapshot,
        opponent_user: Option<UserId>,
    ) -> Result<MatchRecord> {
        let record = MatchRecord::open(
            MatchId(rand::random()),
            owner.id,
            opponent,
            opponent_user,
            rand::random(),
        );
        self.stores.matches.insert(&record)?;
        self.stores.matches.set_active(owner.id, record.id)?;
        Ok(record)
    }

    /// Apply the mirrored rating delta to a paired human opponent.
    fn settle_partner_rating(
        &self,
        partner_id: UserId,
        frozen_rating: i32,
        owner_rating: i32,
        result: BattleResult,
    ) -> Result<()> {
        let Some(mut partner) = self.stores.users.get(partner_id)? else {
            warn!(
                target: "arena::worker",
                partner = %partner_id,
                "paired opponent vanished before rating settlement"
            );
            return Ok(());
        };

        let delta = rating_delta(
            frozen_rating,
            owner_rating,
            partner.progression.level,
            result.inverse(),
        );
        partner.rating += delta;
        self.stores.users.put(&partner)?;
        debug!(
            target: "arena::worker",
            partner = %partner_id,
            rating_delta = delta,
            "partner rating settled"
        );
        Ok(())
    }

    /// Rebuild a report for an already-settled match from its stored outcome.
    fn replayed_report(user: &UserRecord, outcome: SettledOutcome) -> BattleReport {
        let rewards = BattleRewards::for_result(outcome.result);
        BattleReport {
            result: outcome.result,
            log: outcome.log,
            user_final: outcome.user_final,
            opponent_final: outcome.opponent_final,
            reward_coins: rewards.coins,
            xp_gain: rewards.xp,
            rating_delta: outcome.rating_delta,
            battle_score: user.battle_score,
            level: user.progression.level,
            skill_points: user.progression.skill_points,
            replayed: true,
        }
    }
}
