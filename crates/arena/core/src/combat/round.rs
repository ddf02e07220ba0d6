//! Single-round damage resolution.
//!
//! Both sides act simultaneously each round. Damage is computed as floats and
//! rounded once, after every multiplier (crit, type advantage, stamina
//! shortfall) has been applied. The four chance checks consume stream values
//! in a fixed order (user crit, opponent dodge, opponent crit, user dodge),
//! which is what makes a battle replayable from its seed.

use crate::rng::Lcg32;
use crate::stats::StatBlock;

use super::moves::Move;

/// Flat damage every move starts from, before stat scaling.
pub const BASE_DAMAGE: f64 = 10.0;

/// Damage added per point of the move's scaling attribute.
pub const STAT_SCALE: f64 = 1.2;

/// Crit multiplier applied to un-dodged damage.
pub const CRIT_MULTIPLIER: f64 = 1.7;

/// Multiplier when the attacker's move type beats the defender's.
pub const ADVANTAGE_MULTIPLIER: f64 = 1.12;

/// Outgoing damage multiplier when stamina cannot cover the move's cost.
pub const EXHAUSTED_MULTIPLIER: f64 = 0.5;

/// Chance gained per point of intellect (crit) or agility (dodge).
pub const CHANCE_PER_POINT: f64 = 0.01;

/// Floor for both crit and dodge chance.
pub const CHANCE_FLOOR: f64 = 0.05;

/// Cap for both crit and dodge chance.
pub const CHANCE_CAP: f64 = 0.5;

/// Critical-hit chance for a stat block: `0.05 + intellect × 0.01`, clamped
/// to `[0.05, 0.5]`.
pub fn crit_chance(stats: &StatBlock) -> f64 {
    (CHANCE_FLOOR + f64::from(stats.intellect) * CHANCE_PER_POINT).clamp(CHANCE_FLOOR, CHANCE_CAP)
}

/// Dodge chance for a stat block: `0.05 + agility × 0.01`, clamped to
/// `[0.05, 0.5]`.
pub fn dodge_chance(stats: &StatBlock) -> f64 {
    (CHANCE_FLOOR + f64::from(stats.agility) * CHANCE_PER_POINT).clamp(CHANCE_FLOOR, CHANCE_CAP)
}

/// Live meters of one side during simulation.
///
/// HP and stamina are plain `i32` on purpose: both may go negative and are
/// never clamped, and the final raw values decide the result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Combatant {
    pub stats: StatBlock,
    pub hp: i32,
    pub stamina: i32,
}

impl Combatant {
    pub fn fresh(stats: StatBlock, hp: i32, stamina: i32) -> Self {
        Self { stats, hp, stamina }
    }
}

/// Everything recorded about one simulated round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundEntry {
    /// 1-based round index.
    pub round: u8,
    pub user_move: Move,
    pub opponent_move: Move,
    /// Damage the user dealt this round (0 when dodged).
    pub user_damage: i32,
    /// Damage the opponent dealt this round (0 when dodged).
    pub opponent_damage: i32,
    pub user_crit: bool,
    /// The opponent dodged the user's attack.
    pub opponent_dodged: bool,
    pub opponent_crit: bool,
    /// The user dodged the opponent's attack.
    pub user_dodged: bool,
    pub user_stamina_cost: i32,
    pub opponent_stamina_cost: i32,
    /// User HP after this round's damage was applied.
    pub user_hp: i32,
    /// Opponent HP after this round's damage was applied.
    pub opponent_hp: i32,
}

/// Resolve one round and mutate both combatants.
///
/// Draw order from the stream: user crit, opponent dodge, opponent crit,
/// user dodge. The stamina-shortfall check reads the meters *before* this
/// round's costs are subtracted.
pub(crate) fn play_round(
    index: u8,
    user: &mut Combatant,
    opponent: &mut Combatant,
    user_move: Move,
    opponent_move: Move,
    rng: &mut Lcg32,
) -> RoundEntry {
    let mut user_damage =
        BASE_DAMAGE + f64::from(user.stats.get(user_move.scaling_stat())) * STAT_SCALE;
    let mut opponent_damage =
        BASE_DAMAGE + f64::from(opponent.stats.get(opponent_move.scaling_stat())) * STAT_SCALE;

    let user_crit = rng.next_f64() < crit_chance(&user.stats);
    let opponent_dodged = rng.next_f64() < dodge_chance(&opponent.stats);
    if opponent_dodged {
        user_damage = 0.0;
    } else if user_crit {
        user_damage *= CRIT_MULTIPLIER;
    }

    let opponent_crit = rng.next_f64() < crit_chance(&opponent.stats);
    let user_dodged = rng.next_f64() < dodge_chance(&user.stats);
    if user_dodged {
        opponent_damage = 0.0;
    } else if opponent_crit {
        opponent_damage *= CRIT_MULTIPLIER;
    }

    if user_move.beats(opponent_move) {
        user_damage *= ADVANTAGE_MULTIPLIER;
    }
    if opponent_move.beats(user_move) {
        opponent_damage *= ADVANTAGE_MULTIPLIER;
    }

    let user_cost = user_move.stamina_cost();
    let opponent_cost = opponent_move.stamina_cost();
    if user.stamina < user_cost {
        user_damage *= EXHAUSTED_MULTIPLIER;
    }
    if opponent.stamina < opponent_cost {
        opponent_damage *= EXHAUSTED_MULTIPLIER;
    }

    let user_damage = user_damage.round() as i32;
    let opponent_damage = opponent_damage.round() as i32;

    opponent.hp -= user_damage;
    user.hp -= opponent_damage;
    user.stamina -= user_cost;
    opponent.stamina -= opponent_cost;

    RoundEntry {
        round: index,
        user_move,
        opponent_move,
        user_damage,
        opponent_damage,
        user_crit,
        opponent_dodged,
        opponent_crit,
        user_dodged,
        user_stamina_cost: user_cost,
        opponent_stamina_cost: opponent_cost,
        user_hp: user.hp,
        opponent_hp: opponent.hp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Recompute a side's expected damage from the flags the round logged.
    fn expected_damage(
        stats: &StatBlock,
        mv: Move,
        other_move: Move,
        crit: bool,
        dodged: bool,
        stamina_before: i32,
    ) -> i32 {
        let mut dmg = BASE_DAMAGE + f64::from(stats.get(mv.scaling_stat())) * STAT_SCALE;
        if dodged {
            dmg = 0.0;
        } else if crit {
            dmg *= CRIT_MULTIPLIER;
        }
        if mv.beats(other_move) {
            dmg *= ADVANTAGE_MULTIPLIER;
        }
        if stamina_before < mv.stamina_cost() {
            dmg *= EXHAUSTED_MULTIPLIER;
        }
        dmg.round() as i32
    }

    #[test]
    fn damage_matches_formula_for_many_seeds() {
        let strong = StatBlock::new(12, 3, 7);
        let nimble = StatBlock::new(4, 15, 9);

        for seed in 0..200 {
            let mut rng = Lcg32::new(seed);
            let mut user = Combatant::fresh(strong, 100, 30);
            let mut opponent = Combatant::fresh(nimble, 100, 30);

            let entry = play_round(1, &mut user, &mut opponent, Move::Strike, Move::Dash, &mut rng);

            assert_eq!(
                entry.user_damage,
                expected_damage(
                    &strong,
                    Move::Strike,
                    Move::Dash,
                    entry.user_crit,
                    entry.opponent_dodged,
                    30,
                )
            );
            assert_eq!(
                entry.opponent_damage,
                expected_damage(
                    &nimble,
                    Move::Dash,
                    Move::Strike,
                    entry.opponent_crit,
                    entry.user_dodged,
                    30,
                )
            );
            assert_eq!(entry.user_hp, 100 - entry.opponent_damage);
            assert_eq!(entry.opponent_hp, 100 - entry.user_damage);
            assert_eq!(user.stamina, 30 - Move::Strike.stamina_cost());
            assert_eq!(opponent.stamina, 30 - Move::Dash.stamina_cost());
        }
    }

    #[test]
    fn exhausted_side_hits_for_half() {
        let stats = StatBlock::new(10, 0, 0);

        for seed in 0..50 {
            let mut rng = Lcg32::new(seed);
            let mut tired = Combatant::fresh(stats, 100, 0);
            let mut rested = Combatant::fresh(stats, 100, 30);

            let entry = play_round(1, &mut tired, &mut rested, Move::Strike, Move::Strike, &mut rng);

            assert_eq!(
                entry.user_damage,
                expected_damage(
                    &stats,
                    Move::Strike,
                    Move::Strike,
                    entry.user_crit,
                    entry.opponent_dodged,
                    0,
                )
            );
            // stamina keeps draining below zero, only gating the multiplier
            assert_eq!(tired.stamina, -Move::Strike.stamina_cost());
        }
    }

    #[test]
    fn chances_clamp_to_floor_and_cap() {
        let zeroed = StatBlock::new(0, 0, 0);
        assert_eq!(crit_chance(&zeroed), CHANCE_FLOOR);
        assert_eq!(dodge_chance(&zeroed), CHANCE_FLOOR);

        let maxed = StatBlock::new(0, 200, 200);
        assert_eq!(crit_chance(&maxed), CHANCE_CAP);
        assert_eq!(dodge_chance(&maxed), CHANCE_CAP);

        let mid = StatBlock::new(0, 20, 10);
        assert_eq!(crit_chance(&mid), 0.05 + 0.10);
        assert_eq!(dodge_chance(&mid), 0.05 + 0.20);
    }
}
