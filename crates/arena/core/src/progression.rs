//! Experience, levels, skill points, and battle rewards.
//!
//! Leveling is threshold-based: a level-up costs `100 × current level` XP,
//! the counter resets by that amount, and each level grants two skill
//! points. One reward grant can cross several levels.

use thiserror::Error;

use crate::combat::BattleResult;
use crate::stats::{StatBlock, StatKind};

/// XP needed per level, multiplied by the current level.
pub const XP_LEVEL_STEP: u32 = 100;

/// Skill points granted on each level-up.
pub const SKILL_POINTS_PER_LEVEL: u32 = 2;

/// Per-user progression counters.
///
/// `level` is monotonically non-decreasing and `experience` always sits
/// below the current level's threshold between grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    pub experience: u32,
    pub level: u32,
    pub skill_points: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            skill_points: 0,
        }
    }
}

impl Progression {
    /// XP threshold that triggers the next level-up.
    pub const fn next_level_at(&self) -> u32 {
        XP_LEVEL_STEP * self.level
    }

    /// Add battle XP and cascade any level-ups.
    ///
    /// Returns the number of levels gained (zero most of the time).
    pub fn grant_experience(&mut self, xp: u32) -> u32 {
        self.experience += xp;
        let mut gained = 0;
        while self.experience >= self.next_level_at() {
            self.experience -= self.next_level_at();
            self.level += 1;
            self.skill_points += SKILL_POINTS_PER_LEVEL;
            gained += 1;
        }
        gained
    }
}

/// What one resolved battle pays out, keyed by result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRewards {
    pub coins: u32,
    pub xp: u32,
    /// Added to the cumulative battle score.
    pub score: u32,
}

impl BattleRewards {
    pub const fn for_result(result: BattleResult) -> Self {
        match result {
            BattleResult::Win => Self {
                coins: 10,
                xp: 20,
                score: 10,
            },
            BattleResult::Draw => Self {
                coins: 5,
                xp: 12,
                score: 5,
            },
            BattleResult::Lose => Self {
                coins: 3,
                xp: 8,
                score: 3,
            },
        }
    }
}

/// Errors from the skill-point spend path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("no skill points available to spend")]
    NoSkillPoints,
}

/// Spend one skill point to raise one attribute by one point.
///
/// This is the only legal way an allocatable stat goes up.
pub fn spend_skill_point(
    progression: &mut Progression,
    stats: &mut StatBlock,
    kind: StatKind,
) -> Result<(), ProgressionError> {
    if progression.skill_points == 0 {
        return Err(ProgressionError::NoSkillPoints);
    }
    progression.skill_points -= 1;
    stats.raise(kind);
    Ok(())
}
