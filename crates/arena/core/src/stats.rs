//! Allocatable combatant attributes.
//!
//! A [`StatBlock`] is both the stored per-player attribute triple and the
//! immutable snapshot a battle is simulated from. Hit points and stamina are
//! derived at battle start and never stored here.

use strum::{Display, EnumString};

/// The three allocatable attributes that define a combatant.
///
/// New players start at 5/5/5. Each point is bought with exactly one skill
/// point via [`crate::progression::spend_skill_point`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    /// Physical power; scales Strike damage.
    pub strength: u32,
    /// Reflexes; scales Dash damage and dodge chance.
    pub agility: u32,
    /// Focus; scales Focus damage and crit chance.
    pub intellect: u32,
}

/// Attribute value every new player starts with, per stat.
pub const BASE_STAT: u32 = 5;

impl StatBlock {
    pub const fn new(strength: u32, agility: u32, intellect: u32) -> Self {
        Self {
            strength,
            agility,
            intellect,
        }
    }

    /// Read a single attribute by kind.
    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Agility => self.agility,
            StatKind::Intellect => self.intellect,
        }
    }

    /// Bump a single attribute by one point.
    ///
    /// Callers go through the skill-point spend; this never validates
    /// affordability on its own.
    pub fn raise(&mut self, kind: StatKind) {
        match kind {
            StatKind::Strength => self.strength += 1,
            StatKind::Agility => self.agility += 1,
            StatKind::Intellect => self.intellect += 1,
        }
    }
}

impl Default for StatBlock {
    /// Starting attributes for a fresh player.
    fn default() -> Self {
        Self::new(BASE_STAT, BASE_STAT, BASE_STAT)
    }
}

/// Names one of the three allocatable attributes.
///
/// Parses from both the short wire names (`str`, `agi`, `int`) and the full
/// spellings; an unknown name is the caller's error, not a lenient default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum StatKind {
    #[strum(serialize = "str", serialize = "strength")]
    Strength,
    #[strum(serialize = "agi", serialize = "agility")]
    Agility,
    #[strum(serialize = "int", serialize = "intellect")]
    Intellect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_block_starts_at_base() {
        let block = StatBlock::default();
        assert_eq!(block, StatBlock::new(5, 5, 5));
    }

    #[test]
    fn raise_touches_exactly_one_stat() {
        let mut block = StatBlock::default();
        block.raise(StatKind::Agility);
        assert_eq!(block, StatBlock::new(5, 6, 5));
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("str".parse::<StatKind>().unwrap(), StatKind::Strength);
        assert_eq!("AGI".parse::<StatKind>().unwrap(), StatKind::Agility);
        assert_eq!("intellect".parse::<StatKind>().unwrap(), StatKind::Intellect);
        assert!("luck".parse::<StatKind>().is_err());
    }
}
