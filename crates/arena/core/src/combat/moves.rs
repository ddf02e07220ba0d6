//! Move kinds and their static properties.

use strum::{Display, EnumString};

use crate::rng::Lcg32;
use crate::stats::StatKind;

/// One of the three combat moves a side commits to for a round.
///
/// The kinds form a rock-paper-scissors cycle: Strike beats Dash, Dash beats
/// Focus, Focus beats Strike. Clients send moves as plain strings; anything
/// unrecognized falls back to [`Move::Strike`] rather than failing the
/// battle, so parse with `raw.parse().unwrap_or_default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Move {
    /// Raw melee hit, scales with strength. The lenient default.
    #[default]
    Strike,
    /// Quick reposition attack, scales with agility.
    Dash,
    /// Concentrated mental burst, scales with intellect.
    Focus,
}

impl Move {
    /// Whether this move wins the type matchup against `other`.
    pub const fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Strike, Move::Dash) | (Move::Dash, Move::Focus) | (Move::Focus, Move::Strike)
        )
    }

    /// The attribute that scales this move's base damage.
    pub const fn scaling_stat(self) -> StatKind {
        match self {
            Move::Strike => StatKind::Strength,
            Move::Dash => StatKind::Agility,
            Move::Focus => StatKind::Intellect,
        }
    }

    /// Stamina spent when committing to this move.
    pub const fn stamina_cost(self) -> i32 {
        match self {
            Move::Strike => 8,
            Move::Dash => 6,
            Move::Focus => 7,
        }
    }

    /// Draw a uniformly random move from the battle stream.
    ///
    /// This is how the non-strategic opponent picks each round; it consumes
    /// exactly one stream value.
    pub fn draw(rng: &mut Lcg32) -> Self {
        match rng.next_index(3) {
            0 => Move::Strike,
            1 => Move::Dash,
            _ => Move::Focus,
        }
    }
}
