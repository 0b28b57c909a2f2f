//! Placement representation and move history.
//!
//! A placement is the only action a player can take: add one orb to a cell.
//! Every accepted placement is recorded with the turn it opened so a game can
//! be replayed from an empty board.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// A single orb placement.
///
/// ```
/// use chain_reaction::{Placement, Player};
///
/// let placement = Placement::new(Player::First, 12);
/// assert_eq!(placement.index, 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The mover.
    pub player: Player,

    /// Target cell index.
    pub index: usize,
}

impl Placement {
    /// Create a placement.
    #[must_use]
    pub const fn new(player: Player, index: usize) -> Self {
        Self { player, index }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.index)
    }
}

/// An accepted placement with history metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// The placement.
    pub placement: Placement,

    /// Turn counter value when the placement was accepted.
    pub turn: u32,
}

impl PlacementRecord {
    /// Create a new record.
    #[must_use]
    pub const fn new(placement: Placement, turn: u32) -> Self {
        Self { placement, turn }
    }
}
