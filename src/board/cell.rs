//! A single board cell: orb count plus owner.

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// One cell of the board.
///
/// A settled cell is owned exactly when it holds orbs. The engine always
/// writes `value` and `owner` together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Orb count.
    pub value: u32,

    /// Owning player, `None` when empty.
    pub owner: Option<Player>,
}

impl Cell {
    /// The empty, unowned cell.
    pub const EMPTY: Cell = Cell {
        value: 0,
        owner: None,
    };

    /// A cell holding `value` orbs of `owner`.
    #[must_use]
    pub const fn owned(owner: Player, value: u32) -> Self {
        Self {
            value,
            owner: Some(owner),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Whether `player` may place here: empty or already theirs.
    #[must_use]
    pub fn accepts(&self, player: Player) -> bool {
        self.owner.map_or(true, |owner| owner == player)
    }
}
