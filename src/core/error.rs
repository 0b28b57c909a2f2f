//! Engine errors.
//!
//! Every error is local and recoverable: a rejected operation never mutates
//! the game.

use derive_more::{Display, Error, From};

use super::player::Player;

/// Why a move or cascade step was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// The game has not entered its first turn.
    #[display("Game has not started")]
    NotStarted,

    /// A cascade is still resolving; input is locked.
    #[display("Input is locked while a cascade resolves")]
    InputLocked,

    /// The game is over.
    #[display("Game is already over")]
    GameOver,

    /// The caller is not the player to move.
    #[display("It is {expected}'s turn, not {actual}'s")]
    WrongPlayer { expected: Player, actual: Player },

    /// The target cell belongs to the opponent.
    #[display("Cell {index} is owned by {owner}")]
    OpponentCell { index: usize, owner: Player },

    /// A cascade step was requested with no cascade in flight.
    #[display("No cascade is resolving")]
    NotResolving,
}

/// Errors reported by the board and the reaction engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// Index outside `[0, width * height)`.
    #[display("Cell index {index} out of bounds for {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Recoverable rule violation; nothing was changed.
    #[display("Illegal move: {_0}")]
    #[from]
    IllegalMove(IllegalMove),

    /// Grid dimensions the engine cannot play on.
    #[display("Invalid grid {width}x{height}: both sides must be at least 2 and the cell count must fit in usize")]
    InvalidConfiguration { width: usize, height: usize },

    /// A board snapshot whose cell list does not cover its grid.
    #[display("Board has {actual} cells, its grid needs {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    /// A single cascade ran past the configured round limit.
    #[display("Cascade did not settle within {rounds} rounds")]
    CascadeLimit { rounds: u32 },
}

impl GameError {
    /// Whether this is a rule violation rather than a caller bug.
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, GameError::IllegalMove(_))
    }
}
