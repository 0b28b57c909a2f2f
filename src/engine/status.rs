//! Game and cascade status types.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Player;

/// Cells that exploded in one round.
pub type Exploded = SmallVec<[usize; 8]>;

/// Lifecycle of a game.
///
/// ```text
/// NotStarted -> AwaitingMove(First)              (automatic on create/restart)
/// AwaitingMove(p) --place_orb--> Resolving
/// Resolving --settled--> AwaitingMove(opponent) | Over(winner)
/// any --restart--> NotStarted -> AwaitingMove(First)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created but not yet opened for input.
    NotStarted,
    /// Waiting for this player's placement.
    AwaitingMove(Player),
    /// A cascade is in flight; input is locked.
    Resolving,
    /// The game ended with this winner.
    Over(Player),
}

impl GameStatus {
    /// Player to move, if any.
    #[must_use]
    pub fn to_move(&self) -> Option<Player> {
        match self {
            GameStatus::AwaitingMove(player) => Some(*player),
            _ => None,
        }
    }

    /// Winner, if the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Over(player) => Some(*player),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over(_))
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::NotStarted => write!(f, "not started"),
            GameStatus::AwaitingMove(player) => write!(f, "awaiting {player}"),
            GameStatus::Resolving => write!(f, "resolving"),
            GameStatus::Over(player) => write!(f, "{player} wins"),
        }
    }
}

/// Result of advancing a cascade by one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeStatus {
    /// A round ran; more may follow.
    Pending {
        /// Cells that exploded this round, ascending.
        exploded: Exploded,
    },
    /// The move is finalized and the status has advanced.
    Settled,
}

impl CascadeStatus {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, CascadeStatus::Settled)
    }
}

/// Summary of a fully resolved move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Propagation rounds that ran.
    pub rounds: u32,
    /// Explosions across all rounds.
    pub explosions: u32,
    /// Status after the move.
    pub status: GameStatus,
}
