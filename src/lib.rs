//! # chain-reaction
//!
//! Simulation core for the two-player chain reaction board game.
//!
//! Players take turns adding orbs to cells of a rectangular grid. A cell that
//! reaches its capacity (its number of orthogonal neighbors) explodes, sending
//! one orb to each neighbor and converting them to the mover's color.
//! Explosions cascade until the board is stable. A player wins once both have
//! moved and the opponent owns no cell.
//!
//! ## Design Principles
//!
//! 1. **Pure rounds**: each propagation round reads an immutable snapshot and
//!    produces a new board, so simultaneous explosions resolve independently
//!    of iteration order.
//!
//! 2. **Explicit state machine**: `GameStatus` drives input locking, turn
//!    alternation and end of game. Hosts choose whether to drain a cascade
//!    in one call or round by round.
//!
//! 3. **Persistent data structures**: boards are `im` vectors, so snapshots
//!    clone in O(1).
//!
//! ## Modules
//!
//! - `core`: players, configuration, placements, errors
//! - `board`: grid geometry, cells, board queries
//! - `engine`: cascade propagation and the `Game` state machine

pub mod board;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameError, IllegalMove, Placement, PlacementRecord, Player, PlayerMap};

pub use crate::board::{Board, Cell, Grid, Neighbors};

pub use crate::engine::{
    propagate, CascadeStatus, Exploded, Game, GameStatus, MoveOutcome, Round, WIN_GUARD_TURNS,
};
