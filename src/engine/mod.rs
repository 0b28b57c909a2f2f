//! Reaction engine: cascade propagation and the turn state machine.
//!
//! ## Design Philosophy
//!
//! Propagation is a pure function from one board snapshot to the next
//! ([`propagate`]). [`Game`] owns the turn state machine and decides when to
//! call it; pacing between rounds belongs to the host.

mod cascade;
mod game;
mod status;

pub use cascade::{propagate, Round};
pub use game::{Game, WIN_GUARD_TURNS};
pub use status::{CascadeStatus, Exploded, GameStatus, MoveOutcome};
