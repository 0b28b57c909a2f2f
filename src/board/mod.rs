//! Board model: grid geometry, cells, and derived queries.
//!
//! Nothing here knows about turns or cascades; the board only answers
//! questions about a position.

pub mod cell;
pub mod grid;
pub mod state;

pub use cell::Cell;
pub use grid::{Grid, Neighbors};
pub use state::Board;
