//! Single-round explosion propagation.
//!
//! A round reads an immutable snapshot and writes a new board:
//!
//! 1. Every cell critical in the snapshot explodes, all at once.
//! 2. Each exploding cell sends one orb to every existing neighbor.
//! 3. An exploding cell holding exactly its capacity empties; one holding
//!    more keeps the remainder and its owner.
//! 4. Every non-exploding cell that received orbs adds them and is
//!    converted to the mover. Orbs sent into a cell that is itself
//!    exploding this round are discarded.
//!
//! Because the exploding set is fixed before any write, the result does not
//! depend on the order in which explosions are visited.

use rustc_hash::FxHashMap;
use tracing::trace;

use super::status::Exploded;
use crate::board::{Board, Cell};
use crate::core::Player;

/// Output of one propagation round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    /// Board after the round.
    pub board: Board,
    /// Cells that exploded, ascending.
    pub exploded: Exploded,
}

/// Run one round on `board` on behalf of `mover`.
///
/// Returns `None` when the board is settled.
///
/// ```
/// use chain_reaction::{propagate, Board, Cell, Grid, Player};
///
/// let board = Board::new(Grid::new(5, 5).unwrap())
///     .with_cell(0, Cell::owned(Player::First, 2))
///     .unwrap();
///
/// let round = propagate(&board, Player::First).unwrap();
/// assert_eq!(round.exploded.as_slice(), &[0]);
/// assert_eq!(round.board.cell(1).unwrap(), Cell::owned(Player::First, 1));
/// assert!(propagate(&round.board, Player::First).is_none());
/// ```
#[must_use]
pub fn propagate(board: &Board, mover: Player) -> Option<Round> {
    let grid = *board.grid();
    let exploded: Exploded = grid
        .indices()
        .filter(|&i| board.is_critical_at(i))
        .collect();

    if exploded.is_empty() {
        return None;
    }

    let mut incoming: FxHashMap<usize, u32> = FxHashMap::default();
    for &index in &exploded {
        for neighbor in grid.neighbors_of(index) {
            *incoming.entry(neighbor).or_default() += 1;
        }
    }

    let snapshot = board.cells();
    let mut next = snapshot.clone();

    for &index in &exploded {
        let cell = snapshot[index];
        let capacity = grid.capacity_of(index);
        let remainder = if cell.value == capacity {
            Cell::EMPTY
        } else {
            Cell {
                value: cell.value - capacity,
                owner: cell.owner,
            }
        };
        next.set(index, remainder);
    }

    for (index, gained) in incoming {
        if board.is_critical_at(index) {
            trace!(index, gained, "orbs absorbed by exploding cell");
            continue;
        }
        next.set(index, Cell::owned(mover, snapshot[index].value + gained));
    }

    Some(Round {
        board: Board::from_parts(grid, next),
        exploded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Grid;

    fn board_5x5() -> Board {
        Board::new(Grid::new(5, 5).unwrap())
    }

    #[test]
    fn test_settled_board_has_no_round() {
        let board = board_5x5()
            .with_cell(12, Cell::owned(Player::First, 3))
            .unwrap();
        assert!(propagate(&board, Player::First).is_none());
    }

    #[test]
    fn test_center_explosion() {
        let board = board_5x5()
            .with_cell(12, Cell::owned(Player::First, 4))
            .unwrap();

        let round = propagate(&board, Player::First).unwrap();

        assert_eq!(round.exploded.as_slice(), &[12]);
        assert_eq!(round.board.cell(12), Ok(Cell::EMPTY));
        for neighbor in [7, 11, 13, 17] {
            assert_eq!(round.board.cell(neighbor), Ok(Cell::owned(Player::First, 1)));
        }
        assert_eq!(round.board.total_orbs(), 4);
    }

    #[test]
    fn test_corner_explosion() {
        let board = board_5x5()
            .with_cell(0, Cell::owned(Player::First, 2))
            .unwrap();

        let round = propagate(&board, Player::First).unwrap();

        assert_eq!(round.board.cell(0), Ok(Cell::EMPTY));
        assert_eq!(round.board.cell(1), Ok(Cell::owned(Player::First, 1)));
        assert_eq!(round.board.cell(5), Ok(Cell::owned(Player::First, 1)));
        assert_eq!(round.board.total_orbs(), 2);
    }

    #[test]
    fn test_overflow_keeps_remainder_and_owner() {
        let board = board_5x5()
            .with_cell(0, Cell::owned(Player::Second, 3))
            .unwrap();

        let round = propagate(&board, Player::First).unwrap();

        assert_eq!(round.board.cell(0), Ok(Cell::owned(Player::Second, 1)));
        // Receivers take the mover's color, not the exploding cell's.
        assert_eq!(round.board.cell(1), Ok(Cell::owned(Player::First, 1)));
        assert_eq!(round.board.cell(5), Ok(Cell::owned(Player::First, 1)));
    }

    #[test]
    fn test_contributions_accumulate() {
        // 6 and 8 both feed 7.
        let board = board_5x5()
            .with_cell(6, Cell::owned(Player::First, 4))
            .unwrap()
            .with_cell(8, Cell::owned(Player::First, 4))
            .unwrap()
            .with_cell(7, Cell::owned(Player::Second, 1))
            .unwrap();

        let round = propagate(&board, Player::First).unwrap();

        assert_eq!(round.exploded.as_slice(), &[6, 8]);
        assert_eq!(round.board.cell(7), Ok(Cell::owned(Player::First, 3)));
        assert_eq!(round.board.total_orbs(), 9);
    }

    #[test]
    fn test_adjacent_explosions_discard_exchange() {
        // 0 and 1 explode together; each drops the orb sent by the other.
        let board = board_5x5()
            .with_cell(0, Cell::owned(Player::First, 2))
            .unwrap()
            .with_cell(1, Cell::owned(Player::First, 3))
            .unwrap();

        let round = propagate(&board, Player::First).unwrap();

        assert_eq!(round.board.cell(0), Ok(Cell::EMPTY));
        assert_eq!(round.board.cell(1), Ok(Cell::EMPTY));
        assert_eq!(round.board.cell(5), Ok(Cell::owned(Player::First, 1)));
        assert_eq!(round.board.cell(2), Ok(Cell::owned(Player::First, 1)));
        assert_eq!(round.board.cell(6), Ok(Cell::owned(Player::First, 1)));
        assert_eq!(round.board.total_orbs(), 5 - 2);
    }

    #[test]
    fn test_input_snapshot_untouched() {
        let board = board_5x5()
            .with_cell(12, Cell::owned(Player::First, 4))
            .unwrap();
        let before = board.clone();

        let _ = propagate(&board, Player::First);

        assert_eq!(board, before);
    }

    #[test]
    fn test_cells_without_contributions_untouched() {
        let board = board_5x5()
            .with_cell(0, Cell::owned(Player::First, 2))
            .unwrap()
            .with_cell(24, Cell::owned(Player::Second, 1))
            .unwrap();

        let round = propagate(&board, Player::First).unwrap();

        assert_eq!(round.board.cell(24), Ok(Cell::owned(Player::Second, 1)));
    }
}
