//! Board state: one `Cell` per grid index.
//!
//! Cells live in an `im::Vector`, so taking a snapshot before a cascade round
//! is O(1) and the round can write its output into a fresh copy without
//! aliasing the input.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::grid::Grid;
use crate::core::{GameError, Player, PlayerMap};

/// Cells of a grid plus the derived queries the engine and hosts need.
///
/// A deserialized board must hold exactly one cell per grid index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    grid: Grid,
    cells: Vector<Cell>,
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct BoardRepr {
    grid: Grid,
    cells: Vector<Cell>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        if repr.cells.len() != repr.grid.len() {
            return Err(GameError::CellCountMismatch {
                expected: repr.grid.len(),
                actual: repr.cells.len(),
            });
        }
        Ok(Self {
            grid: repr.grid,
            cells: repr.cells,
        })
    }
}

impl Board {
    /// An all-empty board.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: std::iter::repeat(Cell::EMPTY).take(grid.len()).collect(),
        }
    }

    /// Grid geometry.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at `index`.
    pub fn cell(&self, index: usize) -> Result<Cell, GameError> {
        self.grid.check(index).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Used to stage positions.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), GameError> {
        let index = self.grid.check(index)?;
        self.cells.set(index, cell);
        Ok(())
    }

    /// Builder form of [`Board::set`].
    pub fn with_cell(mut self, index: usize, cell: Cell) -> Result<Self, GameError> {
        self.set(index, cell)?;
        Ok(self)
    }

    /// All cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Whether the cell at `index` is at or over capacity.
    pub fn is_critical(&self, index: usize) -> Result<bool, GameError> {
        self.grid.check(index).map(|i| self.is_critical_at(i))
    }

    /// Indices of every critical cell, ascending.
    #[must_use]
    pub fn critical_cells(&self) -> Vec<usize> {
        self.grid
            .indices()
            .filter(|&i| self.is_critical_at(i))
            .collect()
    }

    /// No cell is critical.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.grid.indices().any(|i| self.is_critical_at(i))
    }

    /// Number of cells owned by `player`.
    #[must_use]
    pub fn score(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .count()
    }

    /// Owned-cell counts for both players.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<usize> {
        let mut scores = PlayerMap::default();
        for owner in self.cells.iter().filter_map(|cell| cell.owner) {
            scores[owner] += 1;
        }
        scores
    }

    /// Orbs held by `player`.
    #[must_use]
    pub fn orbs_of(&self, player: Player) -> u32 {
        self.cells
            .iter()
            .filter(|cell| cell.owner == Some(player))
            .map(|cell| cell.value)
            .sum()
    }

    /// Orbs on the whole board.
    #[must_use]
    pub fn total_orbs(&self) -> u32 {
        self.cells.iter().map(|cell| cell.value).sum()
    }

    /// The only player owning any cell, if exactly one does.
    #[must_use]
    pub fn sole_owner(&self) -> Option<Player> {
        let scores = self.scores();
        match (scores[Player::First], scores[Player::Second]) {
            (0, 0) => None,
            (_, 0) => Some(Player::First),
            (0, _) => Some(Player::Second),
            _ => None,
        }
    }

    pub(crate) fn is_critical_at(&self, index: usize) -> bool {
        self.cells[index].value >= self.grid.capacity_of(index)
    }

    pub(crate) fn cells(&self) -> &Vector<Cell> {
        &self.cells
    }

    pub(crate) fn from_parts(grid: Grid, cells: Vector<Cell>) -> Self {
        debug_assert_eq!(cells.len(), grid.len());
        Self { grid, cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_5x5() -> Board {
        Board::new(Grid::new(5, 5).unwrap())
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = board_5x5();
        assert_eq!(board.iter().count(), 25);
        assert!(board.iter().all(|cell| *cell == Cell::EMPTY));
        assert_eq!(board.total_orbs(), 0);
        assert!(board.is_settled());
        assert_eq!(board.sole_owner(), None);
    }

    #[test]
    fn test_set_and_read_back() {
        let board = board_5x5()
            .with_cell(12, Cell::owned(Player::First, 3))
            .unwrap();

        assert_eq!(board.cell(12), Ok(Cell::owned(Player::First, 3)));
        assert_eq!(board.cell(11), Ok(Cell::EMPTY));
        assert!(board.cell(25).is_err());
    }

    #[test]
    fn test_critical_detection() {
        let board = board_5x5()
            .with_cell(0, Cell::owned(Player::First, 2))
            .unwrap()
            .with_cell(12, Cell::owned(Player::Second, 3))
            .unwrap()
            .with_cell(7, Cell::owned(Player::Second, 5))
            .unwrap();

        assert_eq!(board.is_critical(0), Ok(true));
        assert_eq!(board.is_critical(12), Ok(false));
        assert_eq!(board.critical_cells(), vec![0, 7]);
        assert!(!board.is_settled());
    }

    #[test]
    fn test_scores_and_orbs() {
        let board = board_5x5()
            .with_cell(0, Cell::owned(Player::First, 1))
            .unwrap()
            .with_cell(1, Cell::owned(Player::First, 2))
            .unwrap()
            .with_cell(24, Cell::owned(Player::Second, 1))
            .unwrap();

        assert_eq!(board.score(Player::First), 2);
        assert_eq!(board.score(Player::Second), 1);
        assert_eq!(board.orbs_of(Player::First), 3);
        assert_eq!(board.total_orbs(), 4);
        assert_eq!(board.scores(), PlayerMap::new(|p| match p {
            Player::First => 2,
            Player::Second => 1,
        }));
        assert_eq!(board.sole_owner(), None);
    }

    #[test]
    fn test_sole_owner() {
        let board = board_5x5()
            .with_cell(3, Cell::owned(Player::Second, 1))
            .unwrap();
        assert_eq!(board.sole_owner(), Some(Player::Second));
    }

    #[test]
    fn test_serialization() {
        let board = board_5x5()
            .with_cell(7, Cell::owned(Player::Second, 2))
            .unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }

    #[test]
    fn test_deserialize_rejects_wrong_cell_count() {
        let board = Board::new(Grid::new(2, 2).unwrap());

        let mut value = serde_json::to_value(&board).unwrap();
        value["cells"].as_array_mut().unwrap().pop();
        let err = serde_json::from_value::<Board>(value).unwrap_err();
        assert_eq!(
            err.to_string(),
            GameError::CellCountMismatch { expected: 4, actual: 3 }.to_string()
        );

        let mut value = serde_json::to_value(&board).unwrap();
        let extra = value["cells"][0].clone();
        value["cells"].as_array_mut().unwrap().push(extra);
        assert!(serde_json::from_value::<Board>(value).is_err());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let before = board_5x5();
        let mut after = before.clone();
        after.set(6, Cell::owned(Player::First, 1)).unwrap();

        assert_eq!(before.cell(6), Ok(Cell::EMPTY));
        assert_ne!(before, after);
    }
}
