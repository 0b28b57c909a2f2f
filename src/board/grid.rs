//! Grid geometry: capacities and orthogonal adjacency.
//!
//! Cells are addressed by row-major index `row * width + col`. Capacity is
//! never stored; it is the number of orthogonal neighbors a cell has, derived
//! from four boundary tests.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GameConfig, GameError};

/// Orthogonal neighbors of a cell. At most four, so never heap-allocated.
pub type Neighbors = SmallVec<[usize; 4]>;

/// Fixed `width x height` rectangular grid.
///
/// Deserialization goes through the same checks as [`Grid::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    width: usize,
    height: usize,
}

/// Unchecked wire form of a [`Grid`].
#[derive(Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GameError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        Grid::new(repr.width, repr.height)
    }
}

impl Grid {
    /// Create a grid. Both sides must be at least 2.
    ///
    /// ```
    /// use chain_reaction::{GameError, Grid};
    ///
    /// let grid = Grid::new(5, 5).unwrap();
    /// assert_eq!(grid.len(), 25);
    /// assert!(matches!(Grid::new(0, 5), Err(GameError::InvalidConfiguration { .. })));
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        Self::from_config(&GameConfig::new(width, height))
    }

    /// Create the grid described by a config.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false: every grid is validated on construction and on
    /// deserialization, so it has at least four cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All valid indices in ascending order.
    pub fn indices(&self) -> std::ops::Range<usize> {
        0..self.len()
    }

    /// Reject indices outside `[0, len)`.
    pub fn check(&self, index: usize) -> Result<usize, GameError> {
        if index < self.len() {
            Ok(index)
        } else {
            Err(GameError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
        }
    }

    /// Row-major index of `(col, row)`.
    pub fn index_of(&self, col: usize, row: usize) -> Result<usize, GameError> {
        if col >= self.width || row >= self.height {
            return Err(GameError::IndexOutOfBounds {
                index: row.saturating_mul(self.width).saturating_add(col),
                len: self.len(),
            });
        }
        Ok(row * self.width + col)
    }

    /// `(col, row)` of an index.
    pub fn coords(&self, index: usize) -> Result<(usize, usize), GameError> {
        let index = self.check(index)?;
        Ok((index % self.width, index / self.width))
    }

    /// Number of orthogonal neighbors: 2 for corners, 3 for edges, 4 inside.
    pub fn capacity(&self, index: usize) -> Result<u32, GameError> {
        self.check(index).map(|i| self.capacity_of(i))
    }

    /// Orthogonal neighbors in up, left, down, right order. No wraparound.
    pub fn neighbors(&self, index: usize) -> Result<Neighbors, GameError> {
        self.check(index).map(|i| self.neighbors_of(i))
    }

    /// Sum of all capacities: `2 * (2wh - w - h)`.
    #[must_use]
    pub fn total_capacity(&self) -> u32 {
        self.indices().map(|i| self.capacity_of(i)).sum()
    }

    /// Capacity of an index already known to be in range.
    pub(crate) fn capacity_of(&self, index: usize) -> u32 {
        self.adjacent(index).iter().flatten().count() as u32
    }

    /// Neighbors of an index already known to be in range.
    pub(crate) fn neighbors_of(&self, index: usize) -> Neighbors {
        self.adjacent(index).into_iter().flatten().collect()
    }

    fn adjacent(&self, index: usize) -> [Option<usize>; 4] {
        let w = self.width;
        let up = (index >= w).then(|| index - w);
        let left = (index % w != 0).then(|| index - 1);
        let down = (index < w * (self.height - 1)).then(|| index + w);
        let right = (index % w != w - 1).then(|| index + 1);
        [up, left, down, right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_5x5() -> Grid {
        Grid::new(5, 5).unwrap()
    }

    #[test]
    fn test_capacity_classification() {
        let grid = grid_5x5();

        for corner in [0, 4, 20, 24] {
            assert_eq!(grid.capacity(corner), Ok(2), "corner {corner}");
        }
        for edge in [1, 2, 3, 5, 10, 15, 9, 14, 19, 21, 22, 23] {
            assert_eq!(grid.capacity(edge), Ok(3), "edge {edge}");
        }
        for interior in [6, 7, 8, 11, 12, 13, 16, 17, 18] {
            assert_eq!(grid.capacity(interior), Ok(4), "interior {interior}");
        }
    }

    #[test]
    fn test_total_capacity_formula() {
        for (w, h) in [(2, 2), (5, 5), (3, 7), (8, 2)] {
            let grid = Grid::new(w, h).unwrap();
            let expected = 2 * (2 * w * h - w - h) as u32;
            assert_eq!(grid.total_capacity(), expected, "{w}x{h}");
        }
    }

    #[test]
    fn test_neighbors() {
        let grid = grid_5x5();

        assert_eq!(grid.neighbors(12).unwrap().as_slice(), &[7, 11, 17, 13]);
        assert_eq!(grid.neighbors(0).unwrap().as_slice(), &[5, 1]);
        assert_eq!(grid.neighbors(24).unwrap().as_slice(), &[19, 23]);
        // Right edge does not wrap to the next row.
        assert_eq!(grid.neighbors(9).unwrap().as_slice(), &[4, 8, 14]);
    }

    #[test]
    fn test_capacity_matches_neighbor_count() {
        let grid = Grid::new(4, 3).unwrap();
        for i in grid.indices() {
            assert_eq!(grid.capacity_of(i) as usize, grid.neighbors_of(i).len());
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = grid_5x5();
        let err = GameError::IndexOutOfBounds { index: 25, len: 25 };

        assert_eq!(grid.capacity(25), Err(err));
        assert_eq!(grid.neighbors(25), Err(err));
        assert_eq!(grid.coords(25), Err(err));
        assert!(grid.index_of(5, 0).is_err());
    }

    #[test]
    fn test_coords_round_trip() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.coords(7), Ok((3, 1)));
        assert_eq!(grid.index_of(3, 1), Ok(7));
    }

    #[test]
    fn test_rectangular_grid() {
        let grid = Grid::new(2, 3).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.capacity(0), Ok(2));
        assert_eq!(grid.capacity(2), Ok(3));
        assert_eq!(grid.capacity(5), Ok(2));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(1, 4),
            Err(GameError::InvalidConfiguration { width: 1, height: 4 })
        );
        let side = 1usize << (usize::BITS / 2 + 1);
        assert!(Grid::new(side, side).is_err());
    }

    #[test]
    fn test_valid_grids_are_never_empty() {
        for (w, h) in [(2, 2), (5, 5), (2, 9)] {
            let grid = Grid::new(w, h).unwrap();
            assert!(!grid.is_empty());
            assert_eq!(grid.len(), w * h);
        }
    }

    #[test]
    fn test_serialization() {
        let grid = Grid::new(4, 3).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"width":4,"height":3}"#);
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn test_deserialize_rejects_invalid_dimensions() {
        for json in [
            r#"{"width":0,"height":5}"#,
            r#"{"width":5,"height":1}"#,
            r#"{"width":4294967296,"height":4294967296}"#,
        ] {
            assert!(serde_json::from_str::<Grid>(json).is_err(), "{json}");
        }
    }
}
