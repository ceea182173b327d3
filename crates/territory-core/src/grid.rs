//! Square grid of weighted cells.

use std::fmt;

use smallvec::SmallVec;

use crate::error::{Result, TerritoryError};

/// A `(row, col)` position in a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Row-major index of this cell in a grid of the given size.
    #[inline]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`Cell::index`].
    #[inline]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Cell {
            row: index / size,
            col: index % size,
        }
    }

    /// Returns the in-grid 4-neighbours of this cell.
    ///
    /// Neighbours that would fall outside the grid are skipped, never clamped,
    /// so edge cells have two or three neighbours and a 1x1 grid has none.
    /// Order: right, left, down, up.
    ///
    /// # Examples
    ///
    /// ```
    /// use territory_core::Cell;
    ///
    /// assert_eq!(Cell::new(0, 0).neighbors(3).len(), 2);
    /// assert_eq!(Cell::new(1, 1).neighbors(3).len(), 4);
    /// assert!(Cell::new(0, 0).neighbors(1).is_empty());
    /// ```
    pub fn neighbors(self, size: usize) -> SmallVec<[Cell; 4]> {
        let mut out = SmallVec::new();
        if self.col + 1 < size {
            out.push(Cell::new(self.row, self.col + 1));
        }
        if self.col > 0 {
            out.push(Cell::new(self.row, self.col - 1));
        }
        if self.row + 1 < size {
            out.push(Cell::new(self.row + 1, self.col));
        }
        if self.row > 0 {
            out.push(Cell::new(self.row - 1, self.col));
        }
        out
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An immutable n×n grid of non-negative cell weights.
///
/// # Examples
///
/// ```
/// use territory_core::{Cell, Grid};
///
/// let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// assert_eq!(grid.size(), 2);
/// assert_eq!(grid.weight(Cell::new(1, 0)), 3);
/// assert_eq!(grid.total_weight(), 10);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
    weights: Vec<u32>,
}

impl Grid {
    /// Creates a grid from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`TerritoryError::InfeasibleInput`] when `size` is zero or
    /// `weights` does not hold exactly `size * size` values.
    pub fn new(size: usize, weights: Vec<u32>) -> Result<Self> {
        if size == 0 {
            return Err(TerritoryError::InfeasibleInput(
                "grid size must be at least 1".to_string(),
            ));
        }
        if weights.len() != size * size {
            return Err(TerritoryError::InfeasibleInput(format!(
                "grid of size {} needs {} weights, got {}",
                size,
                size * size,
                weights.len()
            )));
        }
        Ok(Grid { size, weights })
    }

    /// Creates a grid from rows, rejecting non-square input.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(TerritoryError::InfeasibleInput(format!(
                "grid must be square: row {} has {} cells, expected {}",
                index,
                row.len(),
                size
            )));
        }
        Grid::new(size, rows.into_iter().flatten().collect())
    }

    /// Creates a grid where every cell has the same weight.
    pub fn uniform(size: usize, weight: u32) -> Result<Self> {
        Grid::new(size, vec![weight; size * size])
    }

    /// Side length n.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells, n².
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.weights.len()
    }

    /// Weight of a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the grid.
    #[inline]
    pub fn weight(&self, cell: Cell) -> u32 {
        assert!(self.contains(cell), "cell {} outside grid", cell);
        self.weights[cell.index(self.size)]
    }

    /// Weight of a cell, or `None` outside the grid.
    pub fn get(&self, cell: Cell) -> Option<u32> {
        self.contains(cell)
            .then(|| self.weights[cell.index(self.size)])
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        (0..self.weights.len()).map(move |i| Cell::from_index(i, size))
    }

    /// Sum of all cell weights.
    pub fn total_weight(&self) -> i64 {
        self.weights.iter().map(|&w| i64::from(w)).sum()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.weights.chunks(self.size)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("size", &self.size)
            .field("total_weight", &self.total_weight())
            .finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|w| format!("{:>3}", w)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_skip_out_of_grid() {
        let size = 3;
        assert_eq!(
            Cell::new(0, 0).neighbors(size).as_slice(),
            &[Cell::new(0, 1), Cell::new(1, 0)]
        );
        assert_eq!(
            Cell::new(2, 2).neighbors(size).as_slice(),
            &[Cell::new(2, 1), Cell::new(1, 2)]
        );
        assert_eq!(Cell::new(0, 1).neighbors(size).len(), 3);
        assert_eq!(Cell::new(1, 1).neighbors(size).len(), 4);
    }

    #[test]
    fn test_neighbors_never_include_self() {
        for size in 1..5 {
            for index in 0..size * size {
                let cell = Cell::from_index(index, size);
                assert!(!cell.neighbors(size).contains(&cell));
            }
        }
    }

    #[test]
    fn test_index_round_trip() {
        let cell = Cell::new(2, 3);
        assert_eq!(cell.index(5), 13);
        assert_eq!(Cell::from_index(13, 5), cell);
    }

    #[test]
    fn test_grid_rejects_empty() {
        assert!(matches!(
            Grid::new(0, vec![]),
            Err(TerritoryError::InfeasibleInput(_))
        ));
        assert!(Grid::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_grid_rejects_non_square() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, TerritoryError::InfeasibleInput(_)));
        assert!(Grid::new(2, vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_grid_accessors() {
        let grid = Grid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.cell_count(), 9);
        assert_eq!(grid.weight(Cell::new(2, 1)), 8);
        assert_eq!(grid.get(Cell::new(3, 0)), None);
        assert_eq!(grid.total_weight(), 45);
        assert_eq!(grid.cells().count(), 9);
        assert_eq!(grid.cells().nth(4), Some(Cell::new(1, 1)));
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn test_weight_out_of_range_panics() {
        let grid = Grid::uniform(2, 1).unwrap();
        grid.weight(Cell::new(0, 2));
    }
}
