//! Cell-to-player assignment matrix.

use std::fmt;

use crate::error::{Result, TerritoryError};
use crate::grid::{Cell, Grid};
use crate::requirements::Requirements;

/// Player identifier stored in an [`Assignment`]: `1..=m` for players, `0` for none.
pub type PlayerId = u32;

/// The "no player" id.
pub const UNASSIGNED: PlayerId = 0;

/// Converts a 0-based player index into its id in the assignment.
#[inline]
pub fn player_id(k: usize) -> PlayerId {
    (k + 1) as PlayerId
}

/// An n×n mapping from cells to player ids in `0..=m`.
///
/// This is the only mutable entity of the model. It is created by the
/// initial assigner (or decoded from an exact solve), mutated in place by
/// local search, and then handed off as the result.
///
/// # Examples
///
/// ```
/// use territory_core::{Assignment, Cell, Grid};
///
/// let grid = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// let mut a = Assignment::new(2, 2);
/// a.try_set(Cell::new(0, 0), 1).unwrap();
/// a.try_set(Cell::new(1, 1), 2).unwrap();
///
/// assert_eq!(a.player_scores(&grid), vec![1, 4]);
/// assert!(a.try_set(Cell::new(0, 1), 3).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    size: usize,
    player_count: usize,
    cells: Vec<PlayerId>,
}

impl Assignment {
    /// Creates an assignment with every cell unassigned.
    pub fn new(size: usize, player_count: usize) -> Self {
        Assignment {
            size,
            player_count,
            cells: vec![UNASSIGNED; size * size],
        }
    }

    /// Creates an assignment from rows of player ids.
    ///
    /// # Errors
    ///
    /// Rejects non-square input and ids above `player_count`.
    pub fn from_rows(rows: Vec<Vec<PlayerId>>, player_count: usize) -> Result<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return Err(TerritoryError::InfeasibleInput(
                "assignment must be square".to_string(),
            ));
        }
        let cells: Vec<PlayerId> = rows.into_iter().flatten().collect();
        if let Some(&player) = cells.iter().find(|&&p| p as usize > player_count) {
            return Err(TerritoryError::InvalidPlayer {
                player,
                player_count,
            });
        }
        Ok(Assignment {
            size,
            player_count,
            cells,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of players m; valid ids are `0..=m`.
    #[inline]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    /// Player id at a cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the grid.
    #[inline]
    pub fn get(&self, cell: Cell) -> PlayerId {
        self.cells[self.checked_index(cell)]
    }

    /// Sets a cell without validating the id.
    ///
    /// Callers own the `0..=m` contract; use [`Assignment::try_set`] at API
    /// boundaries.
    #[inline]
    pub fn set(&mut self, cell: Cell, player: PlayerId) {
        debug_assert!(player as usize <= self.player_count);
        let index = self.checked_index(cell);
        self.cells[index] = player;
    }

    /// Sets a cell after validating both the cell and the id.
    pub fn try_set(&mut self, cell: Cell, player: PlayerId) -> Result<()> {
        self.validate_cell(cell)?;
        self.validate_player(player)?;
        self.set(cell, player);
        Ok(())
    }

    /// Exchanges the ids of two cells.
    #[inline]
    pub fn swap(&mut self, a: Cell, b: Cell) {
        let ia = self.checked_index(a);
        let ib = self.checked_index(b);
        self.cells.swap(ia, ib);
    }

    pub fn validate_cell(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(TerritoryError::CellOutOfRange {
                row: cell.row,
                col: cell.col,
                size: self.size,
            })
        }
    }

    pub fn validate_player(&self, player: PlayerId) -> Result<()> {
        if player as usize <= self.player_count {
            Ok(())
        } else {
            Err(TerritoryError::InvalidPlayer {
                player,
                player_count: self.player_count,
            })
        }
    }

    /// Accumulated weight per player, index `k` for player id `k + 1`.
    ///
    /// Derived on every call, never cached.
    pub fn player_scores(&self, grid: &Grid) -> Vec<i64> {
        debug_assert_eq!(grid.size(), self.size);
        let mut scores = vec![0i64; self.player_count];
        for (&player, &weight) in self.cells.iter().zip(grid.weights()) {
            if player != UNASSIGNED {
                scores[player as usize - 1] += i64::from(weight);
            }
        }
        scores
    }

    /// Returns true if every player's score lies within its band.
    pub fn is_feasible(&self, grid: &Grid, requirements: &Requirements) -> bool {
        self.player_scores(grid)
            .into_iter()
            .enumerate()
            .all(|(k, score)| requirements.in_band(k, score))
    }

    /// Number of cells holding a player.
    pub fn assigned_count(&self) -> usize {
        self.cells.iter().filter(|&&p| p != UNASSIGNED).count()
    }

    /// Iterates the cells owned by `player`.
    pub fn cells_of(&self, player: PlayerId) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &p)| p == player)
            .map(move |(i, _)| Cell::from_index(i, size))
    }

    /// Row-major player ids.
    pub fn as_slice(&self) -> &[PlayerId] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[PlayerId]> {
        self.cells.chunks(self.size.max(1))
    }

    #[inline]
    fn checked_index(&self, cell: Cell) -> usize {
        assert!(self.contains(cell), "cell {} outside assignment", cell);
        cell.index(self.size)
    }
}

impl fmt::Debug for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assignment")
            .field("size", &self.size)
            .field("player_count", &self.player_count)
            .field("cells", &self.cells)
            .finish()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|p| format!("{:>2}", p)).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
