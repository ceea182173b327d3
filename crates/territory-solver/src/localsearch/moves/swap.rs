//! SwapMove - exchanges the player ids of two cells.

use territory_core::{local_score, Assignment, Cell};

use super::{CellMove, MoveOutcome};

/// Exchanges the ids of two cells.
///
/// Compares `local_score(left) + local_score(right)` before and after. When
/// the two cells are adjacent their shared edge counts on both sides but
/// cannot change, so a drop in the sum is a drop in the total edge
/// difference.
///
/// # Example
/// ```
/// use territory_core::{total_edge_diff, Assignment, Cell};
/// use territory_solver::{CellMove, MoveOutcome, SwapMove};
///
/// let mut a = Assignment::from_rows(vec![
///     vec![1, 2, 1],
///     vec![1, 1, 1],
///     vec![1, 1, 1],
/// ], 2).unwrap();
///
/// let swap = SwapMove::new(Cell::new(0, 1), Cell::new(1, 1));
/// assert_eq!(swap.try_apply(&mut a), MoveOutcome::Rejected);
///
/// let swap = SwapMove::new(Cell::new(0, 1), Cell::new(0, 0));
/// assert_eq!(swap.try_apply(&mut a), MoveOutcome::Accepted);
/// assert_eq!(total_edge_diff(&a), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    left: Cell,
    right: Cell,
}

impl SwapMove {
    pub fn new(left: Cell, right: Cell) -> Self {
        SwapMove { left, right }
    }

    pub fn left(&self) -> Cell {
        self.left
    }

    pub fn right(&self) -> Cell {
        self.right
    }

    fn pair_score(&self, assignment: &Assignment) -> u32 {
        local_score(assignment, self.left) + local_score(assignment, self.right)
    }
}

impl CellMove for SwapMove {
    fn try_apply(&self, assignment: &mut Assignment) -> MoveOutcome {
        let before = self.pair_score(assignment);
        assignment.swap(self.left, self.right);
        let after = self.pair_score(assignment);

        if after < before {
            MoveOutcome::Accepted
        } else {
            assignment.swap(self.left, self.right);
            MoveOutcome::Rejected
        }
    }
}
