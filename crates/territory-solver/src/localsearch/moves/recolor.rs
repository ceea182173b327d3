//! RecolorMove - gives one cell a different player id.

use territory_core::{local_score, Assignment, Cell, PlayerId, Result};

use super::{CellMove, MoveOutcome};

/// Sets one cell to a new id in `0..=m`.
///
/// Only the edge difference around the cell is consulted. The move can take
/// a player out of its score band, since it never looks at cell weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecolorMove {
    cell: Cell,
    player: PlayerId,
}

impl RecolorMove {
    /// Creates a recolor move after validating it against `assignment`.
    ///
    /// # Errors
    ///
    /// Returns `CellOutOfRange` for a cell outside the grid and
    /// `InvalidPlayer` for an id above the assignment's player count.
    ///
    /// # Example
    /// ```
    /// use territory_core::{Assignment, Cell, TerritoryError};
    /// use territory_solver::RecolorMove;
    ///
    /// let a = Assignment::new(2, 2);
    /// assert!(RecolorMove::new(&a, Cell::new(1, 1), 2).is_ok());
    /// assert!(matches!(
    ///     RecolorMove::new(&a, Cell::new(0, 0), 3),
    ///     Err(TerritoryError::InvalidPlayer { player: 3, player_count: 2 })
    /// ));
    /// ```
    pub fn new(assignment: &Assignment, cell: Cell, player: PlayerId) -> Result<Self> {
        assignment.validate_cell(cell)?;
        assignment.validate_player(player)?;
        Ok(RecolorMove { cell, player })
    }

    /// Creates a recolor move whose inputs the caller already guarantees.
    pub(crate) fn unchecked(cell: Cell, player: PlayerId) -> Self {
        RecolorMove { cell, player }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }
}

impl CellMove for RecolorMove {
    fn try_apply(&self, assignment: &mut Assignment) -> MoveOutcome {
        let previous = assignment.get(self.cell);
        let before = local_score(assignment, self.cell);
        assignment.set(self.cell, self.player);
        let after = local_score(assignment, self.cell);

        if after < before {
            MoveOutcome::Accepted
        } else {
            assignment.set(self.cell, previous);
            MoveOutcome::Rejected
        }
    }
}
