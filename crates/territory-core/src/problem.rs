//! A validated grid + requirements pair.

use crate::assignment::Assignment;
use crate::error::{Result, TerritoryError};
use crate::grid::Grid;
use crate::requirements::Requirements;

/// Grid and requirements for one run, validated together.
///
/// Construction fails fast with [`TerritoryError::InfeasibleInput`] when some
/// requirement exceeds the total grid weight, since no assignment could ever
/// reach it, not even one giving that player every cell.
///
/// # Examples
///
/// ```
/// use territory_core::{Grid, Problem, Requirements};
///
/// let grid = Grid::uniform(3, 1).unwrap();
/// let ok = Problem::new(grid.clone(), Requirements::new(vec![3, 3, 3]).unwrap());
/// assert!(ok.is_ok());
///
/// let too_much = Problem::new(grid, Requirements::new(vec![10]).unwrap());
/// assert!(too_much.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    grid: Grid,
    requirements: Requirements,
}

impl Problem {
    pub fn new(grid: Grid, requirements: Requirements) -> Result<Self> {
        let total = grid.total_weight();
        if let Some((k, req)) = requirements
            .iter()
            .enumerate()
            .find(|&(_, req)| req > total)
        {
            return Err(TerritoryError::InfeasibleInput(format!(
                "requirement {} of player {} exceeds total grid weight {}",
                req,
                k + 1,
                total
            )));
        }
        Ok(Problem { grid, requirements })
    }

    /// Builds a problem from raw rows and requirement values.
    pub fn from_parts(rows: Vec<Vec<u32>>, requirements: Vec<i64>) -> Result<Self> {
        Problem::new(Grid::from_rows(rows)?, Requirements::new(requirements)?)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    #[inline]
    pub fn player_count(&self) -> usize {
        self.requirements.player_count()
    }

    /// An all-unassigned assignment shaped for this problem.
    pub fn empty_assignment(&self) -> Assignment {
        Assignment::new(self.size(), self.player_count())
    }

    /// Returns true if `assignment` puts every player inside its band.
    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        assignment.is_feasible(&self.grid, &self.requirements)
    }

    pub fn into_parts(self) -> (Grid, Requirements) {
        (self.grid, self.requirements)
    }
}
