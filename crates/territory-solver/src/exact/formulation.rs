//! Builds the territory model and decodes backend answers.
//!
//! Variable layout:
//!
//! | variables                   | index                                   |
//! |-----------------------------|-----------------------------------------|
//! | `x[row][col][k]` (binary)   | `(row * n + col) * m + k`               |
//! | auxiliaries (continuous)    | `n * n * m ..`, in creation order       |
//!
//! `x[row][col][k] = 1` places player `k + 1` on the cell. Edge objective
//! auxiliaries are one `z` per adjacent pair and player, horizontal pairs
//! first. Bounding-box auxiliaries are four per player, in [`BoxSide`] order.

use territory_core::{player_id, Assignment, Cell, Objective, Problem, Result, TerritoryError};

use super::model::{BoxSide, ConstraintFamily, LinearModel, Orientation, Sense, Term, VarId};

/// A built model together with the layout needed to decode it.
#[derive(Debug, Clone)]
pub struct Formulation {
    model: LinearModel,
    size: usize,
    players: usize,
    objective: Objective,
}

impl Formulation {
    /// Builds the model for `problem` under `objective`.
    ///
    /// # Example
    ///
    /// ```
    /// use territory_core::{Objective, Problem};
    /// use territory_solver::{ConstraintFamily, Formulation};
    ///
    /// let problem = Problem::from_parts(vec![vec![1, 1], vec![1, 1]], vec![2, 2]).unwrap();
    /// let formulation = Formulation::build(&problem, Objective::EdgeDiff, None);
    /// let model = formulation.model();
    ///
    /// // 2×2 cells × 2 players, plus 4 adjacent pairs × 2 players.
    /// assert_eq!(model.var_count(), 8 + 8);
    /// assert_eq!(
    ///     model.count_constraints(|f| matches!(f, ConstraintFamily::CellAtMostOne { .. })),
    ///     4
    /// );
    /// ```
    pub fn build(problem: &Problem, objective: Objective, stone_budget: Option<u64>) -> Self {
        let size = problem.size();
        let players = problem.player_count();
        let mut formulation = Formulation {
            model: LinearModel::new(),
            size,
            players,
            objective,
        };

        for _ in 0..size * size * players {
            formulation.model.add_binary();
        }

        formulation.add_cell_rows();
        formulation.add_score_rows(problem);
        if let Some(budget) = stone_budget {
            formulation.add_stone_budget(budget);
        }
        match objective {
            Objective::EdgeDiff => formulation.add_edge_objective(),
            Objective::BoundingBox => formulation.add_box_objective(),
        }
        formulation
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Index of `x[cell][k]`.
    #[inline]
    pub fn x(&self, cell: Cell, k: usize) -> VarId {
        cell.index(self.size) * self.players + k
    }

    fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size * size).map(move |i| Cell::from_index(i, size))
    }

    fn add_cell_rows(&mut self) {
        for cell in self.cells().collect::<Vec<_>>() {
            let terms: Vec<Term> = (0..self.players).map(|k| (self.x(cell, k), 1.0)).collect();
            self.model
                .add_constraint(ConstraintFamily::CellAtMostOne { cell }, terms, Sense::Le, 1.0);
        }
    }

    fn add_score_rows(&mut self, problem: &Problem) {
        let grid = problem.grid();
        let requirements = problem.requirements();
        for k in 0..self.players {
            let terms: Vec<Term> = grid
                .cells()
                .filter(|&cell| grid.weight(cell) > 0)
                .map(|cell| (self.x(cell, k), f64::from(grid.weight(cell))))
                .collect();
            self.model.add_constraint(
                ConstraintFamily::ScoreLowerBound { player: k },
                terms.iter().copied(),
                Sense::Ge,
                requirements.lower_bound(k) as f64,
            );
            self.model.add_constraint(
                ConstraintFamily::ScoreUpperBound { player: k },
                terms,
                Sense::Le,
                requirements.upper_bound(k) as f64,
            );
        }
    }

    fn add_stone_budget(&mut self, budget: u64) {
        let count = self.size * self.size * self.players;
        self.model.add_constraint(
            ConstraintFamily::StoneBudget,
            (0..count).map(|var| (var, 1.0)),
            Sense::Le,
            budget as f64,
        );
    }

    fn adjacent_pairs(&self) -> Vec<(Cell, Cell, Orientation)> {
        let n = self.size;
        let mut pairs = Vec::new();
        for row in 0..n {
            for col in 0..n.saturating_sub(1) {
                pairs.push((Cell::new(row, col), Cell::new(row, col + 1), Orientation::Horizontal));
            }
        }
        for row in 0..n.saturating_sub(1) {
            for col in 0..n {
                pairs.push((Cell::new(row, col), Cell::new(row + 1, col), Orientation::Vertical));
            }
        }
        pairs
    }

    fn add_edge_objective(&mut self) {
        let mut objective = Vec::new();
        for (a, b, orientation) in self.adjacent_pairs() {
            for k in 0..self.players {
                let z = self.model.add_continuous(0.0, 1.0);
                let xa = self.x(a, k);
                let xb = self.x(b, k);
                let family = ConstraintFamily::EdgeAbsDiff {
                    pair: (a, b),
                    player: k,
                    orientation,
                };
                // z >= xa - xb and z >= xb - xa
                self.model
                    .add_constraint(family, [(z, 1.0), (xa, -1.0), (xb, 1.0)], Sense::Ge, 0.0);
                self.model
                    .add_constraint(family, [(z, 1.0), (xa, 1.0), (xb, -1.0)], Sense::Ge, 0.0);
                objective.push((z, 1.0));
            }
        }
        self.model.set_objective(objective);
    }

    fn add_box_objective(&mut self) {
        let n = self.size as f64;
        let last = n - 1.0;
        let mut objective = Vec::new();
        for k in 0..self.players {
            let min_row = self.model.add_continuous(0.0, last);
            let max_row = self.model.add_continuous(0.0, last);
            let min_col = self.model.add_continuous(0.0, last);
            let max_col = self.model.add_continuous(0.0, last);

            for cell in self.cells().collect::<Vec<_>>() {
                let x = self.x(cell, k);
                let row = cell.row as f64;
                let col = cell.col as f64;
                let link = |side| ConstraintFamily::BoxLink {
                    player: k,
                    cell,
                    side,
                };
                // min <= coord + n(1 - x), max >= coord - n(1 - x)
                self.model
                    .add_constraint(link(BoxSide::MinRow), [(min_row, 1.0), (x, n)], Sense::Le, row + n);
                self.model
                    .add_constraint(link(BoxSide::MaxRow), [(max_row, 1.0), (x, -n)], Sense::Ge, row - n);
                self.model
                    .add_constraint(link(BoxSide::MinCol), [(min_col, 1.0), (x, n)], Sense::Le, col + n);
                self.model
                    .add_constraint(link(BoxSide::MaxCol), [(max_col, 1.0), (x, -n)], Sense::Ge, col - n);
            }

            objective.extend([
                (max_row, 1.0),
                (min_row, -1.0),
                (max_col, 1.0),
                (min_col, -1.0),
            ]);
        }
        self.model.set_objective(objective);
    }

    /// Turns backend values into an assignment: `x >= 0.5` means placed.
    ///
    /// # Errors
    ///
    /// Returns [`TerritoryError::Backend`] if `values` has the wrong length or
    /// places two players on one cell.
    pub fn decode(&self, values: &[f64]) -> Result<Assignment> {
        if values.len() != self.model.var_count() {
            return Err(TerritoryError::Backend(format!(
                "expected {} variable values, got {}",
                self.model.var_count(),
                values.len()
            )));
        }
        let mut assignment = Assignment::new(self.size, self.players);
        for cell in self.cells() {
            let mut placed = (0..self.players).filter(|&k| values[self.x(cell, k)] >= 0.5);
            if let Some(k) = placed.next() {
                if placed.next().is_some() {
                    return Err(TerritoryError::Backend(format!(
                        "cell {} holds more than one player",
                        cell
                    )));
                }
                assignment.set(cell, player_id(k));
            }
        }
        Ok(assignment)
    }
}
