//! Reference MIP backend for small models.
//!
//! Depth-first enumeration over at-most-one groups of binaries. Each group
//! is decided at once: either one of its variables is 1 or none is. Rows
//! made only of binaries are pruned as soon as their remaining terms can no
//! longer satisfy them. Continuous variables never branch: every row may hold
//! at most one of them, so once the binaries are fixed each continuous
//! variable has a closed-form interval and the objective picks its end.

use std::time::{Duration, Instant};

use smallvec::SmallVec;
use territory_core::{Result, TerritoryError};
use tracing::debug;

use super::backend::{MipOutcome, MipSolver, MipStatus};
use super::model::{LinearModel, Sense, VarId, VarKind, FEASIBILITY_TOLERANCE};

/// Nodes between two clock reads.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Objective improvement required to replace the incumbent.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Exhaustive branch-and-bound backend.
///
/// Exact but exponential: intended for grids of a handful of cells, for
/// tests, and as a stand-in where no external MIP solver is linked.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use territory_solver::{ConstraintFamily, EnumerationSolver, LinearModel, MipSolver, MipStatus, Sense};
///
/// let mut model = LinearModel::new();
/// let x = model.add_binary();
/// let y = model.add_binary();
/// model.add_constraint(ConstraintFamily::StoneBudget, [(x, 1.0), (y, 1.0)], Sense::Le, 1.0);
/// model.set_objective([(x, -1.0), (y, -2.0)]);
///
/// let outcome = EnumerationSolver::new().solve(&model, Duration::from_secs(1)).unwrap();
/// assert_eq!(outcome.status, MipStatus::Optimal);
/// assert_eq!(outcome.values, Some(vec![0.0, 1.0]));
/// assert_eq!(outcome.objective, Some(-2.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnumerationSolver {
    nodes: u64,
}

impl EnumerationSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the most recent solve.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl MipSolver for EnumerationSolver {
    fn name(&self) -> &str {
        "enumeration"
    }

    fn solve(&mut self, model: &LinearModel, time_limit: Duration) -> Result<MipOutcome> {
        let mut search = Search::new(model, time_limit)?;
        if search.root_feasible() {
            search.descend(0);
        }
        self.nodes = search.nodes;

        debug!(
            backend = "enumeration",
            nodes = search.nodes,
            timed_out = search.timed_out,
            "enumeration finished"
        );

        let outcome = match (search.best, search.timed_out) {
            (Some((objective, values)), false) => {
                MipOutcome::solved(MipStatus::Optimal, values, objective)
            }
            (Some((objective, values)), true) => {
                MipOutcome::solved(MipStatus::Feasible, values, objective)
            }
            (None, false) => MipOutcome::without_solution(MipStatus::Infeasible),
            (None, true) => MipOutcome::without_solution(MipStatus::NoSolution),
        };
        Ok(outcome)
    }
}

struct Search<'a> {
    model: &'a LinearModel,
    groups: Vec<SmallVec<[VarId; 4]>>,
    // (row, coef) per binary variable.
    binary_rows: Vec<SmallVec<[(usize, f64); 8]>>,
    // (row, coef) per continuous variable.
    continuous_rows: Vec<SmallVec<[(usize, f64); 8]>>,
    continuous_vars: Vec<VarId>,
    binary_only: Vec<bool>,
    objective_coef: Vec<f64>,
    values: Vec<f64>,
    decided: Vec<bool>,
    // Binary part of each row: fixed activity, and the most the undecided
    // binaries can still add in either direction.
    activity: Vec<f64>,
    max_rest: Vec<f64>,
    min_rest: Vec<f64>,
    undecided: Vec<usize>,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
    best: Option<(f64, Vec<f64>)>,
}

impl<'a> Search<'a> {
    fn new(model: &'a LinearModel, time_limit: Duration) -> Result<Self> {
        let var_count = model.var_count();
        let row_count = model.constraints().len();

        let mut binary_rows: Vec<SmallVec<[(usize, f64); 8]>> = vec![SmallVec::new(); var_count];
        let mut continuous_rows: Vec<SmallVec<[(usize, f64); 8]>> =
            vec![SmallVec::new(); var_count];
        let mut binary_only = vec![true; row_count];
        let mut max_rest = vec![0.0; row_count];
        let mut min_rest = vec![0.0; row_count];
        let mut undecided = vec![0usize; row_count];

        for (row, constraint) in model.constraints().iter().enumerate() {
            let mut continuous_seen: Option<VarId> = None;
            for &(var, coef) in &constraint.terms {
                if var >= var_count {
                    return Err(TerritoryError::Backend(format!(
                        "row {} references unknown variable {}",
                        row, var
                    )));
                }
                if coef == 0.0 {
                    continue;
                }
                match model.var(var) {
                    VarKind::Binary => {
                        binary_rows[var].push((row, coef));
                        undecided[row] += 1;
                        if coef > 0.0 {
                            max_rest[row] += coef;
                        } else {
                            min_rest[row] += coef;
                        }
                    }
                    VarKind::Continuous { .. } => {
                        if continuous_seen.is_some_and(|seen| seen != var) {
                            return Err(TerritoryError::Backend(format!(
                                "row {} ({:?}) links more than one continuous variable",
                                row, constraint.family
                            )));
                        }
                        continuous_seen = Some(var);
                        continuous_rows[var].push((row, coef));
                        binary_only[row] = false;
                    }
                }
            }
        }

        let mut objective_coef = vec![0.0; var_count];
        for &(var, coef) in model.objective() {
            if var >= var_count {
                return Err(TerritoryError::Backend(format!(
                    "objective references unknown variable {}",
                    var
                )));
            }
            objective_coef[var] += coef;
        }

        let continuous_vars = (0..var_count)
            .filter(|&var| !model.var(var).is_binary())
            .collect();

        Ok(Search {
            model,
            groups: at_most_one_groups(model),
            binary_rows,
            continuous_rows,
            continuous_vars,
            binary_only,
            objective_coef,
            values: vec![0.0; var_count],
            decided: vec![false; var_count],
            activity: vec![0.0; row_count],
            max_rest,
            min_rest,
            undecided,
            deadline: Instant::now().checked_add(time_limit),
            nodes: 0,
            timed_out: false,
            best: None,
        })
    }

    fn root_feasible(&self) -> bool {
        (0..self.binary_only.len()).all(|row| !self.binary_only[row] || !self.row_violated(row))
    }

    fn descend(&mut self, depth: usize) {
        if self.out_of_time() {
            return;
        }
        if depth == self.groups.len() {
            self.evaluate_leaf();
            return;
        }
        if let Some((best, _)) = &self.best {
            match self.lower_bound() {
                Some(bound) if bound < *best - IMPROVEMENT_EPSILON => {}
                _ => return,
            }
        }

        let options = self.groups[depth].len();
        // Place a variable first, leave the group empty last.
        for choice in (0..options).map(Some).chain(std::iter::once(None)) {
            if self.decide(depth, choice) {
                self.descend(depth + 1);
            }
            self.undo(depth, choice);
            if self.timed_out {
                return;
            }
        }
    }

    fn out_of_time(&mut self) -> bool {
        if self.timed_out {
            return true;
        }
        self.nodes += 1;
        if self.nodes % CLOCK_CHECK_INTERVAL == 1 {
            if let Some(deadline) = self.deadline {
                self.timed_out = Instant::now() >= deadline;
            }
        }
        self.timed_out
    }

    // Fixes every variable of the group. Returns false if a binary-only row
    // can no longer be satisfied.
    fn decide(&mut self, depth: usize, choice: Option<usize>) -> bool {
        for i in 0..self.groups[depth].len() {
            let var = self.groups[depth][i];
            let on = choice == Some(i);
            self.decided[var] = true;
            self.values[var] = if on { 1.0 } else { 0.0 };
            for &(row, coef) in &self.binary_rows[var] {
                if coef > 0.0 {
                    self.max_rest[row] -= coef;
                } else {
                    self.min_rest[row] -= coef;
                }
                if on {
                    self.activity[row] += coef;
                }
                self.undecided[row] -= 1;
            }
        }

        self.groups[depth].iter().all(|&var| {
            self.binary_rows[var]
                .iter()
                .all(|&(row, _)| !self.binary_only[row] || !self.row_violated(row))
        })
    }

    fn undo(&mut self, depth: usize, choice: Option<usize>) {
        for i in 0..self.groups[depth].len() {
            let var = self.groups[depth][i];
            let on = choice == Some(i);
            for &(row, coef) in &self.binary_rows[var] {
                if coef > 0.0 {
                    self.max_rest[row] += coef;
                } else {
                    self.min_rest[row] += coef;
                }
                if on {
                    self.activity[row] -= coef;
                }
                self.undecided[row] += 1;
            }
            self.decided[var] = false;
            self.values[var] = 0.0;
        }
    }

    fn row_violated(&self, row: usize) -> bool {
        let constraint = &self.model.constraints()[row];
        match constraint.sense {
            Sense::Le => {
                self.activity[row] + self.min_rest[row] > constraint.rhs + FEASIBILITY_TOLERANCE
            }
            Sense::Ge => {
                self.activity[row] + self.max_rest[row] < constraint.rhs - FEASIBILITY_TOLERANCE
            }
        }
    }

    // Interval of a continuous variable given the rows whose binaries are
    // all fixed. With `relaxed` unset every row must be fixed.
    fn interval(&self, var: VarId, relaxed: bool) -> Option<(f64, f64)> {
        let (mut lo, mut hi) = self.model.var(var).bounds();
        for &(row, coef) in &self.continuous_rows[var] {
            if relaxed && self.undecided[row] > 0 {
                continue;
            }
            let constraint = &self.model.constraints()[row];
            let bound = (constraint.rhs - self.activity[row]) / coef;
            match (constraint.sense, coef > 0.0) {
                (Sense::Le, true) | (Sense::Ge, false) => hi = hi.min(bound),
                (Sense::Le, false) | (Sense::Ge, true) => lo = lo.max(bound),
            }
        }
        (lo <= hi + FEASIBILITY_TOLERANCE).then_some((lo, hi.max(lo)))
    }

    fn best_end(&self, var: VarId, (lo, hi): (f64, f64)) -> f64 {
        if self.objective_coef[var] < 0.0 {
            hi
        } else {
            lo
        }
    }

    // Optimistic objective over all completions of the current node, or
    // None if some continuous variable already has an empty interval.
    fn lower_bound(&self) -> Option<f64> {
        let mut bound = 0.0;
        for var in 0..self.values.len() {
            let coef = self.objective_coef[var];
            if coef != 0.0 && self.model.var(var).is_binary() {
                bound += if self.decided[var] {
                    coef * self.values[var]
                } else {
                    coef.min(0.0)
                };
            }
        }
        for &var in &self.continuous_vars {
            let interval = self.interval(var, true)?;
            bound += self.objective_coef[var] * self.best_end(var, interval);
        }
        Some(bound)
    }

    fn evaluate_leaf(&mut self) {
        for i in 0..self.continuous_vars.len() {
            let var = self.continuous_vars[i];
            let Some(interval) = self.interval(var, false) else {
                return;
            };
            self.values[var] = self.best_end(var, interval);
        }

        let objective = self.model.objective_value(&self.values);
        let improves = match &self.best {
            Some((best, _)) => objective < *best - IMPROVEMENT_EPSILON,
            None => true,
        };
        if improves {
            self.best = Some((objective, self.values.clone()));
        }
    }
}

// Rows of the form `Σ x <= 1` over binaries with unit coefficients become
// groups; a variable joins the first such row it appears in. Remaining
// binaries are groups of one.
fn at_most_one_groups(model: &LinearModel) -> Vec<SmallVec<[VarId; 4]>> {
    let mut grouped = vec![false; model.var_count()];
    let mut groups = Vec::new();

    for constraint in model.constraints() {
        let is_at_most_one = constraint.sense == Sense::Le
            && (constraint.rhs - 1.0).abs() <= FEASIBILITY_TOLERANCE
            && constraint
                .terms
                .iter()
                .all(|&(var, coef)| model.var(var).is_binary() && coef == 1.0);
        if !is_at_most_one {
            continue;
        }
        let group: SmallVec<[VarId; 4]> = constraint
            .terms
            .iter()
            .map(|&(var, _)| var)
            .filter(|&var| !grouped[var])
            .collect();
        for &var in &group {
            grouped[var] = true;
        }
        if !group.is_empty() {
            groups.push(group);
        }
    }

    for var in 0..model.var_count() {
        if model.var(var).is_binary() && !grouped[var] {
            groups.push(SmallVec::from_elem(var, 1));
        }
    }
    groups
}
