//! Exact formulation
//!
//! Encodes the territory problem as a mixed-integer linear model, hands it
//! to a [`MipSolver`], and decodes the answer back into an [`Assignment`].
//!
//! The edge objective minimizes `Σ_k Σ_pairs |x[a][k] - x[b][k]|`. A border
//! between two players therefore costs 2 and a border against an unassigned
//! cell costs 1. [`ExactSolution::objective`] reports the selected
//! [`Objective`] evaluated on the decoded assignment, and
//! [`ExactSolution::model_objective`] the backend's own value.

mod backend;
mod enumeration;
mod formulation;
mod model;

use std::fmt;
use std::time::{Duration, Instant};

use territory_config::ExactConfig;
use territory_core::{Assignment, Objective, Problem, Result, TerritoryError};
use tracing::info;

pub use backend::{MipOutcome, MipSolver, MipStatus};
pub use enumeration::EnumerationSolver;
pub use formulation::Formulation;
pub use model::{
    BoxSide, Constraint, ConstraintFamily, LinearModel, Orientation, Sense, Term, VarId, VarKind,
    FEASIBILITY_TOLERANCE,
};

/// Inputs of an exact solve besides the problem itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactOptions {
    pub objective: Objective,
    /// Wall-clock limit handed to the backend.
    pub time_limit: Duration,
    /// Cap on the number of assigned cells.
    pub stone_budget: Option<u64>,
}

impl Default for ExactOptions {
    fn default() -> Self {
        ExactOptions {
            objective: Objective::EdgeDiff,
            time_limit: Duration::from_secs(30),
            stone_budget: None,
        }
    }
}

impl ExactOptions {
    /// Creates options from an `[exact]` configuration section.
    pub fn from_config(config: &ExactConfig) -> Self {
        ExactOptions {
            objective: config.objective,
            time_limit: config.time_limit(),
            stone_budget: config.stone_budget,
        }
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_stone_budget(mut self, budget: u64) -> Self {
        self.stone_budget = Some(budget);
        self
    }
}

/// How far a solve got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Proven optimal for the selected objective.
    Optimal,
    /// Feasible, but the search stopped before proving optimality.
    FeasibleSuboptimal,
    /// No assignment satisfies every constraint.
    Infeasible,
    /// The time limit ran out before any feasible assignment was found.
    NoSolution,
}

impl SolveStatus {
    /// Returns true if the status comes with a feasible assignment.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::FeasibleSuboptimal)
    }

    pub fn name(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::FeasibleSuboptimal => "feasible_suboptimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::NoSolution => "no_solution",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of [`solve_exact`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExactSolution {
    pub status: SolveStatus,
    /// The decoded assignment; present exactly when the status has one.
    pub assignment: Option<Assignment>,
    /// The selected objective evaluated on `assignment`.
    pub objective: Option<i64>,
    /// The backend's objective value for the model.
    pub model_objective: Option<f64>,
    pub elapsed: Duration,
}

/// Builds the model for `problem`, solves it with `backend`, and decodes it.
///
/// # Errors
///
/// - [`TerritoryError::Config`] for a zero time limit
/// - [`TerritoryError::Backend`] if the backend fails, returns values that do
///   not fit the model, or returns an assignment outside the score band
///
/// Running out of time is not an error; see [`SolveStatus`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use territory_core::{total_edge_diff, Problem};
/// use territory_solver::{solve_exact, EnumerationSolver, ExactOptions, SolveStatus};
///
/// let problem = Problem::from_parts(vec![vec![1, 1], vec![1, 1]], vec![2, 2]).unwrap();
/// let options = ExactOptions::default().with_time_limit(Duration::from_secs(10));
///
/// let solution = solve_exact(&problem, &options, &mut EnumerationSolver::new()).unwrap();
/// assert_eq!(solution.status, SolveStatus::Optimal);
///
/// let assignment = solution.assignment.unwrap();
/// assert!(problem.is_feasible(&assignment));
/// assert_eq!(total_edge_diff(&assignment), 2);
/// ```
pub fn solve_exact<B: MipSolver + ?Sized>(
    problem: &Problem,
    options: &ExactOptions,
    backend: &mut B,
) -> Result<ExactSolution> {
    if options.time_limit.is_zero() {
        return Err(TerritoryError::Config(
            "exact time limit must be positive".to_string(),
        ));
    }

    let start = Instant::now();
    let formulation = Formulation::build(problem, options.objective, options.stone_budget);
    let model = formulation.model();

    info!(
        event = "phase_start",
        phase = "Exact",
        phase_index = 0u64,
        backend = backend.name(),
        variables = model.var_count() as u64,
        constraint_count = model.constraints().len() as u64,
        time_limit_secs = options.time_limit.as_secs(),
    );

    let outcome = backend.solve(model, options.time_limit)?;

    let status = match outcome.status {
        MipStatus::Optimal => SolveStatus::Optimal,
        MipStatus::Feasible => SolveStatus::FeasibleSuboptimal,
        MipStatus::Infeasible => SolveStatus::Infeasible,
        MipStatus::NoSolution => SolveStatus::NoSolution,
    };

    let (assignment, objective) = if status.has_solution() {
        let values = outcome.values.as_deref().ok_or_else(|| {
            TerritoryError::Backend(format!(
                "backend reported {:?} without variable values",
                outcome.status
            ))
        })?;
        let assignment = formulation.decode(values)?;
        if !problem.is_feasible(&assignment) {
            return Err(TerritoryError::Backend(format!(
                "backend solution breaks the score band: scores {:?}",
                assignment.player_scores(problem.grid())
            )));
        }
        let objective = options.objective.evaluate(&assignment);
        (Some(assignment), Some(objective))
    } else {
        (None, None)
    };

    let elapsed = start.elapsed();
    match objective {
        Some(objective) => info!(
            event = "phase_end",
            phase = "Exact",
            phase_index = 0u64,
            duration_ms = elapsed.as_millis() as u64,
            status = status.name(),
            objective = objective,
        ),
        None => info!(
            event = "phase_end",
            phase = "Exact",
            phase_index = 0u64,
            duration_ms = elapsed.as_millis() as u64,
            status = status.name(),
        ),
    }

    Ok(ExactSolution {
        status,
        assignment,
        objective,
        model_objective: outcome.objective.filter(|_| status.has_solution()),
        elapsed,
    })
}

#[cfg(test)]
mod tests;
