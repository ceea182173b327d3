//! Solver entry point that hides the phase wiring.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use territory_config::{StrategyKind, TerritoryConfig};
use territory_core::{
    evaluate, Assignment, AssignmentScore, Objective, Problem, Result, TerritoryError,
};
use territory_solver::{
    build_initial_assignment, solve_exact, EnumerationSolver, ExactOptions, LocalSearch,
    MipSolver, SearchStats, SolveStatus,
};
use tracing::info;

/// Outcome of [`solve`] or [`solve_with_backend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// The final assignment. Absent only when an exact solve found none.
    pub assignment: Option<Assignment>,
    /// Score of each player, indexed by `player_id - 1`.
    pub player_scores: Vec<i64>,
    pub status: SolveStatus,
    /// Band violation and objective of `assignment`.
    pub score: Option<AssignmentScore>,
    /// Objective the score was computed with.
    pub objective: Objective,
    pub strategy: StrategyKind,
    pub elapsed: Duration,
    /// Local search counters; heuristic strategy only.
    pub search: Option<SearchStats>,
    /// Players (0-based) the greedy seed left below their requirement.
    pub unsatisfied: Vec<usize>,
}

impl Solution {
    /// Returns true if an assignment exists and meets every score band.
    pub fn is_feasible(&self) -> bool {
        self.score.is_some_and(|score| score.is_feasible())
    }

    /// Objective value of the assignment (lower is better).
    pub fn objective_value(&self) -> Option<i64> {
        self.score.map(|score| -score.soft())
    }
}

/// Solves `problem` with the strategy selected in `config`.
///
/// The exact strategy runs on the built-in [`EnumerationSolver`], which only
/// suits small grids. Use [`solve_with_backend`] to plug in another backend.
///
/// # Errors
///
/// - [`TerritoryError::Config`] if `config` does not validate
/// - [`TerritoryError::Backend`] if the exact backend fails
pub fn solve(problem: &Problem, config: &TerritoryConfig) -> Result<Solution> {
    solve_with_backend(problem, config, &mut EnumerationSolver::new())
}

/// Solves `problem`, using `backend` when the exact strategy is selected.
///
/// # Example
///
/// ```
/// use territory::prelude::*;
///
/// let problem = Problem::from_parts(vec![vec![1, 1], vec![1, 1]], vec![2, 2]).unwrap();
/// let config = TerritoryConfig::new().with_strategy(StrategyKind::Exact);
///
/// let solution = solve_with_backend(&problem, &config, &mut EnumerationSolver::new()).unwrap();
/// assert_eq!(solution.status, SolveStatus::Optimal);
/// assert_eq!(solution.objective_value(), Some(2));
/// ```
pub fn solve_with_backend<B: MipSolver + ?Sized>(
    problem: &Problem,
    config: &TerritoryConfig,
    backend: &mut B,
) -> Result<Solution> {
    #[cfg(feature = "console")]
    territory_console::init();

    config
        .validate()
        .map_err(|e| TerritoryError::Config(e.to_string()))?;

    let start = Instant::now();
    info!(
        event = "solve_start",
        strategy = strategy_name(config.strategy),
        cell_count = (problem.size() * problem.size()) as u64,
        player_count = problem.player_count() as u64,
        time_limit_secs = match config.strategy {
            StrategyKind::Heuristic => 0,
            StrategyKind::Exact => config.exact.time_limit().as_secs(),
        },
    );

    let mut solution = match config.strategy {
        StrategyKind::Heuristic => solve_heuristic(problem, config),
        StrategyKind::Exact => solve_with_exact(problem, config, backend)?,
    };
    solution.elapsed = start.elapsed();

    let score = solution
        .score
        .map_or_else(|| "N/A".to_string(), |score| score.to_string());
    info!(
        event = "solve_end",
        score = score.as_str(),
        feasible = solution.is_feasible(),
        status = solution.status.name(),
        duration_ms = solution.elapsed.as_millis() as u64,
    );

    Ok(solution)
}

fn solve_heuristic(problem: &Problem, config: &TerritoryConfig) -> Solution {
    let mut rng = match config.random_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    let seed = build_initial_assignment(problem.grid(), problem.requirements());
    let unsatisfied = seed.unsatisfied;
    let mut assignment = seed.assignment;

    let stats = LocalSearch::from_config(&config.local_search).run(&mut assignment, &mut rng);

    // Local search optimizes edge difference whatever the exact objective is.
    let objective = Objective::EdgeDiff;
    let score = evaluate(problem, &assignment, objective);
    let status = if score.is_feasible() {
        SolveStatus::FeasibleSuboptimal
    } else {
        SolveStatus::Infeasible
    };

    Solution {
        player_scores: assignment.player_scores(problem.grid()),
        assignment: Some(assignment),
        status,
        score: Some(score),
        objective,
        strategy: StrategyKind::Heuristic,
        elapsed: Duration::ZERO,
        search: Some(stats),
        unsatisfied,
    }
}

fn solve_with_exact<B: MipSolver + ?Sized>(
    problem: &Problem,
    config: &TerritoryConfig,
    backend: &mut B,
) -> Result<Solution> {
    let options = ExactOptions::from_config(&config.exact);
    let exact = solve_exact(problem, &options, backend)?;

    let score = exact
        .assignment
        .as_ref()
        .map(|assignment| evaluate(problem, assignment, options.objective));
    let player_scores = match exact.assignment.as_ref() {
        Some(assignment) => assignment.player_scores(problem.grid()),
        None => vec![0; problem.player_count()],
    };

    Ok(Solution {
        assignment: exact.assignment,
        player_scores,
        status: exact.status,
        score,
        objective: options.objective,
        strategy: StrategyKind::Exact,
        elapsed: exact.elapsed,
        search: None,
        unsatisfied: Vec::new(),
    })
}

fn strategy_name(strategy: StrategyKind) -> &'static str {
    match strategy {
        StrategyKind::Heuristic => "heuristic",
        StrategyKind::Exact => "exact",
    }
}
