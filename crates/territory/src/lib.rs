//! Territory - weighted grid territory assignment
//!
//! Splits an `n × n` grid of weighted cells among players so that every
//! player's score lands in `[requirement, floor(1.2 × requirement)]`, while
//! keeping territories compact.
//!
//! # Example
//!
//! ```rust
//! use territory::prelude::*;
//!
//! let problem = Problem::from_parts(vec![vec![1; 3]; 3], vec![3, 3, 3]).unwrap();
//! let config = TerritoryConfig::new().with_random_seed(7).with_iterations(1_000);
//!
//! let solution = territory::solve(&problem, &config).unwrap();
//! assert!(solution.is_feasible());
//! assert_eq!(solution.player_scores, vec![3, 3, 3]);
//! ```

mod solver;

pub use solver::{solve, solve_with_backend, Solution};

pub use territory_config::{
    ConfigError, ExactConfig, GeneratorConfig, LocalSearchConfig, StrategyKind, TerritoryConfig,
};
pub use territory_core::{
    band_violation, bounding_box_extent, evaluate, total_edge_diff, Assignment, AssignmentScore,
    Cell, Grid, Objective, PlayerId, Problem, Requirements, Result, TerritoryError, UNASSIGNED,
};
pub use territory_solver::{
    build_initial_assignment, generate_from_config, generate_problem, solve_exact,
    EnumerationSolver, ExactOptions, ExactSolution, LinearModel, LocalSearch, MipOutcome, MipSolver,
    MipStatus, SearchStats, Seed, SolveStatus,
};

#[cfg(feature = "console")]
pub use territory_console as console;

pub mod prelude {
    pub use super::{solve, solve_with_backend, Solution};
    pub use super::{Assignment, AssignmentScore, Cell, Grid, Objective, Problem, Requirements};
    pub use super::{EnumerationSolver, MipSolver, SolveStatus};
    pub use super::{StrategyKind, TerritoryConfig};
}
