//! Territory Solver Engine
//!
//! This crate provides the two solution strategies:
//! - Construction: the greedy deterministic seed ([`build_initial_assignment`])
//! - Local search: swap and recolor moves under strict improvement
//!   ([`LocalSearch`], [`run_local_search`])
//! - Exact: an explicit linear model handed to a [`MipSolver`] backend
//!   ([`solve_exact`])
//! - Random problem generation for experiments ([`generate_problem`])

pub mod construction;
pub mod exact;
pub mod generator;
pub mod localsearch;
pub mod stats;

pub use construction::{build_initial_assignment, Seed};
pub use exact::{
    solve_exact, BoxSide, Constraint, ConstraintFamily, EnumerationSolver, ExactOptions,
    ExactSolution, Formulation, LinearModel, MipOutcome, MipSolver, MipStatus, Orientation, Sense,
    SolveStatus, VarId, VarKind,
};
pub use generator::{generate_from_config, generate_problem};
pub use localsearch::{run_local_search, CellMove, LocalSearch, MoveOutcome, RecolorMove, SwapMove};
pub use stats::SearchStats;
