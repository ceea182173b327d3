//! Score-band violation and combined evaluation.

use crate::assignment::Assignment;
use crate::grid::Grid;
use crate::problem::Problem;

use super::{AssignmentScore, Objective};

/// Accumulated weight of each player, indexed by `player_id - 1`.
///
/// Same as [`Assignment::player_scores`]; unassigned cells count for nobody.
pub fn player_scores(grid: &Grid, assignment: &Assignment) -> Vec<i64> {
    assignment.player_scores(grid)
}

/// Total distance of every player's score from its band.
///
/// Zero exactly when the assignment is feasible.
pub fn band_violation(problem: &Problem, assignment: &Assignment) -> i64 {
    let requirements = problem.requirements();
    player_scores(problem.grid(), assignment)
        .into_iter()
        .enumerate()
        .map(|(k, score)| requirements.band_distance(k, score))
        .sum()
}

/// Scores an assignment: hard = -band violation, soft = -objective value.
///
/// # Examples
///
/// ```
/// use territory_core::{evaluate, Assignment, Objective, Problem};
///
/// let problem = Problem::from_parts(vec![vec![1, 1], vec![1, 1]], vec![2, 2]).unwrap();
/// let a = Assignment::from_rows(vec![vec![1, 1], vec![2, 2]], 2).unwrap();
///
/// let score = evaluate(&problem, &a, Objective::EdgeDiff);
/// assert!(score.is_feasible());
/// assert_eq!(score.soft(), -2);
/// ```
pub fn evaluate(problem: &Problem, assignment: &Assignment, objective: Objective) -> AssignmentScore {
    AssignmentScore::of(
        -band_violation(problem, assignment),
        -objective.evaluate(assignment),
    )
}
