//! Tests for the exact formulation and the enumeration backend.

use std::time::Duration;

use territory_core::{
    bounding_box_extent, total_edge_diff, Assignment, Cell, Objective, Problem, TerritoryError,
};
use territory_test::{ones_3x3, single_cell, uniform_problem};

use super::*;

fn options(objective: Objective) -> ExactOptions {
    ExactOptions::default()
        .with_objective(objective)
        .with_time_limit(Duration::from_secs(60))
}

/// Replays a fixed outcome regardless of the model.
#[derive(Debug)]
struct ScriptedBackend {
    outcome: MipOutcome,
}

impl MipSolver for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn solve(&mut self, _model: &LinearModel, _time_limit: Duration) -> territory_core::Result<MipOutcome> {
        Ok(self.outcome.clone())
    }
}

/// Values placing `assignment` into `formulation`'s x variables.
fn values_for(formulation: &Formulation, assignment: &Assignment) -> Vec<f64> {
    let mut values = vec![0.0; formulation.model().var_count()];
    for index in 0..assignment.as_slice().len() {
        let cell = Cell::from_index(index, assignment.size());
        let player = assignment.get(cell);
        if player > 0 {
            values[formulation.x(cell, player as usize - 1)] = 1.0;
        }
    }
    values
}

#[test]
fn test_variable_layout() {
    let problem = ones_3x3();
    let formulation = Formulation::build(&problem, Objective::EdgeDiff, None);

    assert_eq!(formulation.x(Cell::new(0, 0), 0), 0);
    assert_eq!(formulation.x(Cell::new(0, 0), 2), 2);
    assert_eq!(formulation.x(Cell::new(0, 1), 0), 3);
    assert_eq!(formulation.x(Cell::new(2, 2), 2), 26);
    assert!(formulation.model().var(26).is_binary());
    assert!(!formulation.model().var(27).is_binary());
}

#[test]
fn test_edge_formulation_shape() {
    let problem = ones_3x3();
    let model = Formulation::build(&problem, Objective::EdgeDiff, None).model().clone();

    // 12 adjacent pairs on a 3×3 grid, one z per pair and player.
    assert_eq!(model.var_count(), 27 + 12 * 3);
    assert_eq!(
        model.count_constraints(|f| matches!(f, ConstraintFamily::CellAtMostOne { .. })),
        9
    );
    assert_eq!(
        model.count_constraints(|f| matches!(f, ConstraintFamily::ScoreLowerBound { .. })),
        3
    );
    assert_eq!(
        model.count_constraints(|f| matches!(f, ConstraintFamily::ScoreUpperBound { .. })),
        3
    );
    assert_eq!(
        model.count_constraints(|f| matches!(f, ConstraintFamily::EdgeAbsDiff { .. })),
        12 * 3 * 2
    );
    // Pairs in the last row and column are included.
    assert!(model.constraints().iter().any(|c| matches!(
        c.family,
        ConstraintFamily::EdgeAbsDiff {
            pair: (Cell { row: 2, col: 1 }, Cell { row: 2, col: 2 }),
            orientation: Orientation::Horizontal,
            ..
        }
    )));
    assert!(model.constraints().iter().any(|c| matches!(
        c.family,
        ConstraintFamily::EdgeAbsDiff {
            pair: (Cell { row: 1, col: 2 }, Cell { row: 2, col: 2 }),
            orientation: Orientation::Vertical,
            ..
        }
    )));
    assert_eq!(model.count_constraints(|f| *f == ConstraintFamily::StoneBudget), 0);
}

#[test]
fn test_box_formulation_shape() {
    let problem = ones_3x3();
    let model = Formulation::build(&problem, Objective::BoundingBox, Some(9)).model().clone();

    assert_eq!(model.var_count(), 27 + 4 * 3);
    assert_eq!(
        model.count_constraints(|f| matches!(f, ConstraintFamily::BoxLink { .. })),
        9 * 3 * 4
    );
    assert_eq!(model.count_constraints(|f| *f == ConstraintFamily::StoneBudget), 1);
    assert_eq!(model.objective().len(), 4 * 3);
}

#[test]
fn test_model_accepts_encoded_assignment() {
    let problem = ones_3x3();
    let stripes =
        Assignment::from_rows(vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3, 3]], 3).unwrap();

    for objective in [Objective::EdgeDiff, Objective::BoundingBox] {
        let formulation = Formulation::build(&problem, objective, None);
        let mut values = values_for(&formulation, &stripes);
        assert!(!formulation.model().is_feasible(&values));

        // Fill the auxiliaries with their tightest values.
        let x_count = 27;
        match objective {
            Objective::EdgeDiff => {
                for constraint in formulation.model().constraints() {
                    if let ConstraintFamily::EdgeAbsDiff { pair, player, .. } = constraint.family {
                        let z = constraint.terms[0].0;
                        let a = values[formulation.x(pair.0, player)];
                        let b = values[formulation.x(pair.1, player)];
                        values[z] = (a - b).abs();
                    }
                }
            }
            Objective::BoundingBox => {
                for k in 0..3 {
                    let base = x_count + 4 * k;
                    values[base] = k as f64;
                    values[base + 1] = k as f64;
                    values[base + 2] = 0.0;
                    values[base + 3] = 2.0;
                }
            }
        }

        assert!(formulation.model().is_feasible(&values));
        assert_eq!(formulation.decode(&values).unwrap(), stripes);
    }
}

#[test]
fn test_ones_3x3_edge_optimum() {
    let problem = ones_3x3();
    let solution =
        solve_exact(&problem, &options(Objective::EdgeDiff), &mut EnumerationSolver::new())
            .unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    let assignment = solution.assignment.unwrap();
    assert!(problem.is_feasible(&assignment));
    assert_eq!(assignment.assigned_count(), 9);

    // Three regions of three cells can share at most six inner edges.
    let edge_diff = total_edge_diff(&assignment);
    assert!(edge_diff >= 4);
    assert_eq!(edge_diff, 6);
    assert_eq!(solution.objective, Some(6));
    // Every border lies between two players, so the model counts it twice.
    assert_eq!(solution.model_objective, Some(12.0));
}

#[test]
fn test_ones_3x3_bounding_box_optimum() {
    let problem = ones_3x3();
    let solution = solve_exact(
        &problem,
        &options(Objective::BoundingBox),
        &mut EnumerationSolver::new(),
    )
    .unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    let assignment = solution.assignment.unwrap();
    assert!(problem.is_feasible(&assignment));
    assert_eq!(bounding_box_extent(&assignment), 6);
    assert_eq!(solution.objective, Some(6));
    assert_eq!(solution.model_objective, Some(6.0));
}

#[test]
fn test_single_cell_band_is_unreachable() {
    // Weight 5 overshoots floor(1 * 1.2) = 1, so the exact model has no answer.
    let problem = single_cell();
    let solution =
        solve_exact(&problem, &options(Objective::EdgeDiff), &mut EnumerationSolver::new())
            .unwrap();
    assert_eq!(solution.status, SolveStatus::Infeasible);
    assert!(solution.assignment.is_none());
    assert!(solution.objective.is_none());
}

#[test]
fn test_infeasible_band() {
    let problem = uniform_problem(2, 3, &[4]);
    let solution =
        solve_exact(&problem, &options(Objective::EdgeDiff), &mut EnumerationSolver::new())
            .unwrap();
    assert_eq!(solution.status, SolveStatus::Infeasible);
    assert!(!solution.status.has_solution());
}

#[test]
fn test_stone_budget() {
    let problem = Problem::from_parts(
        vec![vec![5, 1, 1], vec![1, 1, 1], vec![1, 1, 5]],
        vec![5, 5],
    )
    .unwrap();
    let opts = options(Objective::EdgeDiff).with_stone_budget(2);
    let solution = solve_exact(&problem, &opts, &mut EnumerationSolver::new()).unwrap();

    assert_eq!(solution.status, SolveStatus::Optimal);
    let assignment = solution.assignment.unwrap();
    assert_eq!(assignment.assigned_count(), 2);
    assert_ne!(assignment.get(Cell::new(0, 0)), 0);
    assert_ne!(assignment.get(Cell::new(2, 2)), 0);
    assert_eq!(assignment.player_scores(problem.grid()), vec![5, 5]);
    assert_eq!(solution.objective, Some(4));

    let too_tight = options(Objective::EdgeDiff).with_stone_budget(1);
    let solution = solve_exact(&problem, &too_tight, &mut EnumerationSolver::new()).unwrap();
    assert_eq!(solution.status, SolveStatus::Infeasible);
}

#[test]
fn test_invalid_options_rejected() {
    let problem = ones_3x3();
    let zero_time = options(Objective::EdgeDiff).with_time_limit(Duration::ZERO);
    assert!(matches!(
        solve_exact(&problem, &zero_time, &mut EnumerationSolver::new()),
        Err(TerritoryError::Config(_))
    ));
}

#[test]
fn test_zero_stone_budget_is_infeasible() {
    let problem = ones_3x3();
    let zero_budget = options(Objective::EdgeDiff).with_stone_budget(0);

    let solution = solve_exact(&problem, &zero_budget, &mut EnumerationSolver::new()).unwrap();
    assert_eq!(solution.status, SolveStatus::Infeasible);
    assert!(solution.assignment.is_none());
    assert!(solution.objective.is_none());
}

#[test]
fn test_enumeration_time_limit() {
    let problem = ones_3x3();
    let formulation = Formulation::build(&problem, Objective::EdgeDiff, None);
    let mut backend = EnumerationSolver::new();

    let outcome = backend.solve(formulation.model(), Duration::ZERO).unwrap();
    assert_eq!(outcome.status, MipStatus::NoSolution);
    assert!(outcome.values.is_none());
}

#[test]
fn test_enumeration_rejects_shared_continuous_rows() {
    let mut model = LinearModel::new();
    let a = model.add_continuous(0.0, 1.0);
    let b = model.add_continuous(0.0, 1.0);
    model.add_constraint(ConstraintFamily::StoneBudget, [(a, 1.0), (b, 1.0)], Sense::Le, 1.0);

    let result = EnumerationSolver::new().solve(&model, Duration::from_secs(1));
    assert!(matches!(result, Err(TerritoryError::Backend(_))));
}

#[test]
fn test_enumeration_solutions_are_model_feasible() {
    let problem = uniform_problem(3, 1, &[2, 4]);
    for objective in [Objective::EdgeDiff, Objective::BoundingBox] {
        let formulation = Formulation::build(&problem, objective, None);
        let outcome = EnumerationSolver::new()
            .solve(formulation.model(), Duration::from_secs(60))
            .unwrap();

        assert_eq!(outcome.status, MipStatus::Optimal);
        let values = outcome.values.unwrap();
        assert!(formulation.model().is_feasible(&values));
        assert_eq!(
            outcome.objective,
            Some(formulation.model().objective_value(&values))
        );
    }
}

#[test]
fn test_feasible_outcome_maps_to_suboptimal() {
    let problem = ones_3x3();
    let formulation = Formulation::build(&problem, Objective::EdgeDiff, None);
    let stripes =
        Assignment::from_rows(vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3, 3]], 3).unwrap();
    let mut backend = ScriptedBackend {
        outcome: MipOutcome::solved(MipStatus::Feasible, values_for(&formulation, &stripes), 12.0),
    };

    let solution = solve_exact(&problem, &options(Objective::EdgeDiff), &mut backend).unwrap();
    assert_eq!(solution.status, SolveStatus::FeasibleSuboptimal);
    assert_eq!(solution.assignment, Some(stripes));
    assert_eq!(solution.objective, Some(6));
}

#[test]
fn test_backend_band_violation_is_error() {
    let problem = ones_3x3();
    let formulation = Formulation::build(&problem, Objective::EdgeDiff, None);
    let short = Assignment::from_rows(vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3, 0]], 3).unwrap();
    let mut backend = ScriptedBackend {
        outcome: MipOutcome::solved(MipStatus::Optimal, values_for(&formulation, &short), 0.0),
    };

    let result = solve_exact(&problem, &options(Objective::EdgeDiff), &mut backend);
    assert!(matches!(result, Err(TerritoryError::Backend(_))));
}

#[test]
fn test_backend_malformed_values_are_errors() {
    let problem = ones_3x3();

    let mut missing = ScriptedBackend {
        outcome: MipOutcome::without_solution(MipStatus::Optimal),
    };
    assert!(matches!(
        solve_exact(&problem, &options(Objective::EdgeDiff), &mut missing),
        Err(TerritoryError::Backend(_))
    ));

    let mut short = ScriptedBackend {
        outcome: MipOutcome::solved(MipStatus::Optimal, vec![1.0; 3], 0.0),
    };
    assert!(matches!(
        solve_exact(&problem, &options(Objective::EdgeDiff), &mut short),
        Err(TerritoryError::Backend(_))
    ));

    let formulation = Formulation::build(&problem, Objective::EdgeDiff, None);
    let mut doubled = vec![0.0; formulation.model().var_count()];
    doubled[formulation.x(Cell::new(0, 0), 0)] = 1.0;
    doubled[formulation.x(Cell::new(0, 0), 1)] = 1.0;
    assert!(matches!(
        formulation.decode(&doubled),
        Err(TerritoryError::Backend(_))
    ));
}

#[test]
fn test_options_from_config() {
    let config = territory_config::ExactConfig {
        objective: Objective::BoundingBox,
        time_limit_seconds: 2.5,
        stone_budget: Some(7),
    };
    let opts = ExactOptions::from_config(&config);
    assert_eq!(opts.objective, Objective::BoundingBox);
    assert_eq!(opts.time_limit, Duration::from_millis(2500));
    assert_eq!(opts.stone_budget, Some(7));
}
