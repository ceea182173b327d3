//! Tests for local search moves and the search loop.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use territory_config::LocalSearchConfig;
use territory_core::{total_edge_diff, Assignment, Cell, PlayerId, TerritoryError};
use territory_test::{checkerboard, ones_3x3, uniform_problem, weighted_6x6};

use super::*;
use crate::construction::build_initial_assignment;

fn random_assignment(size: usize, players: usize, rng: &mut ChaCha8Rng) -> Assignment {
    let rows = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| rng.random_range(0..=players as PlayerId))
                .collect()
        })
        .collect();
    Assignment::from_rows(rows, players).unwrap()
}

fn random_cell(size: usize, rng: &mut ChaCha8Rng) -> Cell {
    Cell::new(rng.random_range(0..size), rng.random_range(0..size))
}

#[test]
fn test_swap_outcome_matches_total_edge_diff() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    for _ in 0..200 {
        let mut a = random_assignment(5, 3, &mut rng);
        let original = a.clone();
        let before = total_edge_diff(&a);

        let swap = SwapMove::new(random_cell(5, &mut rng), random_cell(5, &mut rng));
        match swap.try_apply(&mut a) {
            MoveOutcome::Accepted => assert!(total_edge_diff(&a) < before),
            MoveOutcome::Rejected => assert_eq!(a, original),
        }
    }
}

#[test]
fn test_recolor_outcome_matches_total_edge_diff() {
    let mut rng = ChaCha8Rng::seed_from_u64(22);
    for _ in 0..200 {
        let mut a = random_assignment(5, 3, &mut rng);
        let original = a.clone();
        let before = total_edge_diff(&a);

        let cell = random_cell(5, &mut rng);
        let target = rng.random_range(0..=3);
        let recolor = RecolorMove::new(&a, cell, target).unwrap();
        match recolor.try_apply(&mut a) {
            MoveOutcome::Accepted => assert!(total_edge_diff(&a) < before),
            MoveOutcome::Rejected => assert_eq!(a, original),
        }
    }
}

#[test]
fn test_swap_with_itself_is_rejected() {
    let mut a = checkerboard(3);
    let original = a.clone();
    let swap = SwapMove::new(Cell::new(1, 1), Cell::new(1, 1));
    assert_eq!(swap.try_apply(&mut a), MoveOutcome::Rejected);
    assert_eq!(a, original);
}

#[test]
fn test_recolor_to_same_id_is_rejected() {
    let mut a = checkerboard(3);
    let original = a.clone();
    let recolor = RecolorMove::new(&a, Cell::new(0, 0), 1).unwrap();
    assert_eq!(recolor.try_apply(&mut a), MoveOutcome::Rejected);
    assert_eq!(a, original);
}

#[test]
fn test_recolor_validates_at_boundary() {
    let a = Assignment::new(3, 2);
    assert!(matches!(
        RecolorMove::new(&a, Cell::new(0, 0), 3),
        Err(TerritoryError::InvalidPlayer { player: 3, player_count: 2 })
    ));
    assert!(matches!(
        RecolorMove::new(&a, Cell::new(3, 0), 1),
        Err(TerritoryError::CellOutOfRange { row: 3, col: 0, size: 3 })
    ));
    assert!(RecolorMove::new(&a, Cell::new(2, 2), 0).is_ok());
}

#[test]
fn test_recolor_can_break_score_band() {
    // Player 2 holds only the centre cell; absorbing it into player 1 is a
    // strict compactness gain, so it is accepted even though player 2 drops
    // below its requirement.
    let problem = uniform_problem(3, 1, &[8, 1]);
    let mut a =
        Assignment::from_rows(vec![vec![1, 1, 1], vec![1, 2, 1], vec![1, 1, 1]], 2).unwrap();
    assert!(problem.is_feasible(&a));

    let recolor = RecolorMove::new(&a, Cell::new(1, 1), 1).unwrap();
    assert_eq!(recolor.try_apply(&mut a), MoveOutcome::Accepted);
    assert_eq!(total_edge_diff(&a), 0);
    assert_eq!(a.player_scores(problem.grid()), vec![9, 0]);
    assert!(!problem.is_feasible(&a));
}

#[test]
fn test_zero_iterations_is_identity() {
    let problem = weighted_6x6();
    let seed = build_initial_assignment(problem.grid(), problem.requirements());
    let mut a = seed.assignment.clone();

    let stats = run_local_search(&mut a, 0, 99);

    assert_eq!(a, seed.assignment);
    assert_eq!(stats.iterations, 0);
    assert_eq!(stats.moves_evaluated(), 0);
    assert_eq!(stats.initial_edge_diff, stats.final_edge_diff);
}

#[test]
fn test_same_seed_same_result() {
    let problem = weighted_6x6();
    let seed = build_initial_assignment(problem.grid(), problem.requirements());

    let mut first = seed.assignment.clone();
    let mut second = seed.assignment.clone();
    let stats_first = run_local_search(&mut first, 5_000, 42);
    let stats_second =
        LocalSearch::new(5_000).run(&mut second, &mut ChaCha8Rng::seed_from_u64(42));

    assert_eq!(first, second);
    assert_eq!(stats_first.swaps_accepted, stats_second.swaps_accepted);
    assert_eq!(stats_first.recolors_accepted, stats_second.recolors_accepted);
}

#[test]
fn test_search_never_increases_edge_diff() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    for _ in 0..10 {
        let mut a = random_assignment(6, 3, &mut rng);
        let before = total_edge_diff(&a);
        let stats = LocalSearch::new(1_000).run(&mut a, &mut rng);

        assert_eq!(stats.initial_edge_diff, before);
        assert_eq!(stats.final_edge_diff, total_edge_diff(&a));
        assert!(stats.final_edge_diff <= before);
        assert_eq!(stats.iterations, 1_000);
        assert_eq!(stats.swaps_attempted, 1_000);
        assert_eq!(stats.recolors_attempted, 1_000);
    }
}

#[test]
fn test_checkerboard_improves() {
    let mut a = checkerboard(4);
    let stats = run_local_search(&mut a, 10_000, 3);
    assert_eq!(stats.initial_edge_diff, 24);
    assert!(stats.final_edge_diff < 24);
    assert!(stats.moves_accepted() > 0);
}

#[test]
fn test_single_cell_grid() {
    let mut a = Assignment::from_rows(vec![vec![1]], 1).unwrap();
    let stats = run_local_search(&mut a, 100, 0);
    assert_eq!(a.get(Cell::new(0, 0)), 1);
    assert_eq!(stats.final_edge_diff, 0);
    assert_eq!(stats.moves_accepted(), 0);
}

#[test]
fn test_seed_then_search_on_ones_3x3() {
    let problem = ones_3x3();
    let seed = build_initial_assignment(problem.grid(), problem.requirements());
    let mut a = seed.assignment;

    let stats = run_local_search(&mut a, 2_000, 5);
    assert_eq!(stats.initial_edge_diff, 6);
    assert!(stats.final_edge_diff <= 6);
}

#[test]
fn test_from_config() {
    let config = LocalSearchConfig {
        iterations: 50,
        log_interval: None,
    };
    let search = LocalSearch::from_config(&config);
    assert_eq!(search.iterations(), 50);
    assert_eq!(search.log_interval(), 5);

    let search = LocalSearch::new(3).with_log_interval(0);
    assert_eq!(search.log_interval(), 1);
}
