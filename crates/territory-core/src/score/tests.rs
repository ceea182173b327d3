//! Cross-checks between the scoring functions.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::assignment::{Assignment, PlayerId};
use crate::grid::Cell;
use crate::problem::Problem;

fn random_assignment(rng: &mut ChaCha8Rng, size: usize, players: usize) -> Assignment {
    let rows: Vec<Vec<PlayerId>> = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| rng.random_range(0..=players as PlayerId))
                .collect()
        })
        .collect();
    Assignment::from_rows(rows, players).unwrap()
}

fn local_score_sum(a: &Assignment) -> i64 {
    (0..a.size() * a.size())
        .map(|i| i64::from(local_score(a, Cell::from_index(i, a.size()))))
        .sum()
}

#[test]
fn test_edge_diff_is_half_local_score_sum() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for size in 1..=8 {
        for players in 1..=5 {
            let a = random_assignment(&mut rng, size, players);
            let sum = local_score_sum(&a);
            assert_eq!(sum % 2, 0);
            assert_eq!(total_edge_diff(&a), sum / 2, "size={size} players={players}");
        }
    }
}

#[test]
fn test_local_score_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let a = random_assignment(&mut rng, 6, 4);
    for i in 0..36 {
        let cell = Cell::from_index(i, 6);
        let score = local_score(&a, cell);
        assert!(score <= cell.neighbors(6).len() as u32);
    }
}

#[test]
fn test_uniform_assignment_has_no_edges() {
    let a = Assignment::from_rows(vec![vec![2; 4]; 4], 2).unwrap();
    assert_eq!(total_edge_diff(&a), 0);
    assert_eq!(local_score_sum(&a), 0);
    assert_eq!(bounding_box_extent(&a), 6);
}

#[test]
fn test_single_cell_grid() {
    let a = Assignment::from_rows(vec![vec![1]], 1).unwrap();
    assert_eq!(local_score(&a, Cell::new(0, 0)), 0);
    assert_eq!(total_edge_diff(&a), 0);
    assert_eq!(bounding_box_extent(&a), 0);
}

#[test]
fn test_checkerboard_edges() {
    // Every adjacent pair differs: 2 * n * (n - 1) edges.
    let rows: Vec<Vec<PlayerId>> = (0..4)
        .map(|r| (0..4).map(|c| ((r + c) % 2 + 1) as PlayerId).collect())
        .collect();
    let a = Assignment::from_rows(rows, 2).unwrap();
    assert_eq!(total_edge_diff(&a), 24);
    assert_eq!(local_score(&a, Cell::new(1, 1)), 4);
    assert_eq!(local_score(&a, Cell::new(0, 0)), 2);
}

#[test]
fn test_three_stripes() {
    let a = Assignment::from_rows(vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3, 3]], 3).unwrap();
    assert_eq!(total_edge_diff(&a), 6);
    assert_eq!(bounding_box_extent(&a), 6);
    assert_eq!(Objective::EdgeDiff.evaluate(&a), 6);
    assert_eq!(Objective::BoundingBox.evaluate(&a), 6);
}

#[test]
fn test_band_violation_and_evaluate() {
    let problem = Problem::from_parts(vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]], vec![3, 3, 3])
        .unwrap();
    let stripes =
        Assignment::from_rows(vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3, 3]], 3).unwrap();
    assert_eq!(band_violation(&problem, &stripes), 0);
    assert_eq!(
        evaluate(&problem, &stripes, Objective::EdgeDiff),
        AssignmentScore::of(0, -6)
    );

    let lopsided =
        Assignment::from_rows(vec![vec![1, 1, 1], vec![1, 2, 2], vec![0, 3, 3]], 3).unwrap();
    // player 1: 4 > 3, player 2: 2 < 3, player 3: 2 < 3
    assert_eq!(player_scores(problem.grid(), &lopsided), vec![4, 2, 2]);
    assert_eq!(band_violation(&problem, &lopsided), 3);
    assert!(!evaluate(&problem, &lopsided, Objective::EdgeDiff).is_feasible());
}

#[test]
fn test_score_parse_round_trip() {
    let score = AssignmentScore::of(-2, -17);
    assert_eq!(AssignmentScore::parse(&score.to_string()).unwrap(), score);
    assert_eq!("0hard/-5soft".parse::<AssignmentScore>().unwrap(), AssignmentScore::of(0, -5));
    assert!(AssignmentScore::parse("-5").is_err());
    assert!(AssignmentScore::parse("0hard/xsoft").is_err());
    assert!(AssignmentScore::parse("0soft/0hard").is_err());
}

#[test]
fn test_score_ordering_and_arithmetic() {
    let s1 = AssignmentScore::of(-1, 0);
    let s2 = AssignmentScore::of(0, -100);
    let s3 = AssignmentScore::of(0, -5);
    assert!(s2 > s1);
    assert!(s3 > s2);
    assert_eq!(s2 + s3, AssignmentScore::of(0, -105));
    assert_eq!(s3 - s2, AssignmentScore::of(0, 95));
    assert_eq!(-s1, AssignmentScore::of(1, 0));
    assert_eq!(AssignmentScore::default(), AssignmentScore::ZERO);
}
