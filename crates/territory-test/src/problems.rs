//! Problem fixtures.

use territory_core::{Grid, Problem, Requirements};

/// An n×n grid of a single weight with the given requirements.
///
/// # Panics
///
/// Panics if the inputs do not form a valid problem.
pub fn uniform_problem(size: usize, weight: u32, requirements: &[i64]) -> Problem {
    let grid = Grid::uniform(size, weight).expect("valid grid");
    let requirements = Requirements::new(requirements.to_vec()).expect("valid requirements");
    Problem::new(grid, requirements).expect("valid problem")
}

/// 3×3 grid of ones shared by three players needing 3 each.
///
/// Total weight equals total requirement, so every feasible assignment uses
/// every cell and gives each player exactly three.
pub fn ones_3x3() -> Problem {
    uniform_problem(3, 1, &[3, 3, 3])
}

/// A single cell of weight 5 and one player needing 1.
pub fn single_cell() -> Problem {
    uniform_problem(1, 5, &[1])
}

/// 4×4 grid with a few heavy cells, two players.
pub fn skewed_weights_4x4() -> Problem {
    Problem::from_parts(
        vec![
            vec![9, 1, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 8],
            vec![1, 1, 1, 1],
        ],
        vec![12, 10],
    )
    .expect("valid problem")
}

/// 6×6 grid of weights 1..=9 with three players.
pub fn weighted_6x6() -> Problem {
    let rows: Vec<Vec<u32>> = (0..6)
        .map(|r| (0..6).map(|c| ((r * 7 + c * 3) % 9 + 1) as u32).collect())
        .collect();
    Problem::from_parts(rows, vec![40, 35, 45]).expect("valid problem")
}
