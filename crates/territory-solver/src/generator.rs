//! Random problem generation.

use rand::Rng;
use territory_config::GeneratorConfig;
use territory_core::{Grid, Problem, Requirements, Result, TerritoryError};

/// Generates a random problem.
///
/// Cell weights are drawn uniformly from the inclusive `cell_range`.
/// Requirements come from `requirement_range` when given; otherwise from
/// `[1, n² * high / m]`, capped at the total grid weight so the result is
/// always a valid [`Problem`].
///
/// # Errors
///
/// Returns [`TerritoryError::InfeasibleInput`] for a zero size or player
/// count, an empty range, or an explicit requirement range that the drawn
/// grid cannot reach.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use territory_solver::generate_problem;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let problem = generate_problem(5, 3, (1, 9), None, &mut rng).unwrap();
/// assert_eq!(problem.size(), 5);
/// assert_eq!(problem.player_count(), 3);
/// ```
pub fn generate_problem<R: Rng + ?Sized>(
    size: usize,
    players: usize,
    cell_range: (u32, u32),
    requirement_range: Option<(i64, i64)>,
    rng: &mut R,
) -> Result<Problem> {
    if size == 0 || players == 0 {
        return Err(TerritoryError::InfeasibleInput(format!(
            "cannot generate a problem with size {} and {} players",
            size, players
        )));
    }
    let (low, high) = cell_range;
    if low > high {
        return Err(TerritoryError::InfeasibleInput(format!(
            "empty cell value range ({}, {})",
            low, high
        )));
    }

    let weights: Vec<u32> = (0..size * size)
        .map(|_| rng.random_range(low..=high))
        .collect();
    let grid = Grid::new(size, weights)?;

    let (req_low, req_high) = match requirement_range {
        Some((req_low, req_high)) => {
            if req_low <= 0 || req_low > req_high {
                return Err(TerritoryError::InfeasibleInput(format!(
                    "requirement range must be positive and non-empty: ({}, {})",
                    req_low, req_high
                )));
            }
            (req_low, req_high)
        }
        None => {
            let derived = (size * size) as i64 * i64::from(high) / players as i64;
            (1, derived.min(grid.total_weight()).max(1))
        }
    };

    let values: Vec<i64> = (0..players)
        .map(|_| rng.random_range(req_low..=req_high))
        .collect();

    Problem::new(grid, Requirements::new(values)?)
}

/// Generates a problem from a `[generator]` configuration section.
pub fn generate_from_config<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Problem> {
    generate_problem(
        config.size,
        config.players,
        config.cell_value_range,
        config.requirement_range,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_same_seed_same_problem() {
        let a = generate_problem(8, 4, (1, 9), None, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = generate_problem(8, 4, (1, 9), None, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_values_within_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let problem = generate_problem(10, 3, (2, 4), Some((5, 20)), &mut rng).unwrap();

        assert!(problem.grid().weights().iter().all(|w| (2..=4).contains(w)));
        assert!(problem.requirements().iter().all(|r| (5..=20).contains(&r)));
    }

    #[test]
    fn test_derived_requirements_are_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let problem = generate_problem(3, 2, (0, 2), None, &mut rng);
            // An all-zero grid is the only way to fail here.
            if let Ok(problem) = problem {
                let total = problem.grid().total_weight();
                assert!(problem.requirements().iter().all(|r| r >= 1 && r <= total));
            }
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(generate_problem(0, 2, (1, 9), None, &mut rng).is_err());
        assert!(generate_problem(3, 0, (1, 9), None, &mut rng).is_err());
        assert!(generate_problem(3, 2, (9, 1), None, &mut rng).is_err());
        assert!(generate_problem(3, 2, (1, 9), Some((0, 5)), &mut rng).is_err());
        assert!(matches!(
            generate_problem(2, 1, (1, 1), Some((100, 100)), &mut rng),
            Err(TerritoryError::InfeasibleInput(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = GeneratorConfig::new(4, 2);
        let problem = generate_from_config(&config, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
        assert_eq!(problem.size(), 4);
        assert_eq!(problem.player_count(), 2);
    }
}
