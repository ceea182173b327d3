//! The local search loop.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use territory_config::LocalSearchConfig;
use territory_core::{total_edge_diff, Assignment, Cell, PlayerId};
use tracing::{debug, info};

use super::moves::{CellMove, RecolorMove, SwapMove};
use crate::stats::SearchStats;

/// Hill-climbing local search over swap and recolor moves.
///
/// Each iteration draws two cells for a swap, then one cell and one target id
/// in `0..=m` for a recolor, all uniformly over the whole grid, and tries the
/// swap before the recolor.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use territory_core::{total_edge_diff, Assignment};
/// use territory_solver::LocalSearch;
///
/// let mut a = Assignment::from_rows(vec![
///     vec![1, 2, 1],
///     vec![2, 1, 2],
///     vec![1, 2, 1],
/// ], 2).unwrap();
/// let before = total_edge_diff(&a);
///
/// let stats = LocalSearch::new(2_000).run(&mut a, &mut ChaCha8Rng::seed_from_u64(1));
/// assert!(stats.final_edge_diff <= before);
/// assert_eq!(stats.final_edge_diff, total_edge_diff(&a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearch {
    iterations: u64,
    log_interval: u64,
}

impl LocalSearch {
    /// Creates a search of `iterations` steps, logging every tenth of the run.
    pub fn new(iterations: u64) -> Self {
        LocalSearch {
            iterations,
            log_interval: (iterations / 10).max(1),
        }
    }

    /// Creates a search from a `[local_search]` configuration section.
    pub fn from_config(config: &LocalSearchConfig) -> Self {
        LocalSearch {
            iterations: config.iterations,
            log_interval: config.effective_log_interval(),
        }
    }

    /// Sets the number of iterations between progress events.
    pub fn with_log_interval(mut self, log_interval: u64) -> Self {
        self.log_interval = log_interval.max(1);
        self
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn log_interval(&self) -> u64 {
        self.log_interval
    }

    /// Runs the search in place, drawing from `rng`.
    pub fn run<R: Rng + ?Sized>(&self, assignment: &mut Assignment, rng: &mut R) -> SearchStats {
        let start = Instant::now();
        let size = assignment.size();
        let max_player = assignment.player_count() as PlayerId;
        let initial = total_edge_diff(assignment);

        info!(
            event = "phase_start",
            phase = "Local Search",
            phase_index = 1u64,
            iterations = self.iterations,
        );

        let mut stats = SearchStats {
            initial_edge_diff: initial,
            final_edge_diff: initial,
            ..SearchStats::default()
        };

        if size > 0 {
            for iteration in 0..self.iterations {
                let left = random_cell(size, rng);
                let right = random_cell(size, rng);
                let swap = SwapMove::new(left, right);
                stats.record_swap(swap.try_apply(assignment).is_accepted());

                let cell = random_cell(size, rng);
                let target = rng.random_range(0..=max_player);
                let recolor = RecolorMove::unchecked(cell, target);
                stats.record_recolor(recolor.try_apply(assignment).is_accepted());

                stats.iterations = iteration + 1;

                if stats.iterations % self.log_interval == 0 {
                    let elapsed = start.elapsed();
                    info!(
                        event = "progress",
                        steps = stats.iterations,
                        elapsed_ms = elapsed.as_millis() as u64,
                        speed = per_second(stats.moves_evaluated(), elapsed.as_secs_f64()),
                        edge_diff = total_edge_diff(assignment),
                    );
                }
            }
        }

        stats.final_edge_diff = total_edge_diff(assignment);
        stats.elapsed = start.elapsed();

        debug!(
            swaps_accepted = stats.swaps_accepted,
            recolors_accepted = stats.recolors_accepted,
            "local search counters"
        );
        let acceptance_rate = format!("{:.2}%", stats.acceptance_rate() * 100.0);
        info!(
            event = "phase_end",
            phase = "Local Search",
            phase_index = 1u64,
            duration_ms = stats.elapsed.as_millis() as u64,
            steps = stats.iterations,
            speed = stats.moves_per_second() as u64,
            acceptance_rate = acceptance_rate.as_str(),
            edge_diff = stats.final_edge_diff,
        );

        stats
    }
}

/// Runs [`LocalSearch`] with a ChaCha8 generator seeded from `seed`.
///
/// The same seed reproduces the same search on every platform.
pub fn run_local_search(assignment: &mut Assignment, iterations: u64, seed: u64) -> SearchStats {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    LocalSearch::new(iterations).run(assignment, &mut rng)
}

fn random_cell<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Cell {
    Cell::new(rng.random_range(0..size), rng.random_range(0..size))
}

fn per_second(count: u64, secs: f64) -> u64 {
    if secs > 0.0 {
        (count as f64 / secs) as u64
    } else {
        0
    }
}
