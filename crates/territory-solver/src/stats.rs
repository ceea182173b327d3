//! Local search statistics.
//!
//! Plain counters filled in by [`LocalSearch::run`](crate::LocalSearch::run).

use std::time::Duration;

/// Counters for one local search run.
///
/// # Example
///
/// ```
/// use territory_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.record_swap(true);
/// stats.record_swap(false);
/// stats.record_recolor(false);
///
/// assert_eq!(stats.moves_evaluated(), 3);
/// assert_eq!(stats.moves_accepted(), 1);
/// assert!((stats.acceptance_rate() - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Iterations completed; each tries one swap and one recolor.
    pub iterations: u64,
    pub swaps_attempted: u64,
    pub swaps_accepted: u64,
    pub recolors_attempted: u64,
    pub recolors_accepted: u64,
    /// Total edge difference before the first iteration.
    pub initial_edge_diff: i64,
    /// Total edge difference after the last iteration.
    pub final_edge_diff: i64,
    /// Wall-clock time spent in the run.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Records a swap attempt and whether it was kept.
    pub fn record_swap(&mut self, accepted: bool) {
        self.swaps_attempted += 1;
        if accepted {
            self.swaps_accepted += 1;
        }
    }

    /// Records a recolor attempt and whether it was kept.
    pub fn record_recolor(&mut self, accepted: bool) {
        self.recolors_attempted += 1;
        if accepted {
            self.recolors_accepted += 1;
        }
    }

    pub fn moves_evaluated(&self) -> u64 {
        self.swaps_attempted + self.recolors_attempted
    }

    pub fn moves_accepted(&self) -> u64 {
        self.swaps_accepted + self.recolors_accepted
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        let evaluated = self.moves_evaluated();
        if evaluated == 0 {
            0.0
        } else {
            self.moves_accepted() as f64 / evaluated as f64
        }
    }

    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.moves_evaluated() as f64 / secs
        } else {
            0.0
        }
    }

    /// Reduction in total edge difference over the run.
    pub fn improvement(&self) -> i64 {
        self.initial_edge_diff - self.final_edge_diff
    }
}
