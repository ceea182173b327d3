//! Greedy construction of the initial assignment.
//!
//! Cells are visited heaviest first. Each cell goes to the still-unsatisfied
//! player with the least remaining room under its upper bound, provided the
//! cell fits. This fills tight players first and keeps every player at or
//! below `floor(requirement * 1.2)`.
//!
//! One exception: a player that ends the scan holding no cell at all, because
//! every remaining cell is heavier than its upper bound, takes the lightest
//! unassigned cell of positive weight. Such players are reported in
//! [`Seed::overshoot`].

use std::time::Instant;

use territory_core::{player_id, Assignment, Cell, Grid, Requirements, UNASSIGNED};
use tracing::{info, warn};

/// Result of the construction phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// The constructed assignment.
    pub assignment: Assignment,
    /// 0-based indices of players whose requirement was not reached.
    pub unsatisfied: Vec<usize>,
    /// 0-based indices of players pushed above their upper bound by the
    /// empty-handed fallback.
    pub overshoot: Vec<usize>,
}

impl Seed {
    /// Returns true if every player reached its requirement.
    pub fn is_complete(&self) -> bool {
        self.unsatisfied.is_empty()
    }

    /// Returns true if every player ended inside its band.
    pub fn is_feasible(&self) -> bool {
        self.unsatisfied.is_empty() && self.overshoot.is_empty()
    }
}

/// Builds the greedy seed assignment.
///
/// Deterministic: cells are ordered by weight descending, ties by descending
/// row-major index. A cell is eligible for player `k` while `k` is below its
/// requirement and the cell's weight still fits under `k`'s upper bound. Among
/// eligible players the one with the smallest remaining capacity wins, ties
/// to the lowest index. Cells nobody can take stay unassigned, and the scan
/// stops once every player is satisfied.
///
/// Players left short are reported in [`Seed::unsatisfied`] together with a
/// warning event; this is not an error. See the module docs for the single
/// case where a player may exceed its upper bound.
///
/// # Examples
///
/// ```
/// use territory_core::{Grid, Requirements};
/// use territory_solver::build_initial_assignment;
///
/// let grid = Grid::uniform(3, 1).unwrap();
/// let reqs = Requirements::new(vec![3, 3, 3]).unwrap();
///
/// let seed = build_initial_assignment(&grid, &reqs);
/// assert!(seed.is_complete());
/// assert_eq!(seed.assignment.player_scores(&grid), vec![3, 3, 3]);
/// ```
pub fn build_initial_assignment(grid: &Grid, requirements: &Requirements) -> Seed {
    let start = Instant::now();
    let size = grid.size();
    let players = requirements.player_count();

    info!(
        event = "phase_start",
        phase = "Construction Heuristic",
        phase_index = 0u64,
    );

    let weights = grid.weights();
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].cmp(&weights[a]).then(b.cmp(&a)));

    let upper: Vec<i64> = (0..players).map(|k| requirements.upper_bound(k)).collect();
    let mut scores = vec![0i64; players];
    let mut satisfied = vec![false; players];
    let mut assignment = Assignment::new(size, players);
    let mut steps = 0u64;

    for index in order {
        if satisfied.iter().all(|&s| s) {
            break;
        }
        steps += 1;
        let weight = i64::from(weights[index]);

        let chosen = (0..players)
            .filter(|&k| !satisfied[k] && scores[k] + weight <= upper[k])
            .min_by_key(|&k| (upper[k] - scores[k], k));

        if let Some(k) = chosen {
            assignment.set(Cell::from_index(index, size), player_id(k));
            scores[k] += weight;
            satisfied[k] = scores[k] >= requirements.get(k);
        }
    }

    let mut overshoot = Vec::new();
    for k in 0..players {
        if satisfied[k] || assignment.cells_of(player_id(k)).next().is_some() {
            continue;
        }
        let lightest = (0..weights.len())
            .filter(|&i| weights[i] > 0 && assignment.as_slice()[i] == UNASSIGNED)
            .min_by_key(|&i| (weights[i], i));
        if let Some(index) = lightest {
            assignment.set(Cell::from_index(index, size), player_id(k));
            scores[k] += i64::from(weights[index]);
            satisfied[k] = scores[k] >= requirements.get(k);
            if scores[k] > upper[k] {
                overshoot.push(k);
            }
        }
    }
    if !overshoot.is_empty() {
        let players_over: Vec<usize> = overshoot.iter().map(|k| k + 1).collect();
        warn!(
            event = "seed_overshoot",
            overshoot = ?players_over,
            "players with no fitting cell received one above their upper bound"
        );
    }

    let unsatisfied: Vec<usize> = (0..players).filter(|&k| !satisfied[k]).collect();
    if !unsatisfied.is_empty() {
        let players_short: Vec<usize> = unsatisfied.iter().map(|k| k + 1).collect();
        warn!(
            event = "no_feasible_seed",
            unsatisfied = ?players_short,
            "initial assignment leaves players below their requirement"
        );
    }

    info!(
        event = "phase_end",
        phase = "Construction Heuristic",
        phase_index = 0u64,
        duration_ms = start.elapsed().as_millis() as u64,
        steps = steps,
        assigned = assignment.assigned_count() as u64,
    );

    Seed {
        assignment,
        unsatisfied,
        overshoot,
    }
}
