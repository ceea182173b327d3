//! Local search phase
//!
//! Improves an existing assignment by random swap and recolor moves that are
//! kept only on strict improvement of the edge difference (hill climbing).
//! The search never looks at the score band; it is meant to refine a seed
//! that already sits close to the band.

pub mod moves;
mod phase;

pub use moves::{CellMove, MoveOutcome, RecolorMove, SwapMove};
pub use phase::{run_local_search, LocalSearch};

#[cfg(test)]
mod tests;
