//! Moves over a cell assignment.
//!
//! Both moves are strictly greedy: they apply themselves, compare the local
//! edge-difference score of the touched cells before and after, and revert
//! unless the score strictly dropped.

mod recolor;
mod swap;

use std::fmt::Debug;

use territory_core::Assignment;

pub use recolor::RecolorMove;
pub use swap::SwapMove;

/// Whether a move was kept or reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The move strictly improved the local score and was kept.
    Accepted,
    /// The move did not improve and the assignment was restored.
    Rejected,
}

impl MoveOutcome {
    #[inline]
    pub fn is_accepted(self) -> bool {
        self == MoveOutcome::Accepted
    }
}

/// A tentative change to an [`Assignment`].
///
/// # Implementation Notes
/// - A rejected move must leave the assignment exactly as it found it
/// - An accepted move must strictly lower the total edge difference
pub trait CellMove: Debug {
    /// Applies the move, keeping it only on strict local improvement.
    fn try_apply(&self, assignment: &mut Assignment) -> MoveOutcome;
}
