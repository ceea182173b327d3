//! Scoring for candidate assignments.
//!
//! Two compactness objectives are supported:
//! - edge difference: adjacent cell pairs owned by different ids
//! - bounding-box extent: per-player box height + width, summed
//!
//! Both are "lower is better". [`AssignmentScore`] combines the chosen
//! objective with the score-band violation into a two-level, higher-is-better
//! score for reporting and comparison.

mod assignment_score;
mod band;
mod edge;
mod extent;
mod objective;

#[cfg(test)]
mod tests;

pub use assignment_score::{AssignmentScore, ScoreParseError};
pub use band::{band_violation, evaluate, player_scores};
pub use edge::{local_score, total_edge_diff};
pub use extent::{bounding_box_extent, bounding_boxes, BoundingBox};
pub use objective::Objective;
