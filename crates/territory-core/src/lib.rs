//! Territory Core - grid model, assignment and scoring
//!
//! This crate provides the fundamental abstractions for Territory:
//! - [`Grid`] and [`Requirements`], the immutable problem data
//! - [`Assignment`], the mutable cell-to-player mapping
//! - Scoring functions (edge difference, bounding-box extent, score band)
//! - The [`TerritoryError`] taxonomy shared by every crate

pub mod assignment;
pub mod error;
pub mod grid;
pub mod problem;
pub mod requirements;
pub mod score;

pub use assignment::{player_id, Assignment, PlayerId, UNASSIGNED};
pub use error::{Result, TerritoryError};
pub use grid::{Cell, Grid};
pub use problem::Problem;
pub use requirements::Requirements;
pub use score::{
    band_violation, bounding_box_extent, bounding_boxes, evaluate, local_score, player_scores,
    total_edge_diff, AssignmentScore, BoundingBox, Objective, ScoreParseError,
};
