//! Compactness objective selector.

use std::fmt;

use crate::assignment::Assignment;

use super::{bounding_box_extent, total_edge_diff};

/// Which compactness measure to minimize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Objective {
    /// Number of adjacent cell pairs owned by different ids.
    #[default]
    EdgeDiff,

    /// Sum of per-player bounding-box height + width.
    BoundingBox,
}

impl Objective {
    /// Value of this objective for an assignment (lower is better).
    pub fn evaluate(self, assignment: &Assignment) -> i64 {
        match self {
            Objective::EdgeDiff => total_edge_diff(assignment),
            Objective::BoundingBox => bounding_box_extent(assignment),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Objective::EdgeDiff => "edge_diff",
            Objective::BoundingBox => "bounding_box",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
