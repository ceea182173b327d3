//! Bounding-box scoring.

use crate::assignment::{Assignment, UNASSIGNED};
use crate::grid::Cell;

/// Smallest axis-aligned rectangle covering a player's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    fn single(cell: Cell) -> Self {
        BoundingBox {
            min_row: cell.row,
            max_row: cell.row,
            min_col: cell.col,
            max_col: cell.col,
        }
    }

    fn include(&mut self, cell: Cell) {
        self.min_row = self.min_row.min(cell.row);
        self.max_row = self.max_row.max(cell.row);
        self.min_col = self.min_col.min(cell.col);
        self.max_col = self.max_col.max(cell.col);
    }

    /// Height plus width, measured in cell steps (a single cell has extent 0).
    pub fn extent(&self) -> i64 {
        ((self.max_row - self.min_row) + (self.max_col - self.min_col)) as i64
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (self.min_row..=self.max_row).contains(&cell.row)
            && (self.min_col..=self.max_col).contains(&cell.col)
    }
}

/// Bounding box of every player, `None` for players without cells.
///
/// Index `k` describes player id `k + 1`.
pub fn bounding_boxes(assignment: &Assignment) -> Vec<Option<BoundingBox>> {
    let mut boxes: Vec<Option<BoundingBox>> = vec![None; assignment.player_count()];
    let size = assignment.size();
    for (index, &player) in assignment.as_slice().iter().enumerate() {
        if player == UNASSIGNED {
            continue;
        }
        let cell = Cell::from_index(index, size);
        let slot = &mut boxes[player as usize - 1];
        if let Some(bbox) = slot {
            bbox.include(cell);
        } else {
            *slot = Some(BoundingBox::single(cell));
        }
    }
    boxes
}

/// Sum over players of `(max_row - min_row) + (max_col - min_col)`.
///
/// Players without any cell contribute nothing.
pub fn bounding_box_extent(assignment: &Assignment) -> i64 {
    bounding_boxes(assignment)
        .iter()
        .flatten()
        .map(BoundingBox::extent)
        .sum()
}
