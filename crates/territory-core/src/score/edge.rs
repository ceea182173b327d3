//! Edge-difference scoring.

use crate::assignment::Assignment;
use crate::grid::Cell;

/// Counts the existing 4-neighbours of `cell` whose id differs from its own.
///
/// Reads the assignment as it is at call time. The result is in `0..=4`;
/// edge and corner cells simply have fewer neighbours to compare.
///
/// # Examples
///
/// ```
/// use territory_core::{local_score, Assignment, Cell};
///
/// let a = Assignment::from_rows(vec![
///     vec![1, 1, 2],
///     vec![1, 2, 2],
///     vec![0, 2, 2],
/// ], 2).unwrap();
///
/// assert_eq!(local_score(&a, Cell::new(0, 0)), 0);
/// assert_eq!(local_score(&a, Cell::new(1, 1)), 2);
/// assert_eq!(local_score(&a, Cell::new(2, 0)), 2);
/// ```
#[inline]
pub fn local_score(assignment: &Assignment, cell: Cell) -> u32 {
    let own = assignment.get(cell);
    cell.neighbors(assignment.size())
        .into_iter()
        .filter(|&n| assignment.get(n) != own)
        .count() as u32
}

/// Counts horizontally and vertically adjacent cell pairs with differing ids.
///
/// Equals the sum of [`local_score`] over all cells divided by two, since
/// every differing pair is seen from both of its cells.
pub fn total_edge_diff(assignment: &Assignment) -> i64 {
    let size = assignment.size();
    let mut total = 0i64;
    for (r, row) in assignment.rows().enumerate() {
        for c in 0..size {
            if c + 1 < size && row[c] != row[c + 1] {
                total += 1;
            }
            if r + 1 < size && row[c] != assignment.get(Cell::new(r + 1, c)) {
                total += 1;
            }
        }
    }
    total
}
