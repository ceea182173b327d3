//! Assignment fixtures.

use territory_core::{Assignment, PlayerId};

/// Horizontal stripes: row `r` belongs to player `r % players + 1`.
pub fn row_stripes(size: usize, players: usize) -> Assignment {
    let rows: Vec<Vec<PlayerId>> = (0..size)
        .map(|r| vec![(r % players + 1) as PlayerId; size])
        .collect();
    Assignment::from_rows(rows, players).expect("valid assignment")
}

/// Alternating players 1 and 2, so every adjacent pair differs.
pub fn checkerboard(size: usize) -> Assignment {
    let rows: Vec<Vec<PlayerId>> = (0..size)
        .map(|r| (0..size).map(|c| ((r + c) % 2 + 1) as PlayerId).collect())
        .collect();
    Assignment::from_rows(rows, 2).expect("valid assignment")
}
