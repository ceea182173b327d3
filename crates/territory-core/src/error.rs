//! Error types for Territory

use thiserror::Error;

/// Main error type for Territory operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TerritoryError {
    /// The grid or requirements cannot describe a solvable problem.
    ///
    /// Raised before any solve attempt: empty or non-square grid, no players,
    /// a non-positive requirement, or a requirement larger than the whole grid.
    #[error("Infeasible input: {0}")]
    InfeasibleInput(String),

    /// A player id outside `0..=player_count`.
    #[error("Invalid player id {player}: expected 0..={player_count}")]
    InvalidPlayer { player: u32, player_count: usize },

    /// A cell outside the grid.
    #[error("Cell ({row}, {col}) is outside a {size}x{size} grid")]
    CellOutOfRange { row: usize, col: usize, size: usize },

    /// Failure reported by, or detected in the answer of, a MIP backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Invalid solver configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Territory operations
pub type Result<T> = std::result::Result<T, TerritoryError>;
