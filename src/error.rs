//! Board validation errors.

use thiserror::Error;

/// Why a grid was rejected as a puzzle board.
///
/// Raised before any search work starts. The driver folds every variant into
/// [`crate::search::SolveStatus::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// Boards smaller than the minimum side length are not puzzles.
    #[error("board size {size} is below the minimum of {min}")]
    SizeTooSmall { size: usize, min: usize },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A tile in `0..size²` does not appear anywhere on the board.
    ///
    /// With the shape already checked this also covers duplicates and
    /// out-of-range values: either one leaves some tile without a cell.
    #[error("tile {value} is missing from the board")]
    MissingValue { value: u32 },
}

/// Convenience alias for board construction results.
pub type Result<T> = std::result::Result<T, PuzzleError>;
