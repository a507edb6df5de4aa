//! Sliding-tile puzzle solver built on best-first search.
//!
//! Boards are `N`×`N` permutations of `0..N²` with 0 as the blank; the goal
//! puts the blank top-left and the tiles in row-major order. The search
//! ranks open boards by `f = g + h` using either heuristic in
//! [`heuristic`], merges duplicate boards by keeping the cheaper path, and
//! never reopens a board once expanded.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod puzzle;
pub mod render;
pub mod search;

pub use config::SearchConfig;
pub use error::{PuzzleError, Result};
pub use heuristic::{manhattan_distance, misplaced_tiles, Heuristic};
pub use puzzle::{validate_state, Board, Move};
pub use search::{solve_puzzle, solve_with_config, SolveReport, SolveStatus};
