//! Remaining-cost estimates used to order the frontier.

use std::fmt;
use std::str::FromStr;

use crate::puzzle::Board;

/// Selects the estimate the search ranks nodes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// Count of tiles out of place, see [`misplaced_tiles`].
    Misplaced,
    /// Sum of grid distances to each tile's home, see [`manhattan_distance`].
    #[default]
    Manhattan,
}

impl Heuristic {
    /// Map the numeric selector used by callers (0 = misplaced,
    /// 1 = Manhattan).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Misplaced),
            1 => Some(Self::Manhattan),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Misplaced => 0,
            Self::Manhattan => 1,
        }
    }

    pub fn evaluate(self, board: &Board) -> u32 {
        match self {
            Self::Misplaced => misplaced_tiles(board),
            Self::Manhattan => manhattan_distance(board),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misplaced => f.write_str("misplaced"),
            Self::Manhattan => f.write_str("manhattan"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "misplaced" | "0" => Ok(Self::Misplaced),
            "manhattan" | "1" => Ok(Self::Manhattan),
            other => Err(format!("unknown heuristic '{other}'")),
        }
    }
}

/// Number of cells whose value differs from their row-major index.
///
/// The blank is counted like any tile, then one is taken off whenever the
/// blank is not in the top-left cell. The blank is out of place exactly in
/// that case, so the result never counts it.
pub fn misplaced_tiles(board: &Board) -> u32 {
    let cells = board.cells();
    let count = cells
        .iter()
        .enumerate()
        .filter(|&(index, &value)| value as usize != index)
        .count() as u32;

    if cells.first() == Some(&0) {
        count
    } else {
        count - 1
    }
}

/// Sum over every cell, blank included, of the row and column distance to
/// where its value sits in the goal.
pub fn manhattan_distance(board: &Board) -> u32 {
    let size = board.size();
    let mut distance = 0;
    for (row, cells) in board.rows().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            let target_row = value as usize / size;
            let target_col = value as usize % size;
            distance += row.abs_diff(target_row) + col.abs_diff(target_col);
        }
    }
    distance as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: &[[u32; 3]; 3]) -> Board {
        let rows: Vec<Vec<u32>> = cells.iter().map(|r| r.to_vec()).collect();
        Board::from_rows(3, &rows).unwrap()
    }

    #[test]
    fn goal_scores_zero() {
        let goal = Board::goal(4).unwrap();
        assert_eq!(misplaced_tiles(&goal), 0);
        assert_eq!(manhattan_distance(&goal), 0);
    }

    #[test]
    fn manhattan_counts_the_blank() {
        let one_off = board(&[[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(manhattan_distance(&one_off), 2);
        assert_eq!(misplaced_tiles(&one_off), 1);
    }

    #[test]
    fn known_boards() {
        let b = board(&[[2, 3, 7], [1, 8, 0], [6, 5, 4]]);
        assert_eq!(misplaced_tiles(&b), 7);
        assert_eq!(manhattan_distance(&b), 18);

        let b = board(&[[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert_eq!(misplaced_tiles(&b), 7);
        assert_eq!(manhattan_distance(&b), 14);
    }

    #[test]
    fn misplaced_keeps_raw_count_when_blank_is_home() {
        // Only 1 and 2 are swapped; the blank is already home.
        let b = board(&[[0, 2, 1], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(misplaced_tiles(&b), 2);
    }

    #[test]
    fn codes_round_trip() {
        for h in [Heuristic::Misplaced, Heuristic::Manhattan] {
            assert_eq!(Heuristic::from_code(h.code()), Some(h));
            assert_eq!(h.to_string().parse::<Heuristic>(), Ok(h));
        }
        assert_eq!(Heuristic::from_code(2), None);
        assert!("euclid".parse::<Heuristic>().is_err());
    }
}
