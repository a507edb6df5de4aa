use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::config::{CELL_DELIMITER, MIN_SIZE};
use crate::error::{PuzzleError, Result};

/// Direction the blank travels in a single slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Successor generation order. Selection ties are broken by insertion
    /// order, so changing this changes which of several optimal paths wins.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, col)` displacement of the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Check that `rows` is a valid `size`×`size` board.
///
/// Pure predicate over [`Board::from_rows`].
pub fn validate_state(size: usize, rows: &[Vec<u32>]) -> bool {
    Board::from_rows(size, rows).is_ok()
}

/// An immutable square puzzle configuration.
///
/// Cells are stored row-major; 0 is the blank. The goal has 0 in the top-left
/// corner followed by `1..size²` in order. Equality and hashing look at the
/// tiles only, so two boards reached by different paths compare equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
    blank: (usize, usize),
}

impl Board {
    /// Build a board from rows, rejecting anything that is not a permutation
    /// of `0..size²` laid out as `size` rows of `size` cells.
    ///
    /// # Errors
    ///
    /// Returns the first [`PuzzleError`] found, checking size, row count, row
    /// lengths and then tile presence in that order.
    pub fn from_rows(size: usize, rows: &[Vec<u32>]) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(PuzzleError::SizeTooSmall {
                size,
                min: MIN_SIZE,
            });
        }
        if rows.len() != size {
            return Err(PuzzleError::RowCount {
                expected: size,
                found: rows.len(),
            });
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != size)
        {
            return Err(PuzzleError::RowLength {
                row,
                expected: size,
                found,
            });
        }

        let area = size * size;
        let mut present = vec![false; area];
        for &value in rows.iter().flatten() {
            if let Some(slot) = present.get_mut(value as usize) {
                *slot = true;
            }
        }
        if let Some(missing) = present.iter().position(|&seen| !seen) {
            return Err(PuzzleError::MissingValue {
                value: missing as u32,
            });
        }

        let cells: Vec<u32> = rows.iter().flatten().copied().collect();
        Ok(Self::from_cells(size, cells))
    }

    /// The solved board of the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::SizeTooSmall`] below the minimum size.
    pub fn goal(size: usize) -> Result<Self> {
        if size < MIN_SIZE {
            return Err(PuzzleError::SizeTooSmall {
                size,
                min: MIN_SIZE,
            });
        }
        Ok(Self::from_cells(size, (0..(size * size) as u32).collect()))
    }

    // Callers guarantee `cells` is a permutation of 0..size².
    fn from_cells(size: usize, cells: Vec<u32>) -> Self {
        let index = cells.iter().position(|&v| v == 0).unwrap_or_default();
        Self {
            size,
            cells,
            blank: (index / size, index % size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        self.blank
    }

    /// Tile at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.size + col]
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    pub fn as_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// True iff the cells read `0, 1, …, size²-1` row-major.
    pub fn is_goal(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(index, &value)| value as usize == index)
    }

    /// The board after sliding the blank in `direction`, or `None` at an edge.
    pub fn try_move(&self, direction: Move) -> Option<Self> {
        let (dr, dc) = direction.as_offset();
        let (row, col) = self.blank;

        let new_row = row.checked_add_signed(dr).filter(|&r| r < self.size)?;
        let new_col = col.checked_add_signed(dc).filter(|&c| c < self.size)?;

        let mut cells = self.cells.clone();
        cells.swap(row * self.size + col, new_row * self.size + new_col);
        Some(Self {
            size: self.size,
            cells,
            blank: (new_row, new_col),
        })
    }

    /// Every board one slide away, tagged with the move taken, in
    /// [`Move::ALL`] order. Two to four entries depending on the blank.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> + '_ {
        Move::ALL
            .into_iter()
            .filter_map(move |direction| self.try_move(direction).map(|next| (direction, next)))
    }

    /// Whether the goal is reachable from this board at all.
    ///
    /// Uses the inversion-parity argument: on odd widths every slide keeps
    /// the inversion parity; on even widths a vertical slide flips it and
    /// moves the blank one row, so inversions plus blank row is invariant.
    /// The goal has no inversions and the blank on row 0.
    pub fn is_solvable(&self) -> bool {
        let inversions = count_inversions(&self.cells);
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank.0) % 2 == 0
        }
    }

    /// A uniformly random solvable board.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::SizeTooSmall`] below the minimum size.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let mut cells = Self::goal(size)?.cells;
        loop {
            cells.shuffle(rng);
            let board = Self::from_cells(size, cells.clone());
            if board.is_solvable() {
                return Ok(board);
            }
        }
    }

    /// A board reached from the goal by `moves` random slides, never
    /// immediately undoing the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::SizeTooSmall`] below the minimum size.
    pub fn scramble<R: Rng + ?Sized>(size: usize, moves: usize, rng: &mut R) -> Result<Self> {
        let mut board = Self::goal(size)?;
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let options: Vec<(Move, Board)> = board
                .successors()
                .filter(|(direction, _)| last.map_or(true, |prev| *direction != prev.opposite()))
                .collect();
            // A corner blank still has two exits, so one always survives the filter.
            if let Some((direction, next)) = options.choose(rng) {
                last = Some(*direction);
                board = next.clone();
            }
        }

        Ok(board)
    }
}

fn count_inversions(cells: &[u32]) -> usize {
    cells
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            cells[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for val in row {
                if !first {
                    f.write_str(CELL_DELIMITER)?;
                }
                first = false;
                write!(f, "{}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("rows", &self.as_rows())
            .finish()
    }
}
