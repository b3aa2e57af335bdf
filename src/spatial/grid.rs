//! Hexagonal grid geometry: row layout, linear indexing and neighbor directions
//!
//! The board is a hexagon of side six laid out as eleven rows that widen to the
//! middle row and narrow again. Rows are left-aligned in storage, so the column
//! offset of a diagonal neighbor depends on whether the neighboring row is wider
//! or narrower than the current one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows on the board
pub const ROW_COUNT: usize = 11;

/// Number of cells in each row, top to bottom
pub const ROW_LENGTHS: [usize; ROW_COUNT] = [6, 7, 8, 9, 10, 11, 10, 9, 8, 7, 6];

/// Linear index of the first cell of each row, with the total cell count appended
pub const ROW_STARTS: [usize; ROW_COUNT + 1] = [0, 6, 13, 21, 30, 40, 51, 61, 70, 78, 85, 91];

/// Total number of cells on the board
pub const CELL_COUNT: usize = 91;

/// The widest row; rows above it grow downwards, rows below it shrink
pub const MIDDLE_ROW: usize = ROW_COUNT / 2;

/// The six neighbor directions in the fixed order used by the lock ring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row above, towards the left
    UpperLeft,
    /// Row above, towards the right
    UpperRight,
    /// Same row, next column
    Right,
    /// Row below, towards the right
    LowerRight,
    /// Row below, towards the left
    LowerLeft,
    /// Same row, previous column
    Left,
}

impl Direction {
    /// All directions, clockwise from the upper-left neighbor
    pub const ALL: [Self; 6] = [
        Self::UpperLeft,
        Self::UpperRight,
        Self::Right,
        Self::LowerRight,
        Self::LowerLeft,
        Self::Left,
    ];
}

/// A cell on the board addressed by row and column
///
/// Ordering is row-major, which is the order the possibility index keeps.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index, 0 at the top
    pub row: usize,
    /// Column index within the row, 0 at the left
    pub col: usize,
}

impl Position {
    /// Create a position without validating it
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Create a position from signed coordinates, returning `None` off the board
    pub const fn checked(row: isize, col: isize) -> Option<Self> {
        if row < 0 || col < 0 {
            return None;
        }
        let position = Self::new(row as usize, col as usize);
        if position.is_valid() {
            Some(position)
        } else {
            None
        }
    }

    /// Whether the row exists and the column lies within that row
    pub const fn is_valid(self) -> bool {
        self.row < ROW_COUNT && self.col < row_length(self.row)
    }

    /// Flat storage index in `0..CELL_COUNT`
    ///
    /// Returns `None` for positions off the board.
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(row_start(self.row) + self.col)
        } else {
            None
        }
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let row = ROW_STARTS
            .iter()
            .skip(1)
            .position(|&next_start| index < next_start)?;
        Some(Self::new(row, index - row_start(row)))
    }

    /// The neighbor in one direction, or `None` if it falls off the board
    pub const fn neighbor(self, direction: Direction) -> Option<Self> {
        let row = self.row as isize;
        let col = self.col as isize;
        // Row above is wider only below the middle; row below is narrower from the middle on
        let upper_shift = (self.row > MIDDLE_ROW) as isize;
        let lower_shift = (self.row >= MIDDLE_ROW) as isize;

        let (target_row, target_col) = match direction {
            Direction::UpperLeft => (row - 1, col - 1 + upper_shift),
            Direction::UpperRight => (row - 1, col + upper_shift),
            Direction::Right => (row, col + 1),
            Direction::LowerRight => (row + 1, col + 1 - lower_shift),
            Direction::LowerLeft => (row + 1, col - lower_shift),
            Direction::Left => (row, col - 1),
        };
        Self::checked(target_row, target_col)
    }

    /// All six neighbor slots in [`Direction::ALL`] order, off-board slots as `None`
    pub const fn neighbor_slots(self) -> [Option<Self>; 6] {
        [
            self.neighbor(Direction::UpperLeft),
            self.neighbor(Direction::UpperRight),
            self.neighbor(Direction::Right),
            self.neighbor(Direction::LowerRight),
            self.neighbor(Direction::LowerLeft),
            self.neighbor(Direction::Left),
        ]
    }

    /// Neighbors that exist on the board, in direction order
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        self.neighbor_slots().into_iter().flatten()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Length of a row, 0 for rows off the board
pub const fn row_length(row: usize) -> usize {
    if row < ROW_COUNT { ROW_LENGTHS[row] } else { 0 }
}

const fn row_start(row: usize) -> usize {
    if row <= ROW_COUNT { ROW_STARTS[row] } else { CELL_COUNT }
}

/// Every valid position in row-major order
pub fn all_positions() -> impl Iterator<Item = Position> {
    ROW_LENGTHS
        .iter()
        .enumerate()
        .flat_map(|(row, &length)| (0..length).map(move |col| Position::new(row, col)))
}
