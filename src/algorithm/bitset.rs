use crate::spatial::grid::{CELL_COUNT, Position};
use bitvec::prelude::*;
use std::fmt;

type CellBits = BitArr!(for CELL_COUNT, in u64, Lsb0);

/// Fixed-size set of board cells keyed by linear index
///
/// Backs the board's occupancy mask and the generator's placement mask.
/// Positions off the board are ignored on insert and never reported as members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBitset {
    bits: CellBits,
}

impl Default for CellBitset {
    fn default() -> Self {
        Self::new()
    }
}

impl CellBitset {
    /// Create a set with no cells present
    pub const fn new() -> Self {
        Self {
            bits: CellBits::ZERO,
        }
    }

    /// Create a set containing every cell of the board
    pub fn full() -> Self {
        let mut set = Self::new();
        for index in 0..CELL_COUNT {
            set.set_index(index, true);
        }
        set
    }

    /// Add a position
    pub fn insert(&mut self, position: Position) {
        if let Some(index) = position.index() {
            self.set_index(index, true);
        }
    }

    /// Remove a position
    pub fn remove(&mut self, position: Position) {
        if let Some(index) = position.index() {
            self.set_index(index, false);
        }
    }

    /// Test membership
    pub fn contains(&self, position: Position) -> bool {
        position
            .index()
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Member positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.bits.iter_ones().filter_map(Position::from_index)
    }

    fn set_index(&mut self, index: usize, value: bool) {
        if let Some(mut bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }
}

impl fmt::Display for CellBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellBitset({} cells: [", self.count())?;
        for (i, position) in self.positions().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{position}")?;
        }
        write!(f, "])")
    }
}
