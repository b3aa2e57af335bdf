use crate::io::error::{Result, SolverError};
use crate::spatial::board::Board;
use crate::spatial::grid::Position;
use crate::spatial::tiles::TileKind;

/// Live index from tile kind to the unlocked positions holding that kind
///
/// Built once from the board when a search starts and then kept in step with every
/// removal and restoration. Removal swaps the last entry into the hole, so callers
/// re-sort after each batch of changes to keep candidate generation deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PossibilityIndex {
    by_kind: [Vec<Position>; TileKind::COUNT],
}

impl PossibilityIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every unlocked tile on the board, sorted
    pub fn from_board(board: &Board) -> Self {
        let mut index = Self::new();
        for (position, kind) in board.unlocked_tiles() {
            index.insert(kind, position);
        }
        index.sort();
        index
    }

    /// Append a position under a kind
    pub fn insert(&mut self, kind: TileKind, position: Position) {
        if let Some(positions) = self.by_kind.get_mut(kind.index()) {
            positions.push(position);
        }
    }

    /// Swap-remove a position from under a kind
    ///
    /// # Errors
    ///
    /// Returns an invariant error if the position is not indexed under `kind`
    pub fn remove(&mut self, kind: TileKind, position: Position) -> Result<()> {
        let positions = self
            .by_kind
            .get_mut(kind.index())
            .ok_or(SolverError::MissingPossibility { position, kind })?;
        let slot = positions
            .iter()
            .position(|&p| p == position)
            .ok_or(SolverError::MissingPossibility { position, kind })?;
        positions.swap_remove(slot);
        Ok(())
    }

    /// Restore row-major order within every kind
    pub fn sort(&mut self) {
        for positions in &mut self.by_kind {
            positions.sort_unstable();
        }
    }

    /// Positions indexed under a kind
    pub fn positions(&self, kind: TileKind) -> &[Position] {
        self.by_kind.get(kind.index()).map_or(&[], Vec::as_slice)
    }

    /// Whether no selectable tile remains
    pub fn is_empty(&self) -> bool {
        self.by_kind.iter().all(Vec::is_empty)
    }

    /// Total number of indexed positions
    pub fn len(&self) -> usize {
        self.by_kind.iter().map(Vec::len).sum()
    }
}
