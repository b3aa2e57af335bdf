//! Board storage: one tile per cell plus the counters the matching rules depend on
//!
//! A board is built once from a validated grid, with lock flags and unlock
//! distances computed for every cell, and is then mutated in place by the search.
//! Every mutation here has an exact inverse so undo never needs a copy.

use crate::algorithm::bitset::CellBitset;
use crate::algorithm::{lock, propagation};
use crate::io::error::{Result, SolverError, corrupt_state};
use crate::spatial::grid::{CELL_COUNT, Position, ROW_COUNT, ROW_LENGTHS, all_positions};
use crate::spatial::tiles::{AlchemyStage, STAGE_COUNT, TileKind};

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    /// Kind of tile, [`TileKind::Empty`] when the cell is vacant
    pub kind: TileKind,
    /// Whether the tile currently cannot be selected
    pub locked: bool,
    /// Path distance to the metal of each stage, slot `s - 1` for stage `s`
    ///
    /// Zero means the metal was not reached, or this cell holds it.
    pub distances: [u8; STAGE_COUNT],
}

impl Tile {
    /// Distance to the metal that is reachable next at `stage`
    pub fn distance_to_next(&self, stage: AlchemyStage) -> u8 {
        self.distances
            .get(stage.target_slot())
            .copied()
            .unwrap_or(0)
    }
}

/// The 91-cell puzzle board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; CELL_COUNT],
    occupied: CellBitset,
    remaining: [usize; TileKind::COUNT],
    stage: AlchemyStage,
    white_balance: i32,
}

impl Board {
    /// A board with every cell vacant at stage zero
    pub fn empty() -> Self {
        Self {
            tiles: [Tile::default(); CELL_COUNT],
            occupied: CellBitset::new(),
            remaining: [0; TileKind::COUNT],
            stage: AlchemyStage::START,
            white_balance: 0,
        }
    }

    /// Build a board from rows of board-file labels
    ///
    /// # Errors
    ///
    /// Returns an error if the row count or any row length is wrong, or if a label
    /// is not a recognized tile kind
    pub fn from_labels<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self> {
        check_shape(rows)?;
        let mut kinds = Vec::with_capacity(ROW_COUNT);
        for (row, labels) in rows.iter().enumerate() {
            let mut parsed = Vec::with_capacity(labels.len());
            for (col, label) in labels.iter().enumerate() {
                let label = label.as_ref();
                let kind = TileKind::from_label(label).ok_or_else(|| SolverError::UnknownTile {
                    label: label.to_string(),
                    position: Some(Position::new(row, col)),
                })?;
                parsed.push(kind);
            }
            kinds.push(parsed);
        }
        Self::from_kinds(&kinds)
    }

    /// Build a board from rows of tile kinds
    ///
    /// Lock flags and unlock distances are computed for every cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the row count or any row length is wrong
    pub fn from_kinds(rows: &[Vec<TileKind>]) -> Result<Self> {
        check_shape(rows)?;
        let mut board = Self::empty();
        for (row, kinds) in rows.iter().enumerate() {
            for (col, &kind) in kinds.iter().enumerate() {
                board.put(Position::new(row, col), kind)?;
            }
        }

        for position in all_positions() {
            board.refresh_lock(position);
        }

        let distances = propagation::unlock_distances(&board);
        for (tile, field) in board.tiles.iter_mut().zip(distances) {
            tile.distances = field;
        }

        Ok(board)
    }

    /// The tile at a position, `None` off the board
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        position.index().and_then(|index| self.tiles.get(index))
    }

    /// Kind at a position, [`TileKind::Empty`] off the board
    pub fn kind_at(&self, position: Position) -> TileKind {
        self.tile(position).map_or(TileKind::Empty, |tile| tile.kind)
    }

    /// Stored lock flag at a position
    pub fn is_locked(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.locked)
    }

    /// Number of metals consumed so far
    pub const fn stage(&self) -> AlchemyStage {
        self.stage
    }

    /// Tiles of a kind still on the board
    pub fn remaining(&self, kind: TileKind) -> usize {
        self.remaining.get(kind.index()).copied().unwrap_or(0)
    }

    /// Running balance of white tiles spent on cardinal elements
    pub const fn white_balance(&self) -> i32 {
        self.white_balance
    }

    /// Occupied cells
    pub const fn occupancy(&self) -> &CellBitset {
        &self.occupied
    }

    /// Whether every tile has been removed
    pub fn is_cleared(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Number of tiles on the board
    pub fn tile_count(&self) -> usize {
        self.occupied.count()
    }

    /// Present tiles whose lock flag is clear, row-major
    pub fn unlocked_tiles(&self) -> impl Iterator<Item = (Position, TileKind)> + '_ {
        self.occupied.positions().filter_map(|position| {
            self.tile(position)
                .filter(|tile| !tile.locked)
                .map(|tile| (position, tile.kind))
        })
    }

    /// Cells holding a given kind, row-major
    pub fn positions_of(&self, kind: TileKind) -> impl Iterator<Item = Position> + '_ {
        self.occupied
            .positions()
            .filter(move |&position| self.kind_at(position) == kind)
    }

    /// Tile kinds laid out as board-file rows
    pub fn to_kinds(&self) -> Vec<Vec<TileKind>> {
        ROW_LENGTHS
            .iter()
            .enumerate()
            .map(|(row, &length)| {
                (0..length)
                    .map(|col| self.kind_at(Position::new(row, col)))
                    .collect()
            })
            .collect()
    }

    /// Recompute and store the lock flag of a cell, returning the new flag
    pub fn refresh_lock(&mut self, position: Position) -> bool {
        let locked = lock::evaluate_lock(self, position);
        if let Some(tile) = self.tile_mut(position) {
            tile.locked = locked;
        }
        locked
    }

    /// Remove the tile at a position, keeping occupancy and lock flags coherent
    ///
    /// Counters are left untouched; see [`Board::consume`].
    ///
    /// # Errors
    ///
    /// Returns an invariant error if the cell is empty, the tile is locked, or the
    /// tile is a metal that is not next on the unlock frontier
    pub(crate) fn take(&mut self, position: Position) -> Result<TileKind> {
        let stage = self.stage;
        let tile = self
            .tile_mut(position)
            .ok_or(SolverError::InvalidPosition { position })?;

        if !tile.kind.is_present() {
            return Err(SolverError::EmptyCellRemoval { position });
        }
        if tile.locked {
            return Err(SolverError::LockedTileRemoval {
                position,
                kind: tile.kind,
                stage,
            });
        }
        if let Some(metal_stage) = tile.kind.stage() {
            if Some(metal_stage) != stage.advanced().map(AlchemyStage::value) {
                return Err(SolverError::StageMismatch {
                    position,
                    kind: tile.kind,
                    stage,
                });
            }
        }

        let kind = tile.kind;
        tile.kind = TileKind::Empty;
        self.occupied.remove(position);
        Ok(kind)
    }

    /// Put a tile back into a vacant cell; its lock flag is left as it was taken
    ///
    /// # Errors
    ///
    /// Returns an error if the position is off the board or the cell is occupied
    pub(crate) fn restore(&mut self, position: Position, kind: TileKind) -> Result<()> {
        let tile = self
            .tile_mut(position)
            .ok_or(SolverError::InvalidPosition { position })?;
        if tile.kind.is_present() {
            return Err(corrupt_state(
                "restore",
                &format!("cell {position} already holds '{}'", tile.kind),
            ));
        }
        tile.kind = kind;
        if kind.is_present() {
            self.occupied.insert(position);
        }
        Ok(())
    }

    /// Force a lock flag without evaluating it
    pub(crate) fn set_locked(&mut self, position: Position, locked: bool) {
        if let Some(tile) = self.tile_mut(position) {
            tile.locked = locked;
        }
    }

    /// Account for a removed pair: counts down, then the white balance
    ///
    /// A solo removal passes the same kind twice and is counted once.
    ///
    /// # Errors
    ///
    /// Returns an invariant error if a count would go below zero
    pub(crate) fn consume(&mut self, first: TileKind, second: Option<TileKind>) -> Result<()> {
        self.decrement(first)?;
        if let Some(second) = second {
            self.decrement(second)?;
            self.rebalance_white(first, second);
        }
        Ok(())
    }

    /// Exact inverse of [`Board::consume`]
    pub(crate) fn unconsume(&mut self, first: TileKind, second: Option<TileKind>) {
        self.increment(first);
        if let Some(second) = second {
            self.increment(second);
            self.rebalance_white(first, second);
        }
    }

    /// Move the unlock frontier one stage forward
    ///
    /// # Errors
    ///
    /// Returns an invariant error past the final stage
    pub(crate) fn advance_stage(&mut self) -> Result<()> {
        self.stage = self
            .stage
            .advanced()
            .ok_or_else(|| corrupt_state("advance_stage", &"stage is already final"))?;
        Ok(())
    }

    /// Move the unlock frontier one stage back
    ///
    /// # Errors
    ///
    /// Returns an invariant error before the first stage
    pub(crate) fn retreat_stage(&mut self) -> Result<()> {
        self.stage = self
            .stage
            .retreated()
            .ok_or_else(|| corrupt_state("retreat_stage", &"stage is already zero"))?;
        Ok(())
    }

    // Parity of the partner's remaining count flips between consume and unconsume,
    // so the same rule applied after each makes the two deltas cancel
    fn rebalance_white(&mut self, first: TileKind, second: TileKind) {
        let partner = match (first, second) {
            (TileKind::White, other) | (other, TileKind::White) if other.is_cardinal() => other,
            _ => return,
        };
        if self.remaining(partner) % 2 == 1 {
            self.white_balance += 1;
        } else {
            self.white_balance -= 1;
        }
    }

    fn decrement(&mut self, kind: TileKind) -> Result<()> {
        let count = self
            .remaining
            .get_mut(kind.index())
            .ok_or_else(|| corrupt_state("consume", &format!("no counter for '{kind}'")))?;
        *count = count
            .checked_sub(1)
            .ok_or_else(|| corrupt_state("consume", &format!("no '{kind}' tiles remain")))?;
        Ok(())
    }

    fn increment(&mut self, kind: TileKind) {
        if let Some(count) = self.remaining.get_mut(kind.index()) {
            *count += 1;
        }
    }

    fn put(&mut self, position: Position, kind: TileKind) -> Result<()> {
        self.restore(position, kind)?;
        if kind.is_present() {
            self.increment(kind);
        }
        Ok(())
    }

    fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        position.index().and_then(|index| self.tiles.get_mut(index))
    }
}

fn check_shape<T>(rows: &[Vec<T>]) -> Result<()> {
    if rows.len() != ROW_COUNT {
        return Err(SolverError::InvalidRowCount {
            expected: ROW_COUNT,
            found: rows.len(),
        });
    }
    for (row, (cells, &expected)) in rows.iter().zip(ROW_LENGTHS.iter()).enumerate() {
        if cells.len() != expected {
            return Err(SolverError::InvalidRowLength {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(())
}
