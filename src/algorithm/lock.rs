//! Lock predicate: whether a tile can currently be lifted off the board
//!
//! A tile is free when it has a clear arc of three consecutive empty neighbor
//! directions to slide out through. Metals are additionally held back until the
//! unlock frontier reaches the stage just before theirs.

use crate::algorithm::bitset::CellBitset;
use crate::spatial::board::Board;
use crate::spatial::grid::Position;

/// Evaluate the lock predicate for a cell against the board's current contents
///
/// Empty cells are never locked. Metals more than one stage past the frontier are
/// always locked. Everything else is decided by [`is_geometrically_blocked`].
pub fn evaluate_lock(board: &Board, position: Position) -> bool {
    let kind = board.kind_at(position);
    if !kind.is_present() {
        return false;
    }

    if let Some(stage) = kind.stage() {
        if board.stage().is_out_of_reach(stage) {
            return true;
        }
    }

    is_geometrically_blocked(occupancy_ring(board.occupancy(), position))
}

/// Occupancy of the six neighbor directions as a bit ring
///
/// Bit `i` is set when the neighbor in `Direction::ALL[i]` exists and holds a tile.
pub fn occupancy_ring(occupied: &CellBitset, position: Position) -> u8 {
    position
        .neighbor_slots()
        .iter()
        .enumerate()
        .fold(0, |ring, (bit, slot)| match slot {
            Some(neighbor) if occupied.contains(*neighbor) => ring | (1 << bit),
            _ => ring,
        })
}

/// Whether an occupancy ring leaves no three-direction escape arc
///
/// At most one neighbor never blocks and four or more always do; with two or three
/// the ring is scanned for three consecutive empty directions.
pub const fn is_geometrically_blocked(ring: u8) -> bool {
    let ring = ring & 0b11_1111;
    let count = ring.count_ones();
    if count <= 1 {
        return false;
    }
    if count >= 4 {
        return true;
    }

    // Copy the two lowest bits above bit 5 so every 3-bit window wraps around
    let wrapped = ring | ((ring & 0b11) << 6);
    let mut shift = 0;
    while shift < 6 {
        if (wrapped >> shift) & 0b111 == 0 {
            return false;
        }
        shift += 1;
    }
    true
}
