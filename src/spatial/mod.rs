//! Spatial data structures for the hexagonal board
//!
//! This module contains:
//! - Hex grid geometry and neighbor lookup
//! - Tile kinds and the alchemy stage counter
//! - Board storage with remaining counts and lock flags

/// Board storage and counter bookkeeping
pub mod board;
/// Row layout, positions and neighbor directions
pub mod grid;
/// Tile kinds and stage progression
pub mod tiles;

pub use board::Board;
