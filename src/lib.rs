//! Backtracking solver for hexagonal tile-matching boards in the style of Sigmar's Garden
//!
//! A board holds up to 91 tiles on an eleven-row hexagon. Tiles are removed in
//! matching pairs once they are free, metals in a fixed stage order. The solver
//! searches removal orders depth first, undoing removals in place when a branch
//! runs dry.

#![forbid(unsafe_code)]

/// Lock evaluation, candidate generation, search and puzzle generation
pub mod algorithm;
/// Board files, rendering, progress display, the CLI and error handling
pub mod io;
/// Hex grid geometry, tile kinds and board storage
pub mod spatial;

pub use io::error::{Result, SolverError};
