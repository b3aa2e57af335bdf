/// Fixed-size occupancy set over the 91 cells
pub mod bitset;
/// Apply/undo search state and the backtracking solver
pub mod executor;
/// Seeded generation of solvable boards
pub mod generator;
/// Free/locked evaluation of individual tiles
pub mod lock;
/// Per-kind index of currently selectable tiles
pub mod possibility;
/// Distances from each cell to the metals waiting behind it
pub mod propagation;
/// Legal pair enumeration and candidate ordering
pub mod selection;
