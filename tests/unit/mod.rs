//! Unit tests mirroring the `src/` tree, one file per source file

mod io;
mod spatial;

use sigmar_solver::spatial::board::Board;
use sigmar_solver::spatial::grid::ROW_LENGTHS;
use sigmar_solver::spatial::tiles::TileKind;

/// Build a board from `(row, col, kind)` placements, every other cell vacant
pub(crate) fn board_with(tiles: &[(usize, usize, TileKind)]) -> Board {
    let mut rows: Vec<Vec<TileKind>> = ROW_LENGTHS
        .iter()
        .map(|&length| vec![TileKind::Empty; length])
        .collect();
    for &(row, col, kind) in tiles {
        rows[row][col] = kind;
    }
    Board::from_kinds(&rows).unwrap()
}
