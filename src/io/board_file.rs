//! JSON board files: eleven rows of tile labels, `""` for a vacant cell

use crate::io::error::{Result, WithPath};
use crate::spatial::board::Board;
use std::fs;
use std::path::Path;

/// Parse board JSON text into a validated board
///
/// # Errors
///
/// Returns an error if the text is not an array of string arrays, or if the rows
/// fail board validation
pub fn parse_board(json: &str) -> Result<Board> {
    let rows: Vec<Vec<String>> = serde_json::from_str(json)?;
    Board::from_labels(&rows)
}

/// Read and validate a board file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid board JSON, or fails
/// board validation
pub fn load_board(path: &Path) -> Result<Board> {
    let json = fs::read_to_string(path).with_path(path)?;
    parse_board(&json).with_path(path)
}

/// Serialize board rows as JSON, one row per line
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn board_to_json(board: &Board) -> Result<String> {
    let rows = board
        .to_kinds()
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(format!("[\n  {}\n]\n", rows.join(",\n  ")))
}

/// Write a board file
///
/// # Errors
///
/// Returns an error if serialization or the write fails
pub fn save_board(board: &Board, path: &Path) -> Result<()> {
    let json = board_to_json(board)?;
    fs::write(path, json).with_path(path)
}

