//! Text and JSON renderings of boards and solutions

use crate::algorithm::executor::{Action, SearchStatus, Solution};
use crate::io::error::Result;
use crate::spatial::board::Board;
use crate::spatial::grid::{Position, ROW_COUNT, ROW_LENGTHS};
use crate::spatial::tiles::TileKind;
use serde::Serialize;
use std::fmt::Write;

/// One line for an action: both labels, then both cells
pub fn action_line(action: &Action) -> String {
    format!(
        "{:>6} {:>6} {{row:{:>2} col:{:>2}}} {{row:{:>2} col:{:>2}}}",
        action.first_kind,
        action.second_kind,
        action.first.row,
        action.first.col,
        action.second.row,
        action.second.col
    )
}

/// Every action on its own line, in order
pub fn solution_to_string(actions: &[Action]) -> String {
    actions.iter().fold(String::new(), |mut text, action| {
        text.push_str(&action_line(action));
        text.push('\n');
        text
    })
}

/// Short description of how a search ended
pub fn summary_line(solution: &Solution) -> String {
    let outcome = match solution.status {
        SearchStatus::Solved => format!("solved in {} actions", solution.actions.len()),
        SearchStatus::Exhausted => "no solution".to_string(),
        SearchStatus::Cancelled => "cancelled".to_string(),
        SearchStatus::Searching => "still searching".to_string(),
    };
    format!(
        "{outcome} after {} steps in {:.3?}",
        solution.stats.steps, solution.stats.elapsed
    )
}

#[derive(Serialize)]
struct SolutionReport<'a> {
    status: SearchStatus,
    steps: u64,
    elapsed_ms: u64,
    actions: &'a [Action],
}

/// The solution with its statistics as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn solution_to_json(solution: &Solution) -> Result<String> {
    let report = SolutionReport {
        status: solution.status,
        steps: solution.stats.steps,
        elapsed_ms: u64::try_from(solution.stats.elapsed.as_millis()).unwrap_or(u64::MAX),
        actions: &solution.actions,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Hexagonal text picture of a board
///
/// Selectable tiles are shown in upper case, locked tiles in lower case and
/// vacant cells as `.`.
pub fn render_board(board: &Board) -> String {
    let mut text = String::new();
    let widest = ROW_LENGTHS.iter().copied().max().unwrap_or(0);
    for (row, &length) in ROW_LENGTHS.iter().enumerate() {
        text.push_str(&"  ".repeat(widest - length));
        for col in 0..length {
            let position = Position::new(row, col);
            let _ = write!(text, "{:<4}", cell_code(board, position));
        }
        let trimmed = text.trim_end().len();
        text.truncate(trimmed);
        if row + 1 < ROW_COUNT {
            text.push('\n');
        }
    }
    text
}

fn cell_code(board: &Board, position: Position) -> String {
    let code = match board.kind_at(position) {
        TileKind::Empty => return ".".to_string(),
        TileKind::Cyan => "cy",
        TileKind::Orange => "or",
        TileKind::Blue => "bl",
        TileKind::Green => "gr",
        TileKind::White => "wh",
        TileKind::Light => "li",
        TileKind::Dark => "da",
        TileKind::Key => "ke",
        TileKind::L1 => "l1",
        TileKind::L2 => "l2",
        TileKind::L3 => "l3",
        TileKind::L4 => "l4",
        TileKind::L5 => "l5",
        TileKind::L6 => "l6",
    };
    if board.is_locked(position) {
        code.to_string()
    } else {
        code.to_uppercase()
    }
}
