//! Error types for board construction, search invariants and file handling

use crate::spatial::grid::Position;
use crate::spatial::tiles::{AlchemyStage, TileKind};
use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Board input does not have exactly eleven rows
    InvalidRowCount {
        /// Required number of rows
        expected: usize,
        /// Number of rows supplied
        found: usize,
    },

    /// A board row has the wrong number of cells
    InvalidRowLength {
        /// Zero-based row index
        row: usize,
        /// Required length for this row
        expected: usize,
        /// Length supplied
        found: usize,
    },

    /// A cell label is not a recognized tile kind
    UnknownTile {
        /// The label as written in the input
        label: String,
        /// Cell holding the label, when known
        position: Option<Position>,
    },

    /// A position outside the hexagon was addressed
    InvalidPosition {
        /// Offending position
        position: Position,
    },

    /// Attempted to remove a tile whose lock flag is set
    ///
    /// Indicates corrupted search state or a caller bypassing the candidate generator.
    LockedTileRemoval {
        /// Cell of the locked tile
        position: Position,
        /// Kind of the locked tile
        kind: TileKind,
        /// Stage at the time of the attempt
        stage: AlchemyStage,
    },

    /// Attempted to remove a metal that is not next on the unlock frontier
    StageMismatch {
        /// Cell of the metal
        position: Position,
        /// Kind of the metal
        kind: TileKind,
        /// Stage at the time of the attempt
        stage: AlchemyStage,
    },

    /// Attempted to remove a tile from a vacant cell
    EmptyCellRemoval {
        /// The vacant cell
        position: Position,
    },

    /// A position expected in the possibility index was not there
    MissingPossibility {
        /// Position that was looked up
        position: Position,
        /// Kind it was expected under
        kind: TileKind,
    },

    /// Internal bookkeeping went out of range
    CorruptState {
        /// Operation that detected the problem
        operation: &'static str,
        /// Description of the inconsistency
        reason: String,
    },

    /// Puzzle generation could not place every tile
    GenerationFailed {
        /// Seed the generator was started with
        seed: u64,
        /// Number of layouts attempted
        attempts: usize,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Board or solution file could not be parsed or written as JSON
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl SolverError {
    /// Whether this error signals a broken internal invariant rather than bad input
    ///
    /// Invariant violations abort the current solve; the search state that produced
    /// them cannot be trusted.
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::LockedTileRemoval { .. }
                | Self::StageMismatch { .. }
                | Self::EmptyCellRemoval { .. }
                | Self::MissingPossibility { .. }
                | Self::CorruptState { .. }
        )
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRowCount { expected, found } => {
                write!(f, "Board must have {expected} rows, found {found}")
            }
            Self::InvalidRowLength {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Row {row} must have {expected} cells, found {found}"
                )
            }
            Self::UnknownTile { label, position } => match position {
                Some(position) => write!(f, "Unknown tile label '{label}' at {position}"),
                None => write!(f, "Unknown tile label '{label}'"),
            },
            Self::InvalidPosition { position } => {
                write!(f, "Position {position} is outside the board")
            }
            Self::LockedTileRemoval {
                position,
                kind,
                stage,
            } => {
                write!(
                    f,
                    "Attempted to remove locked tile '{kind}' at {position} (stage {stage})"
                )
            }
            Self::StageMismatch {
                position,
                kind,
                stage,
            } => {
                write!(
                    f,
                    "Metal '{kind}' at {position} is not next to unlock (stage {stage})"
                )
            }
            Self::EmptyCellRemoval { position } => {
                write!(f, "Attempted to remove a tile from empty cell {position}")
            }
            Self::MissingPossibility { position, kind } => {
                write!(
                    f,
                    "Position {position} not found under '{kind}' in the possibility index"
                )
            }
            Self::CorruptState { operation, reason } => {
                write!(f, "Corrupt search state in {operation}: {reason}")
            }
            Self::GenerationFailed { seed, attempts } => {
                write!(
                    f,
                    "Failed to generate a puzzle from seed {seed} after {attempts} attempts"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Json { path, source } => {
                write!(f, "Invalid JSON in '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Attaches the file being processed to path-less I/O and JSON errors
pub trait WithPath<T> {
    /// Replace the placeholder path of a file error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<SolverError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only file-backed errors carry a path
            match &mut error {
                SolverError::Json { path: slot, .. } | SolverError::FileSystem { path: slot, .. } => {
                    *slot = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a corrupt state error
pub fn corrupt_state(operation: &'static str, reason: &impl ToString) -> SolverError {
    SolverError::CorruptState {
        operation,
        reason: reason.to_string(),
    }
}
