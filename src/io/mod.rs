/// JSON board file loading and saving
pub mod board_file;
/// Command-line interface and batch processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and result aliases
pub mod error;
/// Terminal progress display
pub mod progress;
/// Text and JSON output
pub mod render;
