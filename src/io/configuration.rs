//! Solver constants and runtime configuration defaults

// Search reporting
/// Steps between progress observer callbacks
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Tick rate of the per-file spinner in milliseconds
pub const SPINNER_TICK_MS: u64 = 120;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Default values for configurable parameters
/// Fixed seed for reproducible puzzle generation
pub const DEFAULT_SEED: u64 = 42;

// Generation limits
/// Layouts tried before puzzle generation gives up
pub const GENERATION_ATTEMPTS: usize = 64;

// Input and output naming
/// Extension of board files picked up from a directory
pub const INPUT_EXTENSION: &str = "json";
/// Suffix added to solution filenames
pub const OUTPUT_SUFFIX: &str = "_solution";
