//! Command-line interface for solving board files in batches

use crate::algorithm::executor::{BacktrackingSolver, SearchProgress, Solution, SolverConfig};
use crate::algorithm::generator::generate_puzzle;
use crate::io::board_file::{load_board, save_board};
use crate::io::configuration::{DEFAULT_SEED, INPUT_EXTENSION, OUTPUT_SUFFIX, PROGRESS_INTERVAL};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::render::{render_board, solution_to_json, solution_to_string, summary_line};
use clap::{Parser, ValueEnum};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

/// Solution file format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per action
    #[default]
    Text,
    /// Status, statistics and actions as JSON
    Json,
}

impl OutputFormat {
    /// File extension for solutions in this format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sigmar-solver")]
#[command(
    author,
    version,
    about = "Solve hexagonal tile-matching boards by backtracking search"
)]
/// Command-line arguments for the solver
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Board JSON file or directory of board files; output path with --generate
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Give up on a board after this many search steps
    #[arg(short, long)]
    pub max_steps: Option<u64>,

    /// Solution file format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print each board and periodic frame-stack summaries
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Solve boards even if a solution file exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Write a generated board to TARGET instead of solving
    #[arg(short, long, value_name = "SEED", num_args = 0..=1)]
    pub generate: Option<Option<u64>>,
}

impl Cli {
    /// Check if existing solution files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Seed for generation mode, `None` when solving
    pub fn generation_seed(&self) -> Option<u64> {
        self.generate.map(|seed| seed.unwrap_or(DEFAULT_SEED))
    }

    /// Solver configuration derived from the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if `--max-steps` is zero
    pub fn solver_config(&self) -> Result<SolverConfig> {
        if self.max_steps == Some(0) {
            return Err(invalid_parameter(
                "max-steps",
                &0,
                &"must be at least 1",
            ));
        }
        Ok(SolverConfig {
            max_steps: self.max_steps,
            progress_interval: PROGRESS_INTERVAL,
        })
    }
}

/// Orchestrates batch solving with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate or solve according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading, solving or writing fails
    pub fn process(&mut self) -> Result<()> {
        if let Some(seed) = self.cli.generation_seed() {
            return self.generate(seed);
        }

        let config = self.cli.solver_config()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, config)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Solution path for a board file in the chosen format
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            self.cli.format.extension()
        );

        input_path
            .parent()
            .map_or_else(|| PathBuf::from(&output_name), |parent| parent.join(&output_name))
    }

    /// Board files selected by the target, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a board file nor a readable
    /// directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_board_file(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("must be a .{INPUT_EXTENSION} board file"),
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target)? {
                let path = entry.with_path(target)?.path();
                if is_board_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a board file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (solution exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for per-board summaries and verbose diagnostics
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize, config: SolverConfig) -> Result<()> {
        let board = load_board(input_path)?;

        if self.cli.verbose {
            eprintln!("{}:\n{}", input_path.display(), render_board(&board));
        }
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let verbose = self.cli.verbose;
        let mut solver = BacktrackingSolver::with_config(board, config);
        let progress_manager = &mut self.progress_manager;
        let solution = solver
            .run_with(|progress: &SearchProgress<'_>| {
                if verbose {
                    eprintln!(
                        "step {} depth {} {}",
                        progress.steps,
                        progress.depth,
                        progress.frame_summary()
                    );
                }
                if let Some(pm) = progress_manager.as_mut() {
                    pm.update_search(index, progress);
                }
                ControlFlow::Continue(())
            })
            .with_path(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, solution.status, solution.stats.steps);
        }

        if solution.is_solved() {
            self.write_solution(&solution, input_path)?;
        }

        if !self.cli.quiet {
            eprintln!("{}: {}", input_path.display(), summary_line(&solution));
        }
        Ok(())
    }

    fn write_solution(&self, solution: &Solution, input_path: &Path) -> Result<()> {
        let output_path = self.output_path(input_path);
        let contents = match self.cli.format {
            OutputFormat::Text => solution_to_string(&solution.actions),
            OutputFormat::Json => solution_to_json(solution)?,
        };
        std::fs::write(&output_path, contents).with_path(&output_path)
    }

    #[allow(clippy::print_stderr)]
    fn generate(&self, seed: u64) -> Result<()> {
        let puzzle = generate_puzzle(seed)?;
        save_board(&puzzle.board, &self.cli.target)?;
        if !self.cli.quiet {
            eprintln!(
                "Generated board from seed {seed} ({} tiles) at {}",
                puzzle.board.tile_count(),
                self.cli.target.display()
            );
        }
        if self.cli.verbose {
            eprintln!("{}", render_board(&puzzle.board));
        }
        Ok(())
    }
}

fn is_board_file(path: &Path) -> bool {
    let is_json = path.extension().and_then(|ext| ext.to_str()) == Some(INPUT_EXTENSION);
    let is_solution = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX));
    is_json && !is_solution
}
