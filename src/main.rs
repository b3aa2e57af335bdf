//! CLI entry point for the hexagonal tile-matching solver

use clap::Parser;
use sigmar_solver::io::cli::{Cli, FileProcessor};

fn main() -> sigmar_solver::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
