//! Multi-file search progress with automatic batching for large sets

use crate::algorithm::executor::{SearchProgress, SearchStatus};
use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, SPINNER_TICK_MS};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Per-file display state: name, steps, depth and the open frame cursors
#[derive(Clone, Debug, Default)]
struct FileState {
    name: String,
    steps: u64,
    depth: usize,
    frames: String,
}

/// Coordinates progress display for batch solving
///
/// Small batches get one spinner per file; larger ones add a batch bar and keep
/// only the most recent files visible.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Boards: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create an empty progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Create the bars for a batch of `file_count` boards
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new_spinner();
            bar.set_style(SPINNER_STYLE.clone());
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Number of files registered so far
    pub fn file_count(&self) -> usize {
        self.file_states.iter().filter(|state| !state.name.is_empty()).count()
    }

    /// Register the board at `index` as being solved
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                ..FileState::default()
            };
        }
        self.update_bars();
    }

    /// Show a search snapshot for the board at `index`
    pub fn update_search(&mut self, index: usize, progress: &SearchProgress<'_>) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.steps = progress.steps;
            state.depth = progress.depth;
            state.frames = progress.frame_summary();
        }
        self.update_bars();
    }

    /// Mark the board at `index` as finished with `status`
    pub fn complete_file(&mut self, index: usize, status: SearchStatus, steps: u64) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            let mark = if status == SearchStatus::Solved {
                "✓"
            } else {
                "✗"
            };
            state.name = format!("{mark} {}", state.name);
            state.steps = steps;
            state.frames.clear();
        }
        self.update_bars();
    }

    /// Clear every bar from the terminal
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All boards processed");
        }
        for bar in &self.file_bars {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }

    /// Point the spinners at the most recent files
    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, state) in visible.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_index) {
                bar.set_message(state.name.clone());
                bar.set_prefix(format!(
                    "steps {} depth {} {}",
                    state.steps, state.depth, state.frames
                ));
            }
        }

        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
