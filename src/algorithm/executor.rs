use crate::{
    algorithm::possibility::PossibilityIndex,
    algorithm::selection::{Candidate, CandidateFrame},
    io::configuration::PROGRESS_INTERVAL,
    io::error::{Result, corrupt_state},
    spatial::board::Board,
    spatial::grid::Position,
    spatial::tiles::TileKind,
};
use serde::Serialize;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// One applied removal, kept as the undo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Action {
    /// First removed cell
    pub first: Position,
    /// Second removed cell, equal to `first` for a solo removal
    pub second: Position,
    /// Kind removed from `first`
    pub first_kind: TileKind,
    /// Kind removed from `second`
    pub second_kind: TileKind,
    /// Cells whose lock flag this removal cleared
    pub unlocked: Vec<Position>,
}

impl Action {
    /// Whether a single tile was removed without a partner
    pub fn is_solo(&self) -> bool {
        self.first == self.second
    }

    /// Metal stage consumed by this action, if any
    pub fn metal_stage(&self) -> Option<u8> {
        self.first_kind.stage().or_else(|| self.second_kind.stage())
    }

    /// Removed cells, once each
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let second = (!self.is_solo()).then_some(self.second);
        std::iter::once(self.first).chain(second)
    }
}

/// Everything a search mutates: the board, its possibility index and the action log
///
/// Actions are applied and undone strictly in stack order; undoing restores the board
/// and the index exactly as they were before the matching apply.
#[derive(Clone, Debug)]
pub struct SearchState {
    board: Board,
    index: PossibilityIndex,
    actions: Vec<Action>,
}

impl SearchState {
    /// Take ownership of a board and index its unlocked tiles
    pub fn new(board: Board) -> Self {
        let index = PossibilityIndex::from_board(&board);
        Self {
            board,
            index,
            actions: Vec::new(),
        }
    }

    /// Current board
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Current possibility index
    pub const fn index(&self) -> &PossibilityIndex {
        &self.index
    }

    /// Applied actions, oldest first
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Remove a candidate pair from the board and record it
    ///
    /// Locked neighbors of the removed cells are re-evaluated, and after a metal the
    /// next metal is too; everything that became free is indexed and remembered in
    /// the action so the undo can lock it again.
    ///
    /// # Errors
    ///
    /// Returns an invariant error if either cell is empty, locked, or holds a metal
    /// off the unlock frontier, if a solo removal is not the final metal, or if the
    /// index disagrees with the board. The state must be discarded after an error.
    pub fn apply_pair(&mut self, candidate: Candidate) -> Result<()> {
        let Candidate { first, second } = candidate;
        let solo = candidate.is_solo();

        if solo && self.board.kind_at(first) != TileKind::L6 {
            return Err(corrupt_state(
                "apply_pair",
                &format!(
                    "solo removal of '{}' at {first}",
                    self.board.kind_at(first)
                ),
            ));
        }

        let first_kind = self.board.take(first)?;
        let second_kind = if solo {
            first_kind
        } else {
            self.board.take(second)?
        };

        self.index.remove(first_kind, first)?;
        if !solo {
            self.index.remove(second_kind, second)?;
        }

        self.board
            .consume(first_kind, (!solo).then_some(second_kind))?;
        if first_kind.is_metal() || second_kind.is_metal() {
            self.board.advance_stage()?;
        }

        let mut unlocked = Vec::new();
        self.release_around(first, first_kind, &mut unlocked);
        if !solo {
            self.release_around(second, second_kind, &mut unlocked);
        }

        for &position in &unlocked {
            self.index.insert(self.board.kind_at(position), position);
        }
        self.index.sort();

        self.actions.push(Action {
            first,
            second,
            first_kind,
            second_kind,
            unlocked,
        });
        Ok(())
    }

    /// Reverse the most recent action, returning it
    ///
    /// Returns `Ok(None)` when nothing has been applied.
    ///
    /// # Errors
    ///
    /// Returns an invariant error if the board or index no longer matches the record
    pub fn undo_last(&mut self) -> Result<Option<Action>> {
        let Some(action) = self.actions.pop() else {
            return Ok(None);
        };
        let solo = action.is_solo();

        self.board
            .unconsume(action.first_kind, (!solo).then_some(action.second_kind));

        self.board.restore(action.first, action.first_kind)?;
        self.index.insert(action.first_kind, action.first);
        if !solo {
            self.board.restore(action.second, action.second_kind)?;
            self.index.insert(action.second_kind, action.second);
        }

        if action.metal_stage().is_some() {
            self.board.retreat_stage()?;
        }

        for &position in &action.unlocked {
            self.board.set_locked(position, true);
            self.index.remove(self.board.kind_at(position), position)?;
        }
        self.index.sort();

        Ok(Some(action))
    }

    fn release_around(&mut self, removed: Position, kind: TileKind, unlocked: &mut Vec<Position>) {
        if kind.is_metal() {
            if let Some(next) = self.board.stage().next_metal() {
                let waiting: Vec<Position> = self
                    .board
                    .positions_of(next)
                    .filter(|&position| self.board.is_locked(position))
                    .collect();
                for position in waiting {
                    if !self.board.refresh_lock(position) {
                        unlocked.push(position);
                    }
                }
            }
        }

        for neighbor in removed.neighbors() {
            if self.board.is_locked(neighbor) && !self.board.refresh_lock(neighbor) {
                unlocked.push(neighbor);
            }
        }
    }
}

/// Runtime knobs for a search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Stop as [`SearchStatus::Cancelled`] after this many steps
    pub max_steps: Option<u64>,
    /// Steps between observer callbacks; zero disables them
    pub progress_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

/// Where the search stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// Frames remain and the board is not cleared
    Searching,
    /// The board was cleared; the action log is a solution
    Solved,
    /// Every candidate was tried from the root without clearing the board
    Exhausted,
    /// Stopped early by the step budget or the observer
    Cancelled,
}

/// Snapshot handed to progress observers
#[derive(Debug)]
pub struct SearchProgress<'a> {
    /// Steps taken so far
    pub steps: u64,
    /// Wall-clock time spent in the current run
    pub elapsed: Duration,
    /// Actions currently applied
    pub depth: usize,
    /// Open frames, root first
    pub frames: &'a [CandidateFrame],
}

impl SearchProgress<'_> {
    /// Cursor of every open frame, e.g. `[ 3/7, 1/4 ]`
    pub fn frame_summary(&self) -> String {
        let cursors: Vec<String> = self.frames.iter().map(ToString::to_string).collect();
        format!("[ {} ]", cursors.join(", "))
    }
}

/// Diagnostic counters reported with a result
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Advance and backtrack steps taken
    pub steps: u64,
    /// Wall-clock time spent searching
    pub elapsed: Duration,
}

/// Outcome of a search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// How the search ended
    pub status: SearchStatus,
    /// Removals clearing the board, in order; empty unless solved
    pub actions: Vec<Action>,
    /// Step count and elapsed time
    pub stats: SearchStats,
}

impl Solution {
    /// Whether the actions clear the board
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// Depth-first search over legal removals with an explicit frame stack
///
/// Each frame holds the ordered candidates of one node. Advancing applies the next
/// candidate of the top frame and opens a frame for the new board; an exhausted
/// frame is closed and the action that led to it undone.
pub struct BacktrackingSolver {
    state: SearchState,
    frames: Vec<CandidateFrame>,
    status: SearchStatus,
    config: SolverConfig,
    steps: u64,
    elapsed: Duration,
}

impl BacktrackingSolver {
    /// Create a solver with default configuration
    pub fn new(board: Board) -> Self {
        Self::with_config(board, SolverConfig::default())
    }

    /// Create a solver with explicit configuration
    pub fn with_config(board: Board, config: SolverConfig) -> Self {
        let state = SearchState::new(board);
        let status = if state.board().is_cleared() {
            SearchStatus::Solved
        } else {
            SearchStatus::Searching
        };
        let frames = vec![CandidateFrame::new(state.board(), state.index())];
        Self {
            state,
            frames,
            status,
            config,
            steps: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Solve a board to completion with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the search hits an internal invariant violation
    pub fn solve(board: Board) -> Result<Solution> {
        Self::new(board).run()
    }

    /// Current search state
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Current status
    pub const fn status(&self) -> SearchStatus {
        self.status
    }

    /// Steps taken so far
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of actions currently applied
    pub fn depth(&self) -> usize {
        self.state.actions().len()
    }

    /// Take one advance or backtrack step
    ///
    /// # Errors
    ///
    /// Returns an error if applying or undoing an action violates an invariant
    pub fn step(&mut self) -> Result<SearchStatus> {
        if self.status != SearchStatus::Searching {
            return Ok(self.status);
        }
        let Some(frame) = self.frames.last_mut() else {
            self.status = SearchStatus::Exhausted;
            return Ok(self.status);
        };
        self.steps += 1;

        if let Some(candidate) = frame.next() {
            self.state.apply_pair(candidate)?;
            if self.state.board().is_cleared() {
                self.status = SearchStatus::Solved;
            } else {
                self.frames
                    .push(CandidateFrame::new(self.state.board(), self.state.index()));
            }
        } else {
            self.frames.pop();
            self.state.undo_last()?;
            if self.frames.is_empty() {
                self.status = SearchStatus::Exhausted;
            }
        }

        Ok(self.status)
    }

    /// Run until solved, exhausted or cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the search hits an internal invariant violation
    pub fn run(&mut self) -> Result<Solution> {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Run with an observer called every `progress_interval` steps
    ///
    /// Returning [`ControlFlow::Break`] from the observer stops the search as
    /// [`SearchStatus::Cancelled`]; the board is left at the node reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the search hits an internal invariant violation
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<Solution>
    where
        F: FnMut(&SearchProgress<'_>) -> ControlFlow<()>,
    {
        let started = Instant::now();

        while self.status == SearchStatus::Searching {
            if self.config.max_steps.is_some_and(|max| self.steps >= max) {
                self.status = SearchStatus::Cancelled;
                break;
            }

            self.step()?;

            let interval = self.config.progress_interval;
            if interval > 0 && self.steps % interval == 0 {
                let progress = SearchProgress {
                    steps: self.steps,
                    elapsed: started.elapsed(),
                    depth: self.depth(),
                    frames: &self.frames,
                };
                if observer(&progress).is_break() && self.status == SearchStatus::Searching {
                    self.status = SearchStatus::Cancelled;
                }
            }
        }

        self.elapsed += started.elapsed();
        Ok(self.solution())
    }

    /// Result as of now; actions are only reported once solved
    pub fn solution(&self) -> Solution {
        let actions = if self.status == SearchStatus::Solved {
            self.state.actions().to_vec()
        } else {
            Vec::new()
        };
        Solution {
            status: self.status,
            actions,
            stats: SearchStats {
                steps: self.steps,
                elapsed: self.elapsed,
            },
        }
    }
}
