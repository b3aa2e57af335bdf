//! Tests for apply/undo bookkeeping and the backtracking search loop

#[cfg(test)]
mod tests {
    use crate::board_with;
    use sigmar_solver::SolverError;
    use sigmar_solver::algorithm::executor::{
        BacktrackingSolver, SearchState, SearchStatus, SolverConfig,
    };
    use sigmar_solver::algorithm::possibility::PossibilityIndex;
    use sigmar_solver::algorithm::selection::Candidate;
    use sigmar_solver::spatial::board::Board;
    use sigmar_solver::spatial::grid::Position;
    use sigmar_solver::spatial::tiles::{AlchemyStage, TileKind};
    use std::ops::ControlFlow;

    const fn at(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn ringed_cyan() -> Board {
        let mut tiles = vec![(5, 5, TileKind::Cyan), (0, 0, TileKind::Cyan)];
        for (i, neighbor) in at(5, 5).neighbors().enumerate() {
            let kind = if i % 2 == 0 {
                TileKind::Orange
            } else {
                TileKind::Blue
            };
            tiles.push((neighbor.row, neighbor.col, kind));
        }
        board_with(&tiles)
    }

    // Tests a removal updates counts, occupancy and the index
    #[test]
    fn test_apply_pair() {
        let board = board_with(&[(0, 0, TileKind::Cyan), (0, 1, TileKind::Cyan)]);
        let mut state = SearchState::new(board);
        state
            .apply_pair(Candidate::pair(at(0, 0), at(0, 1)))
            .unwrap();

        assert!(state.board().is_cleared());
        assert_eq!(state.board().remaining(TileKind::Cyan), 0);
        assert!(state.index().is_empty());
        assert_eq!(state.actions().len(), 1);
        assert_eq!(state.actions()[0].first_kind, TileKind::Cyan);
    }

    // Tests undo restores board and index exactly
    // Verified by skipping the re-lock of released neighbors
    #[test]
    fn test_undo_exact() {
        let board = ringed_cyan();
        let mut state = SearchState::new(board.clone());
        let before_index = state.index().clone();

        let orange: Vec<_> = state.index().positions(TileKind::Orange).to_vec();
        state
            .apply_pair(Candidate::pair(orange[0], orange[1]))
            .unwrap();
        assert_ne!(state.board(), &board);

        let undone = state.undo_last().unwrap().unwrap();
        assert_eq!(undone.first, orange[0]);
        assert_eq!(state.board(), &board);
        assert_eq!(state.index(), &before_index);
        assert!(state.undo_last().unwrap().is_none());
    }

    // Tests removals around a locked tile release it and record the release
    #[test]
    fn test_release_recorded() {
        let board = ringed_cyan();
        let mut state = SearchState::new(board);
        assert!(state.board().is_locked(at(5, 5)));

        let orange: Vec<_> = state.index().positions(TileKind::Orange).to_vec();
        let blue: Vec<_> = state.index().positions(TileKind::Blue).to_vec();
        state
            .apply_pair(Candidate::pair(orange[0], orange[1]))
            .unwrap();
        state
            .apply_pair(Candidate::pair(blue[0], blue[1]))
            .unwrap();

        assert!(!state.board().is_locked(at(5, 5)));
        assert!(state.index().positions(TileKind::Cyan).contains(&at(5, 5)));
        let released: Vec<_> = state
            .actions()
            .iter()
            .flat_map(|action| action.unlocked.iter().copied())
            .collect();
        assert!(released.contains(&at(5, 5)));
    }

    // Tests removing from an empty cell is rejected
    #[test]
    fn test_empty_cell_removal() {
        let board = board_with(&[(0, 0, TileKind::Cyan)]);
        let mut state = SearchState::new(board);
        let error = state
            .apply_pair(Candidate::pair(at(3, 3), at(0, 0)))
            .unwrap_err();
        assert!(matches!(error, SolverError::EmptyCellRemoval { .. }));
        assert!(error.is_invariant_violation());
    }

    // Tests removing a locked tile is rejected with context
    // Verified by removing the lock check in take
    #[test]
    fn test_locked_removal() {
        let mut state = SearchState::new(ringed_cyan());
        let error = state
            .apply_pair(Candidate::pair(at(5, 5), at(0, 0)))
            .unwrap_err();
        assert!(matches!(
            error,
            SolverError::LockedTileRemoval {
                kind: TileKind::Cyan,
                stage,
                ..
            } if stage == AlchemyStage::START
        ));
    }

    // Tests a metal behind the frontier is rejected even when unlocked
    #[test]
    fn test_stage_mismatch() {
        let board = board_with(&[
            (0, 0, TileKind::Key),
            (0, 2, TileKind::L1),
            (2, 0, TileKind::Key),
            (2, 2, TileKind::L1),
        ]);
        let mut state = SearchState::new(board);
        state
            .apply_pair(Candidate::pair(at(0, 0), at(0, 2)))
            .unwrap();
        let error = state
            .apply_pair(Candidate::pair(at(2, 0), at(2, 2)))
            .unwrap_err();
        assert!(matches!(error, SolverError::StageMismatch { .. }));
    }

    // Tests solo removal is only allowed for the final metal
    #[test]
    fn test_solo_non_final() {
        let board = board_with(&[(0, 0, TileKind::Green)]);
        let mut state = SearchState::new(board);
        let error = state.apply_pair(Candidate::solo(at(0, 0))).unwrap_err();
        assert!(matches!(error, SolverError::CorruptState { .. }));
    }

    // Tests metal removal advances and undo retreats the stage
    // Verified by not retreating the stage on undo
    #[test]
    fn test_stage_round_trip() {
        let board = board_with(&[
            (0, 0, TileKind::Key),
            (0, 2, TileKind::L1),
            (4, 4, TileKind::L2),
        ]);
        let mut state = SearchState::new(board.clone());
        assert!(state.board().is_locked(at(4, 4)));

        state
            .apply_pair(Candidate::pair(at(0, 0), at(0, 2)))
            .unwrap();
        assert_eq!(state.board().stage().value(), 1);
        assert!(!state.board().is_locked(at(4, 4)));
        assert_eq!(state.index().positions(TileKind::L2), &[at(4, 4)]);
        assert_eq!(state.actions()[0].metal_stage(), Some(1));

        state.undo_last().unwrap();
        assert_eq!(state.board(), &board);
        assert_eq!(state.index(), &PossibilityIndex::from_board(&board));
    }

    // Tests white balance moves and reverses with the partner parity
    #[test]
    fn test_white_balance_round_trip() {
        let board = board_with(&[(0, 0, TileKind::White), (0, 2, TileKind::Cyan)]);
        let mut state = SearchState::new(board);
        state
            .apply_pair(Candidate::pair(at(0, 0), at(0, 2)))
            .unwrap();
        assert_eq!(state.board().white_balance(), -1);
        state.undo_last().unwrap();
        assert_eq!(state.board().white_balance(), 0);
    }

    // Tests two adjacent cardinals solve in one action
    #[test]
    fn test_solve_trivial() {
        let board = board_with(&[(0, 0, TileKind::Cyan), (0, 1, TileKind::Cyan)]);
        let solution = BacktrackingSolver::solve(board).unwrap();
        assert!(solution.is_solved());
        assert_eq!(solution.actions.len(), 1);
        assert_eq!(solution.stats.steps, 1);
    }

    // Tests an empty board is already solved
    #[test]
    fn test_solve_empty() {
        let solution = BacktrackingSolver::solve(Board::empty()).unwrap();
        assert_eq!(solution.status, SearchStatus::Solved);
        assert!(solution.actions.is_empty());
        assert_eq!(solution.stats.steps, 0);
    }

    // Tests an unreachable metal exhausts the search with no actions
    // Verified by reporting an empty index as solved
    #[test]
    fn test_unreachable_metal_exhausts() {
        let board = board_with(&[(3, 3, TileKind::L3)]);
        let solution = BacktrackingSolver::solve(board).unwrap();
        assert_eq!(solution.status, SearchStatus::Exhausted);
        assert!(solution.actions.is_empty());
    }

    // Tests the step budget cancels the search
    #[test]
    fn test_max_steps_cancels() {
        let board = board_with(&[
            (0, 0, TileKind::Cyan),
            (0, 2, TileKind::Cyan),
            (2, 0, TileKind::Blue),
            (2, 2, TileKind::Blue),
        ]);
        let config = SolverConfig {
            max_steps: Some(1),
            ..SolverConfig::default()
        };
        let mut solver = BacktrackingSolver::with_config(board, config);
        let solution = solver.run().unwrap();
        assert_eq!(solution.status, SearchStatus::Cancelled);
        assert_eq!(solution.stats.steps, 1);
        assert!(solution.actions.is_empty());
        assert_eq!(solver.depth(), 1);
    }

    // Tests the observer can stop the search
    // Verified by ignoring the observer's return value
    #[test]
    fn test_observer_break() {
        let board = board_with(&[
            (0, 0, TileKind::Cyan),
            (0, 2, TileKind::Cyan),
            (2, 0, TileKind::Blue),
            (2, 2, TileKind::Blue),
        ]);
        let config = SolverConfig {
            max_steps: None,
            progress_interval: 1,
        };
        let mut calls = 0;
        let mut solver = BacktrackingSolver::with_config(board, config);
        let solution = solver
            .run_with(|progress| {
                calls += 1;
                assert_eq!(progress.depth, 1);
                assert_eq!(progress.frame_summary(), "[ 1/2, 0/1 ]");
                ControlFlow::Break(())
            })
            .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(solution.status, SearchStatus::Cancelled);
        assert_eq!(solver.status(), SearchStatus::Cancelled);
    }

    // Tests stepping manually reaches the same result
    #[test]
    fn test_manual_steps() {
        let board = board_with(&[(0, 0, TileKind::Cyan), (0, 1, TileKind::Cyan)]);
        let mut solver = BacktrackingSolver::new(board);
        assert_eq!(solver.status(), SearchStatus::Searching);
        assert_eq!(solver.step().unwrap(), SearchStatus::Solved);
        assert_eq!(solver.step().unwrap(), SearchStatus::Solved);
        assert_eq!(solver.steps(), 1);
        assert!(solver.state().board().is_cleared());
        assert!(solver.solution().is_solved());
    }
}
