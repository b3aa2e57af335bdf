//! Tests for search progress display across batches

#[cfg(test)]
mod tests {
    use sigmar_solver::algorithm::executor::{SearchProgress, SearchStatus};
    use sigmar_solver::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use sigmar_solver::io::progress::ProgressManager;
    use std::path::Path;
    use std::time::Duration;

    fn snapshot(steps: u64) -> SearchProgress<'static> {
        SearchProgress {
            steps,
            elapsed: Duration::from_millis(10),
            depth: 3,
            frames: &[],
        }
    }

    // Tests ProgressManager full lifecycle
    #[test]
    fn test_progress_manager_lifecycle() {
        let mut pm = ProgressManager::new();

        pm.initialize(1);
        pm.start_file(0, Path::new("board.json"));
        pm.update_search(0, &snapshot(100_000));
        pm.complete_file(0, SearchStatus::Solved, 100_001);
        pm.finish();
        assert_eq!(pm.file_count(), 1);
    }

    // Tests default trait implementation matches new
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.initialize(0);
        assert_eq!(pm.file_count(), 0);
        pm.finish();
    }

    // Tests large batches keep working past the visible window
    // Verified by indexing bars by file index instead of window slot
    #[test]
    fn test_batch_mode() {
        let count = MAX_INDIVIDUAL_PROGRESS_BARS + 3;
        let mut pm = ProgressManager::new();
        pm.initialize(count);

        for index in 0..count {
            let name = format!("board_{index}.json");
            pm.start_file(index, Path::new(&name));
            pm.update_search(index, &snapshot(5));
            pm.complete_file(index, SearchStatus::Exhausted, 5);
        }
        assert_eq!(pm.file_count(), count);
        pm.finish();
    }

    // Tests updates for unknown files are ignored
    #[test]
    fn test_unknown_index_ignored() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        pm.update_search(4, &snapshot(1));
        pm.complete_file(4, SearchStatus::Cancelled, 1);
        assert_eq!(pm.file_count(), 0);
        pm.finish();
    }
}
