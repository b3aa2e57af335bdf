//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use sigmar_solver::SolverError;
    use sigmar_solver::io::error::{WithPath, corrupt_state, invalid_parameter};
    use sigmar_solver::spatial::grid::Position;
    use sigmar_solver::spatial::tiles::{AlchemyStage, TileKind};
    use std::error::Error;
    use std::path::{Path, PathBuf};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = SolverError::FileSystem {
            path: "/tmp/board.json".into(),
            operation: "read",
            source: io_error,
        };
        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/board.json"));

        let shape = SolverError::InvalidRowCount {
            expected: 11,
            found: 3,
        };
        assert!(shape.source().is_none());
    }

    // Tests locked removal message names tile, cell and stage
    #[test]
    fn test_locked_removal_message() {
        let error = SolverError::LockedTileRemoval {
            position: Position::new(4, 2),
            kind: TileKind::L3,
            stage: AlchemyStage::START,
        };
        let message = error.to_string();
        assert!(message.contains("l3"));
        assert!(message.contains("(4, 2)"));
        assert!(message.contains("0/6"));
    }

    // Tests invariant classification
    // Verified by classifying input errors as invariant violations
    #[test]
    fn test_invariant_classification() {
        assert!(corrupt_state("undo", &"stack empty").is_invariant_violation());
        assert!(
            SolverError::EmptyCellRemoval {
                position: Position::new(0, 0)
            }
            .is_invariant_violation()
        );
        assert!(
            !SolverError::UnknownTile {
                label: "x".to_string(),
                position: None
            }
            .is_invariant_violation()
        );
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("max-steps", &0, &"must be at least 1");
        let message = error.to_string();
        assert!(message.contains("max-steps"));
        assert!(message.contains('0'));
        assert!(message.contains("must be at least 1"));
    }

    // Tests path attachment only rewrites file errors
    #[test]
    fn test_with_path() {
        let io: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        match io.with_path(Path::new("boards/x.json")) {
            Err(SolverError::FileSystem { path, .. }) => {
                assert_eq!(path, PathBuf::from("boards/x.json"));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let json: Result<Vec<String>, serde_json::Error> = serde_json::from_str("{");
        assert!(matches!(
            json.with_path(Path::new("y.json")),
            Err(SolverError::Json { ref path, .. }) if path == Path::new("y.json")
        ));

        let other: Result<(), SolverError> = Err(corrupt_state("apply", &"bad"));
        assert!(matches!(
            other.with_path(Path::new("z.json")),
            Err(SolverError::CorruptState { .. })
        ));
    }
}
