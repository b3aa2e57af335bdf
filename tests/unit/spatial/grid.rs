//! Tests for hex grid layout, linear indexing and neighbor directions

#[cfg(test)]
mod tests {
    use sigmar_solver::spatial::grid::{
        CELL_COUNT, Direction, MIDDLE_ROW, Position, ROW_COUNT, ROW_LENGTHS, ROW_STARTS,
        all_positions, row_length,
    };

    // Tests row table is consistent with the cell count
    // Verified by changing one row length
    #[test]
    fn test_row_tables_consistent() {
        assert_eq!(ROW_LENGTHS.iter().sum::<usize>(), CELL_COUNT);
        for row in 0..ROW_COUNT {
            assert_eq!(ROW_STARTS[row + 1] - ROW_STARTS[row], ROW_LENGTHS[row]);
        }
        assert_eq!(ROW_LENGTHS[MIDDLE_ROW], 11);
        assert_eq!(row_length(ROW_COUNT), 0);
    }

    // Tests validity at row ends
    // Verified by using <= instead of < for the column bound
    #[test]
    fn test_position_validity() {
        assert!(Position::new(0, 5).is_valid());
        assert!(!Position::new(0, 6).is_valid());
        assert!(Position::new(5, 10).is_valid());
        assert!(!Position::new(11, 0).is_valid());
        assert_eq!(Position::checked(-1, 0), None);
        assert_eq!(Position::checked(2, -3), None);
        assert_eq!(Position::checked(3, 8), Some(Position::new(3, 8)));
    }

    // Tests linear index and its inverse over the whole board
    // Verified by dropping the row start offset
    #[test]
    fn test_index_round_trip() {
        for (expected, position) in all_positions().enumerate() {
            assert_eq!(position.index(), Some(expected));
            assert_eq!(Position::from_index(expected), Some(position));
        }
        assert_eq!(Position::new(5, 5).index(), Some(45));
        assert_eq!(Position::new(0, 6).index(), None);
        assert_eq!(Position::from_index(CELL_COUNT), None);
    }

    // Tests corner neighbors drop off-board slots
    #[test]
    fn test_top_corner_neighbors() {
        let neighbors: Vec<_> = Position::new(0, 0).neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 0)
            ]
        );
        assert_eq!(Position::new(0, 0).neighbor(Direction::UpperLeft), None);
    }

    // Tests the middle row looks up into the narrower row with no shift
    // Verified by treating the middle row as part of the lower half
    #[test]
    fn test_middle_row_neighbors() {
        let start = Position::new(MIDDLE_ROW, 0);
        assert_eq!(start.neighbor(Direction::UpperLeft), None);
        assert_eq!(
            start.neighbor(Direction::UpperRight),
            Some(Position::new(4, 0))
        );
        assert_eq!(
            start.neighbor(Direction::LowerRight),
            Some(Position::new(6, 0))
        );
        assert_eq!(start.neighbor(Direction::LowerLeft), None);

        let center = Position::new(5, 5);
        assert_eq!(
            center.neighbor_slots(),
            [
                Some(Position::new(4, 4)),
                Some(Position::new(4, 5)),
                Some(Position::new(5, 6)),
                Some(Position::new(6, 5)),
                Some(Position::new(6, 4)),
                Some(Position::new(5, 4)),
            ]
        );
    }

    // Tests lower half looks up into the wider row
    #[test]
    fn test_lower_half_neighbors() {
        let position = Position::new(6, 0);
        assert_eq!(
            position.neighbor(Direction::UpperLeft),
            Some(Position::new(5, 0))
        );
        assert_eq!(
            position.neighbor(Direction::UpperRight),
            Some(Position::new(5, 1))
        );
        assert_eq!(
            position.neighbor(Direction::LowerRight),
            Some(Position::new(7, 0))
        );
        assert_eq!(position.neighbor(Direction::LowerLeft), None);
    }

    // Tests adjacency is symmetric everywhere on the board
    // Verified by swapping the upper and lower shift conditions
    #[test]
    fn test_neighbor_symmetry() {
        for position in all_positions() {
            for neighbor in position.neighbors() {
                assert!(
                    neighbor.neighbors().any(|back| back == position),
                    "{neighbor} does not list {position} as a neighbor"
                );
            }
        }
    }

    // Tests every interior cell has six neighbors and edge cells fewer
    #[test]
    fn test_neighbor_counts() {
        let full = all_positions()
            .filter(|position| position.neighbors().count() == 6)
            .count();
        // Everything except the outer ring of 30 cells
        assert_eq!(full, CELL_COUNT - 30);
        assert_eq!(Position::new(5, 10).neighbors().count(), 3);
    }

    // Tests position display format
    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "(3, 7)");
    }
}
