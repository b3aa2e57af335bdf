//! Directional distance fields from every metal, used to order candidate pairs
//!
//! Each metal seeds three sweeps: upward through the two upper neighbors, downward
//! through the two lower neighbors, and sideways along its own row. Upward and
//! downward sweeps fan out sideways on every row they enter, so together they reach
//! every cell of the board. Each cell keeps the shortest path length found, in the
//! slot belonging to that metal's stage. The fields are computed once per board.

use crate::spatial::board::Board;
use crate::spatial::grid::{CELL_COUNT, Direction, Position};
use crate::spatial::tiles::{STAGE_COUNT, TileKind};

/// Distances from one cell to the metal of each stage, slot `s - 1` for stage `s`
pub type DistanceField = [u8; STAGE_COUNT];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sweep {
    Up,
    Down,
    Lateral(Direction),
}

impl Sweep {
    const COUNT: usize = 4;

    const fn slot(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Lateral(Direction::Left) => 2,
            Self::Lateral(_) => 3,
        }
    }

    /// Steps taken from a cell reached by this sweep
    fn continuations(self) -> &'static [(Direction, Self)] {
        const UP: [(Direction, Sweep); 4] = [
            (Direction::UpperLeft, Sweep::Up),
            (Direction::UpperRight, Sweep::Up),
            (Direction::Right, Sweep::Lateral(Direction::Right)),
            (Direction::Left, Sweep::Lateral(Direction::Left)),
        ];
        const DOWN: [(Direction, Sweep); 4] = [
            (Direction::LowerRight, Sweep::Down),
            (Direction::LowerLeft, Sweep::Down),
            (Direction::Right, Sweep::Lateral(Direction::Right)),
            (Direction::Left, Sweep::Lateral(Direction::Left)),
        ];
        const RIGHT: [(Direction, Sweep); 1] =
            [(Direction::Right, Sweep::Lateral(Direction::Right))];
        const LEFT: [(Direction, Sweep); 1] = [(Direction::Left, Sweep::Lateral(Direction::Left))];

        match self {
            Self::Up => &UP,
            Self::Down => &DOWN,
            Self::Lateral(Direction::Left) => &LEFT,
            Self::Lateral(_) => &RIGHT,
        }
    }
}

/// Seeds leaving a metal, one per neighbor direction
const SEEDS: [(Direction, Sweep); 6] = [
    (Direction::UpperLeft, Sweep::Up),
    (Direction::UpperRight, Sweep::Up),
    (Direction::Right, Sweep::Lateral(Direction::Right)),
    (Direction::LowerRight, Sweep::Down),
    (Direction::LowerLeft, Sweep::Down),
    (Direction::Left, Sweep::Lateral(Direction::Left)),
];

/// Distance fields for every cell, indexed by linear cell index
///
/// Cells holding a metal keep zero in their own slot; slots of metals absent from
/// the board stay zero everywhere.
pub fn unlock_distances(board: &Board) -> Vec<DistanceField> {
    let mut fields = vec![[0; STAGE_COUNT]; CELL_COUNT];
    for metal in TileKind::METALS {
        let Some(stage) = metal.stage() else {
            continue;
        };
        let slot = usize::from(stage - 1);
        for origin in board.positions_of(metal) {
            propagate_from(origin, slot, &mut fields);
        }
    }
    fields
}

fn propagate_from(origin: Position, slot: usize, fields: &mut [DistanceField]) {
    // Shortest distance seen per cell and sweep; a longer arrival cannot improve anything
    let mut best = vec![[u8::MAX; Sweep::COUNT]; CELL_COUNT];
    let mut frontier: Vec<(Position, Sweep, u8)> = SEEDS
        .iter()
        .filter_map(|&(direction, sweep)| Some((origin.neighbor(direction)?, sweep, 1)))
        .collect();

    while let Some((position, sweep, distance)) = frontier.pop() {
        let Some(index) = position.index() else {
            continue;
        };
        let Some(seen) = best.get_mut(index).and_then(|b| b.get_mut(sweep.slot())) else {
            continue;
        };
        if distance >= *seen {
            continue;
        }
        *seen = distance;

        if let Some(cell) = fields.get_mut(index).and_then(|f| f.get_mut(slot)) {
            if *cell == 0 || distance < *cell {
                *cell = distance;
            }
        }

        for &(direction, next_sweep) in sweep.continuations() {
            if let Some(next) = position.neighbor(direction) {
                frontier.push((next, next_sweep, distance.saturating_add(1)));
            }
        }
    }
}
