//! Candidate pair generation and distance-biased ordering for one search node
//!
//! The matching rules are applied to the possibility index in a fixed priority
//! order: key with metal, the final metal alone, light with dark, cardinal pairs,
//! then white pairings. Before the last metal is gone the list is reordered so
//! pairs closest to the next metal come first.

use crate::algorithm::possibility::PossibilityIndex;
use crate::spatial::board::Board;
use crate::spatial::grid::Position;
use crate::spatial::tiles::TileKind;
use std::fmt;

/// Metals that pair with the key; the final metal is removed on its own
const KEYED_METALS: [TileKind; 5] = [
    TileKind::L1,
    TileKind::L2,
    TileKind::L3,
    TileKind::L4,
    TileKind::L5,
];

/// A legal removal: two positions, identical for a solo removal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// First tile of the pair; the white or key tile when one is involved
    pub first: Position,
    /// Second tile of the pair
    pub second: Position,
}

impl Candidate {
    /// Pair two positions
    pub const fn pair(first: Position, second: Position) -> Self {
        Self { first, second }
    }

    /// A single tile removed without a partner
    pub const fn solo(position: Position) -> Self {
        Self {
            first: position,
            second: position,
        }
    }

    /// Whether both halves name the same cell
    pub fn is_solo(&self) -> bool {
        self.first == self.second
    }
}

/// Every legal removal for the board as indexed, in matching-rule order
pub fn legal_pairs(board: &Board, index: &PossibilityIndex) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for &key in index.positions(TileKind::Key) {
        for metal in KEYED_METALS {
            candidates.extend(
                index
                    .positions(metal)
                    .iter()
                    .map(|&target| Candidate::pair(key, target)),
            );
        }
    }

    if let [final_metal] = index.positions(TileKind::L6) {
        candidates.push(Candidate::solo(*final_metal));
    }

    cross_pairs(
        index.positions(TileKind::Light),
        index.positions(TileKind::Dark),
        &mut candidates,
    );

    for cardinal in TileKind::CARDINALS {
        self_pairs(index.positions(cardinal), &mut candidates);
    }

    white_pairs(board, index, &mut candidates);

    candidates
}

// White is offered against a cardinal while the balance stays below the white supply,
// or whenever the cardinal's count is odd and a white is needed to finish it
fn white_pairs(board: &Board, index: &PossibilityIndex, candidates: &mut Vec<Candidate>) {
    let whites = index.positions(TileKind::White);
    let white_supply = i32::try_from(board.remaining(TileKind::White)).unwrap_or(i32::MAX);
    let white_available = board.white_balance() < white_supply;

    for (i, &white) in whites.iter().enumerate() {
        for cardinal in TileKind::CARDINALS {
            if white_available || board.remaining(cardinal) % 2 == 1 {
                candidates.extend(
                    index
                        .positions(cardinal)
                        .iter()
                        .map(|&target| Candidate::pair(white, target)),
                );
            }
        }
        if white_available {
            candidates.extend(
                whites
                    .iter()
                    .skip(i + 1)
                    .map(|&other| Candidate::pair(white, other)),
            );
        }
    }
}

fn cross_pairs(left: &[Position], right: &[Position], candidates: &mut Vec<Candidate>) {
    for &a in left {
        candidates.extend(right.iter().map(|&b| Candidate::pair(a, b)));
    }
}

fn self_pairs(positions: &[Position], candidates: &mut Vec<Candidate>) {
    for (i, &a) in positions.iter().enumerate() {
        candidates.extend(
            positions
                .iter()
                .skip(i + 1)
                .map(|&b| Candidate::pair(a, b)),
        );
    }
}

/// Reorder candidates so pairs nearer the next metal come first
///
/// The pair whose nearer tile is strictly closer ranks first; pairs with equally
/// near tiles rank by the sum of both distances; full ties keep generation order.
/// Once every metal is consumed there is nothing to steer towards and the order is
/// left alone.
pub fn order_by_unlock_distance(board: &Board, candidates: &mut [Candidate]) {
    let stage = board.stage();
    if stage.is_final() {
        return;
    }

    let distance = |position: Position| {
        board
            .tile(position)
            .map_or(0, |tile| tile.distance_to_next(stage))
    };
    candidates.sort_by_cached_key(|candidate| {
        let a = distance(candidate.first);
        let b = distance(candidate.second);
        (a.min(b), u16::from(a) + u16::from(b))
    });
}

/// One search depth: the ordered candidates of a node and a read cursor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateFrame {
    candidates: Vec<Candidate>,
    cursor: usize,
}

impl CandidateFrame {
    /// Generate and order the candidates for the board as indexed
    pub fn new(board: &Board, index: &PossibilityIndex) -> Self {
        let mut candidates = legal_pairs(board, index);
        order_by_unlock_distance(board, &mut candidates);
        Self {
            candidates,
            cursor: 0,
        }
    }

    /// Candidates in the order they will be tried
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// How many candidates have been handed out
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total candidates at this node
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the node had no legal move at all
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl Iterator for CandidateFrame {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        let candidate = self.candidates.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(candidate)
    }
}

impl fmt::Display for CandidateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cursor, self.candidates.len())
    }
}
