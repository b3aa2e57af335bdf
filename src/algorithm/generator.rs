//! Seeded generation of puzzles that are solvable by construction
//!
//! A removal order is drawn first: shuffled element, white and light/dark pairs
//! with the key/metal removals interleaved in stage order and the final metal
//! removed alone. Tiles are then placed in reverse of that order, each pair only
//! where both tiles would be free to lift at the moment they are removed. The
//! reverse of the placement order is therefore a valid clearing sequence.

use crate::algorithm::bitset::CellBitset;
use crate::algorithm::lock::{is_geometrically_blocked, occupancy_ring};
use crate::algorithm::selection::Candidate;
use crate::io::configuration::GENERATION_ATTEMPTS;
use crate::io::error::{Result, SolverError};
use crate::spatial::board::Board;
use crate::spatial::grid::{CELL_COUNT, Position, ROW_LENGTHS, all_positions};
use crate::spatial::tiles::TileKind;
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};

/// Same-element pairs of each cardinal in the standard set
const CARDINAL_PAIRS: usize = 4;
/// White-with-white pairs in the standard set
const WHITE_PAIRS: usize = 2;
/// Light-with-dark pairs in the standard set
const LIGHT_DARK_PAIRS: usize = 4;

/// A generated board together with the removal order it was built from
#[derive(Clone, Debug)]
pub struct GeneratedPuzzle {
    /// Seed the puzzle was generated from
    pub seed: u64,
    /// Initial board
    pub board: Board,
    /// A clearing sequence for `board`, first removal first
    pub plan: Vec<Candidate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlannedRemoval {
    first: TileKind,
    second: Option<TileKind>,
}

impl PlannedRemoval {
    const fn pair(first: TileKind, second: TileKind) -> Self {
        Self {
            first,
            second: Some(second),
        }
    }

    const fn solo(kind: TileKind) -> Self {
        Self {
            first: kind,
            second: None,
        }
    }
}

/// Generate the standard 55-tile puzzle from a seed
///
/// # Errors
///
/// Returns [`SolverError::GenerationFailed`] if no layout could be completed within
/// the attempt budget
pub fn generate_puzzle(seed: u64) -> Result<GeneratedPuzzle> {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..GENERATION_ATTEMPTS {
        let order = removal_order(&mut rng);
        if let Some((kinds, plan)) = place_in_reverse(&order, &mut rng) {
            let board = Board::from_kinds(&to_rows(&kinds))?;
            return Ok(GeneratedPuzzle { seed, board, plan });
        }
    }

    Err(SolverError::GenerationFailed {
        seed,
        attempts: GENERATION_ATTEMPTS,
    })
}

fn removal_order(rng: &mut StdRng) -> Vec<PlannedRemoval> {
    let mut free = Vec::new();
    for cardinal in TileKind::CARDINALS {
        free.extend(std::iter::repeat_n(
            PlannedRemoval::pair(cardinal, cardinal),
            CARDINAL_PAIRS,
        ));
    }
    free.extend(std::iter::repeat_n(
        PlannedRemoval::pair(TileKind::White, TileKind::White),
        WHITE_PAIRS,
    ));
    free.extend(std::iter::repeat_n(
        PlannedRemoval::pair(TileKind::Light, TileKind::Dark),
        LIGHT_DARK_PAIRS,
    ));
    free.shuffle(rng);

    let mut metals: Vec<PlannedRemoval> = TileKind::METALS
        .iter()
        .map(|&metal| {
            if metal == TileKind::L6 {
                PlannedRemoval::solo(metal)
            } else {
                PlannedRemoval::pair(TileKind::Key, metal)
            }
        })
        .collect();

    let total = free.len() + metals.len();
    let mut metal_slots: Vec<usize> = (0..total).collect();
    metal_slots.shuffle(rng);
    metal_slots.truncate(metals.len());
    metal_slots.sort_unstable();

    // Metals keep stage order; only their slots among the free pairs are random
    metals.reverse();
    free.reverse();
    (0..total)
        .filter_map(|slot| {
            if metal_slots.binary_search(&slot).is_ok() {
                metals.pop()
            } else {
                free.pop()
            }
        })
        .collect()
}

fn place_in_reverse(
    order: &[PlannedRemoval],
    rng: &mut StdRng,
) -> Option<([TileKind; CELL_COUNT], Vec<Candidate>)> {
    let mut kinds = [TileKind::Empty; CELL_COUNT];
    let mut occupied = CellBitset::new();
    let mut plan = Vec::with_capacity(order.len());

    for removal in order.iter().rev() {
        let mut vacant: Vec<Position> = all_positions()
            .filter(|&position| !occupied.contains(position))
            .collect();
        vacant.shuffle(rng);

        let candidate = match removal.second {
            None => find_solo_slot(&vacant, &mut occupied)?,
            Some(_) => find_pair_slots(&vacant, &mut occupied)?,
        };

        occupied.insert(candidate.first);
        set_kind(&mut kinds, candidate.first, removal.first);
        if let Some(second) = removal.second {
            occupied.insert(candidate.second);
            set_kind(&mut kinds, candidate.second, second);
        }
        plan.push(candidate);
    }

    plan.reverse();
    Some((kinds, plan))
}

fn find_solo_slot(vacant: &[Position], occupied: &mut CellBitset) -> Option<Candidate> {
    vacant.iter().copied().find_map(|position| {
        occupied.insert(position);
        let free = is_free(occupied, position);
        occupied.remove(position);
        free.then_some(Candidate::solo(position))
    })
}

fn find_pair_slots(vacant: &[Position], occupied: &mut CellBitset) -> Option<Candidate> {
    for (i, &first) in vacant.iter().enumerate() {
        occupied.insert(first);
        for &second in vacant.iter().skip(i + 1) {
            occupied.insert(second);
            let free = is_free(occupied, first) && is_free(occupied, second);
            occupied.remove(second);
            if free {
                occupied.remove(first);
                return Some(Candidate::pair(first, second));
            }
        }
        occupied.remove(first);
    }
    None
}

fn is_free(occupied: &CellBitset, position: Position) -> bool {
    !is_geometrically_blocked(occupancy_ring(occupied, position))
}

fn set_kind(kinds: &mut [TileKind; CELL_COUNT], position: Position, kind: TileKind) {
    if let Some(cell) = position.index().and_then(|index| kinds.get_mut(index)) {
        *cell = kind;
    }
}

fn to_rows(kinds: &[TileKind; CELL_COUNT]) -> Vec<Vec<TileKind>> {
    let mut cells = kinds.iter().copied();
    ROW_LENGTHS
        .iter()
        .map(|&length| cells.by_ref().take(length).collect())
        .collect()
}
