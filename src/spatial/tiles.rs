//! Tile kinds, their matching categories and the staged unlock counter

use crate::io::error::SolverError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of staged (metal) tile kinds
pub const STAGE_COUNT: usize = 6;

/// The kind of tile occupying a cell
///
/// Serialized as the lowercase label used in board files; an empty cell is `""`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TileKind {
    /// Vacant cell
    #[default]
    #[serde(rename = "")]
    Empty,
    /// Cardinal element, pairs with itself
    #[serde(rename = "cyan")]
    Cyan,
    /// Cardinal element, pairs with itself
    #[serde(rename = "orange")]
    Orange,
    /// Cardinal element, pairs with itself
    #[serde(rename = "blue")]
    Blue,
    /// Cardinal element, pairs with itself
    #[serde(rename = "green")]
    Green,
    /// Universal tile, pairs with any cardinal element or with itself
    #[serde(rename = "white")]
    White,
    /// Complementary half, pairs only with [`TileKind::Dark`]
    #[serde(rename = "light")]
    Light,
    /// Complementary half, pairs only with [`TileKind::Light`]
    #[serde(rename = "dark")]
    Dark,
    /// Catalyst, pairs with the currently reachable metal
    #[serde(rename = "key")]
    Key,
    /// First metal stage
    #[serde(rename = "l1")]
    L1,
    /// Second metal stage
    #[serde(rename = "l2")]
    L2,
    /// Third metal stage
    #[serde(rename = "l3")]
    L3,
    /// Fourth metal stage
    #[serde(rename = "l4")]
    L4,
    /// Fifth metal stage
    #[serde(rename = "l5")]
    L5,
    /// Final metal stage, removed on its own
    #[serde(rename = "l6")]
    L6,
}

impl TileKind {
    /// Number of kinds including [`TileKind::Empty`]
    pub const COUNT: usize = 15;

    /// Every kind in declaration order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Empty,
        Self::Cyan,
        Self::Orange,
        Self::Blue,
        Self::Green,
        Self::White,
        Self::Light,
        Self::Dark,
        Self::Key,
        Self::L1,
        Self::L2,
        Self::L3,
        Self::L4,
        Self::L5,
        Self::L6,
    ];

    /// The four cardinal elements in candidate generation order
    pub const CARDINALS: [Self; 4] = [Self::Cyan, Self::Orange, Self::Blue, Self::Green];

    /// The six metals in unlock order
    pub const METALS: [Self; STAGE_COUNT] =
        [Self::L1, Self::L2, Self::L3, Self::L4, Self::L5, Self::L6];

    /// Dense index for per-kind tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Board file label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Cyan => "cyan",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::White => "white",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Key => "key",
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::L3 => "l3",
            Self::L4 => "l4",
            Self::L5 => "l5",
            Self::L6 => "l6",
        }
    }

    /// Parse a board file label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Metal stage in `1..=6`, `None` for every other kind
    pub const fn stage(self) -> Option<u8> {
        match self {
            Self::L1 => Some(1),
            Self::L2 => Some(2),
            Self::L3 => Some(3),
            Self::L4 => Some(4),
            Self::L5 => Some(5),
            Self::L6 => Some(6),
            _ => None,
        }
    }

    /// The metal for a stage in `1..=6`
    pub const fn metal(stage: u8) -> Option<Self> {
        match stage {
            1 => Some(Self::L1),
            2 => Some(Self::L2),
            3 => Some(Self::L3),
            4 => Some(Self::L4),
            5 => Some(Self::L5),
            6 => Some(Self::L6),
            _ => None,
        }
    }

    /// Whether this kind is one of the six metals
    pub const fn is_metal(self) -> bool {
        self.stage().is_some()
    }

    /// Whether this kind is one of the four cardinal elements
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::Cyan | Self::Orange | Self::Blue | Self::Green)
    }

    /// Whether the cell holds a tile
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TileKind {
    type Err = SolverError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::from_label(label).ok_or_else(|| SolverError::UnknownTile {
            label: label.to_string(),
            position: None,
        })
    }
}

/// How many metals have been consumed, `0..=6`
///
/// The metal of stage `s` becomes reachable once the counter reaches `s - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlchemyStage(u8);

impl AlchemyStage {
    /// Nothing consumed yet
    pub const START: Self = Self(0);

    /// All six metals consumed
    pub const FINAL: Self = Self(STAGE_COUNT as u8);

    /// Numeric value in `0..=6`
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether every metal has been consumed
    pub const fn is_final(self) -> bool {
        self.0 >= Self::FINAL.0
    }

    /// Distance slot of the metal that is reachable next
    pub const fn target_slot(self) -> usize {
        self.0 as usize
    }

    /// The metal that may be removed next, `None` once all are consumed
    pub const fn next_metal(self) -> Option<TileKind> {
        TileKind::metal(self.0 + 1)
    }

    /// Whether a metal of `stage` lies beyond the unlock frontier
    pub const fn is_out_of_reach(self, stage: u8) -> bool {
        stage > self.0 + 1
    }

    /// The following stage, `None` past the final one
    pub const fn advanced(self) -> Option<Self> {
        if self.is_final() {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    /// The preceding stage, `None` before the first one
    pub const fn retreated(self) -> Option<Self> {
        if self.0 == 0 {
            None
        } else {
            Some(Self(self.0 - 1))
        }
    }
}

impl fmt::Display for AlchemyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{STAGE_COUNT}", self.0)
    }
}
