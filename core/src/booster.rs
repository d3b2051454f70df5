//! Collectible boosters placed on the map.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Point;

/// Kinds of boosters that appear in task descriptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BoosterCode {
    /// Grants one manipulator extension (`B`).
    Extension,
    /// Grants one activation of fast wheels (`F`).
    Wheels,
    /// Grants one activation of the drill (`L`).
    Drill,
    /// Grants one teleport beacon (`R`).
    Teleport,
    /// Grants one clone (`C`).
    Clone,
    /// Marks a cell where clones may be spawned (`X`); never collected.
    Spawn,
}

impl BoosterCode {
    /// Codes that can be collected into the inventory.
    pub const PICKABLE: [BoosterCode; 5] = [
        BoosterCode::Extension,
        BoosterCode::Wheels,
        BoosterCode::Drill,
        BoosterCode::Teleport,
        BoosterCode::Clone,
    ];

    /// Single-letter symbol used by the task format.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Extension => 'B',
            Self::Wheels => 'F',
            Self::Drill => 'L',
            Self::Teleport => 'R',
            Self::Clone => 'C',
            Self::Spawn => 'X',
        }
    }

    /// Parses a code from its symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'B' => Some(Self::Extension),
            'F' => Some(Self::Wheels),
            'L' => Some(Self::Drill),
            'R' => Some(Self::Teleport),
            'C' => Some(Self::Clone),
            'X' => Some(Self::Spawn),
            _ => None,
        }
    }

    /// Reports whether bots collect this booster when stepping onto it.
    #[must_use]
    pub const fn is_pickable(self) -> bool {
        !matches!(self, Self::Spawn)
    }

    /// Human readable name used in diagnostics.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Extension => "manipulator extension",
            Self::Wheels => "fast wheels",
            Self::Drill => "drill",
            Self::Teleport => "teleport beacon",
            Self::Clone => "clone",
            Self::Spawn => "spawn point",
        }
    }
}

impl fmt::Display for BoosterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Booster lying on the map at a fixed location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Booster {
    code: BoosterCode,
    pos: Point,
}

impl Booster {
    /// Creates a booster of the given kind at `pos`.
    #[must_use]
    pub const fn new(code: BoosterCode, pos: Point) -> Self {
        Self { code, pos }
    }

    /// Kind of the booster.
    #[must_use]
    pub const fn code(&self) -> BoosterCode {
        self.code
    }

    /// Location of the booster.
    #[must_use]
    pub const fn pos(&self) -> Point {
        self.pos
    }
}

impl fmt::Display for Booster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.code, self.pos)
    }
}
