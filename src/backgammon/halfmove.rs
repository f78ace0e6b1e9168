use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::backgammon::Position;

/// A single checker movement paid for with one die.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HalfMove {
    pub from: Position,
    pub to: Position,
    pub die: u8,
}

impl HalfMove {
    pub fn new(from: Position, to: Position, die: u8) -> Self {
        HalfMove { from, to, die }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }

    pub fn is_bear_off(&self) -> bool {
        self.to == Position::Off
    }

    pub fn is_bar_entry(&self) -> bool {
        self.from == Position::Bar
    }
}

impl Debug for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.die)
    }
}
