use std::{fmt::Debug, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::backgammon::HalfMove;

/// Every half-move one player makes with a single roll.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    half_moves: Vec<HalfMove>,
}

impl Turn {
    pub fn new() -> Self {
        Turn { half_moves: Vec::with_capacity(4) }
    }

    pub fn add_half_move(&mut self, half_move: HalfMove) {
        self.half_moves.push(half_move);
    }

    /// Order-independent identity. Two turns that play the same half-moves in a
    /// different order share a key.
    pub fn unordered_key(&self) -> Vec<HalfMove> {
        let mut key = self.half_moves.clone();
        key.sort_unstable();
        key
    }

    pub fn unordered_equal(&self, other: &Self) -> bool {
        self.half_moves.len() == other.half_moves.len() && self.unordered_key() == other.unordered_key()
    }
}

impl Deref for Turn {
    type Target = [HalfMove];

    fn deref(&self) -> &Self::Target {
        &self.half_moves
    }
}

impl Debug for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Turn: ")?;
        for (i, half_move) in self.half_moves.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", half_move)?;
        }
        Ok(())
    }
}
