use serde::{Deserialize, Serialize};

use crate::backgammon::{Board, CHECKERS_PER_SIDE, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Ongoing,
    Win(Color),
    /// The loser bore off nothing.
    Gammon(Color),
    /// Gammon, and the loser still has a checker on the bar or in the winner's home board.
    Backgammon(Color),
}

impl GameOutcome {
    pub fn of(board: &Board) -> Self {
        let Some(winner) = Color::ALL.into_iter().find(|&c| board.off_count(c) == CHECKERS_PER_SIDE) else {
            return GameOutcome::Ongoing;
        };
        let loser = winner.opposite();
        if board.off_count(loser) > 0 {
            return GameOutcome::Win(winner);
        }
        let stuck_in_home = winner
            .home_indices()
            .any(|i| board.point_top_color(i).ok().flatten() == Some(loser));
        if board.bar_count(loser) > 0 || stuck_in_home {
            GameOutcome::Backgammon(winner)
        } else {
            GameOutcome::Gammon(winner)
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match *self {
            GameOutcome::Ongoing => None,
            GameOutcome::Win(c) | GameOutcome::Gammon(c) | GameOutcome::Backgammon(c) => Some(c),
        }
    }

    /// Multiplier the win is worth: 1, 2 or 3.
    pub fn points(&self) -> u8 {
        match self {
            GameOutcome::Ongoing => 0,
            GameOutcome::Win(_) => 1,
            GameOutcome::Gammon(_) => 2,
            GameOutcome::Backgammon(_) => 3,
        }
    }
}
