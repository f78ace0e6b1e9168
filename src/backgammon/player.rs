use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::backgammon::{Board, CHECKERS_PER_SIDE, Color, EngineError};

/// One seat at the table and where its 15 checkers currently are.
/// `on_board + off_board + on_bar` is always 15.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    color: Color,
    on_board: u8,
    off_board: u8,
    on_bar: u8,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Player {
            name: name.into(),
            color,
            on_board: CHECKERS_PER_SIDE as u8,
            off_board: 0,
            on_bar: 0,
        }
    }

    /// Like [`Self::new`] for colors that arrive as text, e.g. from a saved game.
    pub fn with_color_name(name: impl Into<String>, color: &str) -> Result<Self, EngineError> {
        Ok(Self::new(name, color.parse()?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn on_board(&self) -> u8 {
        self.on_board
    }

    pub fn off_board(&self) -> u8 {
        self.off_board
    }

    pub fn on_bar(&self) -> u8 {
        self.on_bar
    }

    fn underflow(&self, counter: &'static str) -> EngineError {
        EngineError::CounterUnderflow { color: self.color, counter }
    }

    pub fn move_checker_off(&mut self) -> Result<(), EngineError> {
        self.on_board = self.on_board.checked_sub(1).ok_or_else(|| self.underflow("on the board"))?;
        self.off_board += 1;
        Ok(())
    }

    pub fn move_checker_to_bar(&mut self) -> Result<(), EngineError> {
        self.on_board = self.on_board.checked_sub(1).ok_or_else(|| self.underflow("on the board"))?;
        self.on_bar += 1;
        Ok(())
    }

    pub fn move_checker_from_bar(&mut self) -> Result<(), EngineError> {
        self.on_bar = self.on_bar.checked_sub(1).ok_or_else(|| self.underflow("on the bar"))?;
        self.on_board += 1;
        Ok(())
    }

    /// Takes back a borne-off checker. Only used when a bear-off is undone.
    pub fn return_checker_from_off(&mut self) -> Result<(), EngineError> {
        self.off_board = self.off_board.checked_sub(1).ok_or_else(|| self.underflow("borne off"))?;
        self.on_board += 1;
        Ok(())
    }

    pub fn has_won(&self) -> bool {
        self.off_board as usize == CHECKERS_PER_SIDE && self.on_board == 0 && self.on_bar == 0
    }

    pub fn direction(&self) -> i8 {
        self.color.direction()
    }

    /// External point numbers of this player's home board.
    pub fn home_board_range(&self) -> RangeInclusive<u8> {
        let indices = self.color.home_indices();
        (*indices.start() as u8 + 1)..=(*indices.end() as u8 + 1)
    }

    /// Virtual point a checker on the bar starts from: entering with a die `d`
    /// lands on `starting_entry_point() + direction() * d`.
    pub fn starting_entry_point(&self) -> u8 {
        match self.color {
            Color::White => 25,
            Color::Black => 0,
        }
    }

    pub fn can_bear_off(&self, board: &Board) -> bool {
        board.all_checkers_in_home_board(self.color)
    }

    pub fn opponent_color(&self) -> Color {
        self.color.opposite()
    }

    /// True when the counters agree with where `board` has this color's checkers.
    pub fn matches_board(&self, board: &Board) -> bool {
        self.on_board as usize == board.checkers_on_points(self.color)
            && self.on_bar as usize == board.bar_count(self.color)
            && self.off_board as usize == board.off_count(self.color)
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.on_board as usize + self.off_board as usize + self.on_bar as usize == CHECKERS_PER_SIDE
    }

    pub fn reset(&mut self) {
        self.on_board = CHECKERS_PER_SIDE as u8;
        self.off_board = 0;
        self.on_bar = 0;
    }
}
