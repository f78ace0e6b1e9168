//! The surface presentation layers drive a game through.
//!
//! Renderers and prompt loops hold a `&mut dyn BackgammonEngine` and never
//! reach into the board, dice or players directly.

use crate::backgammon::{
    BoardState, DieSource, GameEngine, GameStats, HalfMove, MoveRecord, PlayError, Player, Position, Turn, TurnPhase,
};

pub trait BackgammonEngine {
    fn board_state(&self) -> BoardState;

    /// Text diagram of the board.
    fn render_board(&self) -> String;

    fn current_player(&self) -> &Player;

    fn available_dice(&self) -> Vec<u8>;

    fn possible_moves(&self) -> Vec<HalfMove>;

    fn legal_turns(&self) -> Vec<Turn>;

    fn phase(&self) -> TurnPhase;

    fn is_game_over(&self) -> bool;

    fn winner(&self) -> Option<&Player>;

    fn stats(&self) -> GameStats;

    fn roll_dice(&mut self) -> Result<(u8, u8), PlayError>;

    fn make_move(&mut self, from: Position, to: Position) -> Result<MoveRecord, PlayError>;

    fn use_dice_move(&mut self, distance: u8) -> bool;

    fn complete_turn(&mut self) -> Result<(), PlayError>;

    fn switch_turns(&mut self) -> Result<(), PlayError>;

    fn undo_last_move(&mut self) -> Result<MoveRecord, PlayError>;

    fn reset_game(&mut self);

    fn pause(&mut self);

    fn resume(&mut self);
}

impl<S: DieSource> BackgammonEngine for GameEngine<S> {
    fn board_state(&self) -> BoardState {
        self.board().state()
    }

    fn render_board(&self) -> String {
        self.board().to_string()
    }

    fn current_player(&self) -> &Player {
        GameEngine::current_player(self)
    }

    fn available_dice(&self) -> Vec<u8> {
        GameEngine::available_dice(self)
    }

    fn possible_moves(&self) -> Vec<HalfMove> {
        GameEngine::possible_moves(self)
    }

    fn legal_turns(&self) -> Vec<Turn> {
        GameEngine::legal_turns(self)
    }

    fn phase(&self) -> TurnPhase {
        GameEngine::phase(self)
    }

    fn is_game_over(&self) -> bool {
        GameEngine::is_game_over(self)
    }

    fn winner(&self) -> Option<&Player> {
        GameEngine::winner(self)
    }

    fn stats(&self) -> GameStats {
        GameEngine::stats(self)
    }

    fn roll_dice(&mut self) -> Result<(u8, u8), PlayError> {
        GameEngine::roll_dice(self)
    }

    fn make_move(&mut self, from: Position, to: Position) -> Result<MoveRecord, PlayError> {
        GameEngine::make_move(self, from, to)
    }

    fn use_dice_move(&mut self, distance: u8) -> bool {
        GameEngine::use_dice_move(self, distance)
    }

    fn complete_turn(&mut self) -> Result<(), PlayError> {
        GameEngine::complete_turn(self)
    }

    fn switch_turns(&mut self) -> Result<(), PlayError> {
        GameEngine::switch_turns(self)
    }

    fn undo_last_move(&mut self) -> Result<MoveRecord, PlayError> {
        GameEngine::undo_last_move(self)
    }

    fn reset_game(&mut self) {
        GameEngine::reset_game(self)
    }

    fn pause(&mut self) {
        GameEngine::pause(self)
    }

    fn resume(&mut self) {
        GameEngine::resume(self)
    }
}

/// Plays one whole turn for the current player: rolls, applies the turn
/// `choose` picks out of the legal ones, and passes the dice on.
/// `choose` is not called when there is nothing to play.
pub fn play_turn(
    engine: &mut dyn BackgammonEngine,
    mut choose: impl FnMut(&[Turn]) -> usize,
) -> Result<Vec<MoveRecord>, PlayError> {
    engine.roll_dice()?;
    let turns = engine.legal_turns();
    let mut records = Vec::new();
    if !turns.is_empty() {
        let index = choose(&turns).min(turns.len() - 1);
        for half_move in turns[index].iter() {
            records.push(engine.make_move(half_move.from, half_move.to)?);
        }
    }
    if engine.is_game_over() {
        return Ok(records);
    }
    // Dice the chosen turn could not use are forfeited.
    for die in engine.available_dice() {
        engine.use_dice_move(die);
    }
    engine.complete_turn()?;
    Ok(records)
}
