use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    backgammon::{
        Board, BoardState, Color, Dice, DiceState, DieSource, EngineError, GameOutcome, HalfMove, Landing, Player,
        PlayError, Position, RandomDice, Turn,
    },
    config::EngineConfig,
};

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    AwaitingRoll,
    MovesAvailable,
    /// Nothing left to play; waiting for [`GameEngine::complete_turn`].
    TurnComplete,
    GameOver,
}

/// One applied half-move, with enough detail to take it back exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub color: Color,
    pub die: u8,
    /// Color of the checker sent to the bar, if any.
    pub hit: Option<Color>,
    pub turn: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub move_count: u32,
    pub turn_count: u32,
    pub duration_seconds: Option<i64>,
    pub winner_name: Option<String>,
    pub outcome: GameOutcome,
}

/// Everything needed to resume a game exactly where it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: BoardState,
    pub dice: DiceState,
    pub players: [Player; 2],
    pub current_player_index: usize,
    pub phase: TurnPhase,
    pub started: bool,
    pub paused: bool,
    pub move_history: Vec<MoveRecord>,
    pub move_count: u32,
    pub turn_number: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// A two-player game: board, dice, seats and turn order.
///
/// Seat 0 plays White and moves first. All commands either apply completely
/// or return a [`PlayError`] with the state untouched.
#[derive(Debug)]
pub struct GameEngine<S: DieSource = RandomDice> {
    board: Board,
    dice: Dice,
    players: [Player; 2],
    current_player_index: usize,
    phase: TurnPhase,
    started: bool,
    paused: bool,
    move_history: Vec<MoveRecord>,
    move_count: u32,
    turn_number: u32,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    source: S,
}

impl GameEngine<RandomDice> {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_source(config, config.dice_source())
    }
}

impl<S: DieSource> GameEngine<S> {
    pub fn with_source(config: &EngineConfig, source: S) -> Self {
        GameEngine {
            board: Board::new().with_bear_off_rule(config.bear_off_rule),
            dice: Dice::new(),
            players: [
                Player::new(config.white_name.clone(), Color::White),
                Player::new(config.black_name.clone(), Color::Black),
            ],
            current_player_index: 0,
            phase: TurnPhase::AwaitingRoll,
            started: false,
            paused: false,
            move_history: Vec::new(),
            move_count: 0,
            turn_number: 1,
            started_at: None,
            ended_at: None,
            source,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_color(&self) -> Color {
        self.current_player().color()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn available_dice(&self) -> Vec<u8> {
        self.dice.available_moves()
    }

    fn seat(&self, color: Color) -> usize {
        if self.players[0].color() == color { 0 } else { 1 }
    }

    pub fn start_game(&mut self) {
        if !self.started {
            self.started = true;
            self.started_at = Some(Utc::now());
            info!(white = self.players[0].name(), black = self.players[1].name(), "game started");
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    fn ensure_playable(&self) -> Result<(), PlayError> {
        if self.paused {
            return Err(PlayError::Paused);
        }
        if self.phase == TurnPhase::GameOver {
            return Err(PlayError::GameOver);
        }
        Ok(())
    }

    /// Structural check only: `from` is a point or the bar, `to` is a point or off.
    pub fn validate_move_coordinates(from: Position, to: Position) -> bool {
        from.is_valid_source() && to.is_valid_target() && from != to
    }

    #[instrument(skip(self), level = "debug")]
    pub fn roll_dice(&mut self) -> Result<(u8, u8), PlayError> {
        self.ensure_playable()?;
        if self.phase != TurnPhase::AwaitingRoll {
            return Err(PlayError::AlreadyRolled);
        }
        self.start_game();
        let roll = self.dice.roll(&mut self.source);
        self.phase = if self.has_valid_moves() {
            TurnPhase::MovesAvailable
        } else {
            debug!(player = self.current_player().name(), "no legal move after roll");
            TurnPhase::TurnComplete
        };
        Ok(roll)
    }

    /// Half-moves the current player can make with one of the remaining dice.
    pub fn possible_moves(&self) -> Vec<HalfMove> {
        if self.phase == TurnPhase::GameOver {
            return Vec::new();
        }
        self.board.possible_moves(self.current_color(), &self.dice.available_moves())
    }

    pub fn has_valid_moves(&self) -> bool {
        !self.possible_moves().is_empty()
    }

    /// Complete ways to play the rest of the current roll.
    pub fn legal_turns(&self) -> Vec<Turn> {
        if self.phase == TurnPhase::GameOver {
            return Vec::new();
        }
        self.board.legal_turns(self.current_color(), &self.dice)
    }

    /// Moves a checker of the current player and pays for it with the matching die.
    #[instrument(skip(self), level = "debug")]
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveRecord, PlayError> {
        self.ensure_playable()?;
        if !Self::validate_move_coordinates(from, to) {
            return Err(PlayError::InvalidCoordinates);
        }
        if self.phase == TurnPhase::AwaitingRoll {
            return Err(PlayError::NotRolled);
        }

        let color = self.current_color();
        let half_move = self
            .possible_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .ok_or_else(|| self.refusal(color, from, to))?;

        let mut board = self.board.clone();
        let landing = board.apply_half_move(color, &half_move).ok_or(PlayError::IllegalMove)?;
        let mut players = self.players.clone();
        self.book_move(&mut players, color, &half_move, landing)
            .map_err(|_| PlayError::IllegalMove)?;

        self.board = board;
        self.players = players;
        self.dice.use_move(half_move.die);

        let record = MoveRecord {
            from,
            to,
            color,
            die: half_move.die,
            hit: landing.hit(),
            turn: self.turn_number,
        };
        self.move_history.push(record);
        self.move_count += 1;
        debug!(?record, "move applied");

        self.refresh_phase();
        Ok(record)
    }

    /// Tells a move that needs a die the player no longer holds apart from
    /// one no die could make legal.
    fn refusal(&self, color: Color, from: Position, to: Position) -> PlayError {
        self.board
            .possible_moves(color, &[1, 2, 3, 4, 5, 6])
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .map_or(PlayError::IllegalMove, |m| PlayError::DieUnavailable { value: m.die })
    }

    fn book_move(&self, players: &mut [Player; 2], color: Color, half_move: &HalfMove, landing: Landing) -> Result<(), EngineError> {
        let mover = self.seat(color);
        if half_move.is_bar_entry() {
            players[mover].move_checker_from_bar()?;
        }
        match landing {
            Landing::Hit(victim) => players[self.seat(victim)].move_checker_to_bar()?,
            Landing::BorneOff => players[mover].move_checker_off()?,
            Landing::Placed => {}
        }
        Ok(())
    }

    fn refresh_phase(&mut self) {
        if self.players.iter().any(Player::has_won) {
            self.phase = TurnPhase::GameOver;
            self.ended_at = Some(Utc::now());
            info!(winner = self.current_player().name(), outcome = ?self.outcome(), moves = self.move_count, "game over");
        } else if self.dice.has_moves() && self.has_valid_moves() {
            self.phase = TurnPhase::MovesAvailable;
        } else {
            self.phase = TurnPhase::TurnComplete;
        }
    }

    /// Gives up one remaining die value without moving.
    pub fn use_dice_move(&mut self, distance: u8) -> bool {
        if self.ensure_playable().is_err() || self.phase == TurnPhase::AwaitingRoll {
            return false;
        }
        let used = self.dice.use_move(distance);
        if used {
            debug!(distance, "die forfeited");
            self.refresh_phase();
        }
        used
    }

    /// Ends a finished turn and hands the dice to the other player.
    pub fn complete_turn(&mut self) -> Result<(), PlayError> {
        self.ensure_playable()?;
        match self.phase {
            TurnPhase::AwaitingRoll => Err(PlayError::NotRolled),
            TurnPhase::MovesAvailable => Err(PlayError::TurnNotComplete),
            _ => self.switch_turns(),
        }
    }

    /// Hands the dice to the other player regardless of what is left to play.
    pub fn switch_turns(&mut self) -> Result<(), PlayError> {
        self.ensure_playable()?;
        self.dice.reset();
        self.current_player_index = 1 - self.current_player_index;
        self.turn_number += 1;
        self.phase = TurnPhase::AwaitingRoll;
        debug!(player = self.current_player().name(), turn = self.turn_number, "turn switched");
        Ok(())
    }

    /// Takes back the latest move of the current turn, including any hit it
    /// made and the die it used.
    #[instrument(skip(self), level = "debug")]
    pub fn undo_last_move(&mut self) -> Result<MoveRecord, PlayError> {
        self.ensure_playable()?;
        let record = *self
            .move_history
            .last()
            .filter(|r| r.turn == self.turn_number && self.phase != TurnPhase::AwaitingRoll)
            .ok_or(PlayError::NothingToUndo)?;

        let mut board = self.board.clone();
        if !board.revert_half_move(record.color, record.from, record.to, record.hit) {
            return Err(PlayError::NothingToUndo);
        }
        let mut players = self.players.clone();
        self.unbook_move(&mut players, &record).map_err(|_| PlayError::NothingToUndo)?;

        self.board = board;
        self.players = players;
        self.dice.restore_move(record.die);
        self.move_history.pop();
        self.move_count = self.move_count.saturating_sub(1);
        self.phase = TurnPhase::MovesAvailable;
        debug!(?record, "move undone");
        Ok(record)
    }

    fn unbook_move(&self, players: &mut [Player; 2], record: &MoveRecord) -> Result<(), EngineError> {
        let mover = self.seat(record.color);
        if let Some(victim) = record.hit {
            players[self.seat(victim)].move_checker_from_bar()?;
        }
        if record.to == Position::Off {
            players[mover].return_checker_from_off()?;
        }
        if record.from == Position::Bar {
            players[mover].move_checker_to_bar()?;
        }
        Ok(())
    }

    pub fn is_game_over(&self) -> bool {
        self.players.iter().any(Player::has_won)
    }

    pub fn winner(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.has_won())
    }

    pub fn outcome(&self) -> GameOutcome {
        GameOutcome::of(&self.board)
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            move_count: self.move_count,
            turn_count: self.turn_number,
            duration_seconds: self
                .started_at
                .map(|start| (self.ended_at.unwrap_or_else(Utc::now) - start).num_seconds()),
            winner_name: self.winner().map(|p| p.name().to_string()),
            outcome: self.outcome(),
        }
    }

    pub fn reset_game(&mut self) {
        self.board.setup_initial_position();
        self.dice.reset();
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.current_player_index = 0;
        self.phase = TurnPhase::AwaitingRoll;
        self.started = false;
        self.paused = false;
        self.move_history.clear();
        self.move_count = 0;
        self.turn_number = 1;
        self.started_at = None;
        self.ended_at = None;
        info!("game reset");
    }

    pub fn game_state(&self) -> GameState {
        GameState {
            board: self.board.state(),
            dice: self.dice.state(),
            players: self.players.clone(),
            current_player_index: self.current_player_index,
            phase: self.phase,
            started: self.started,
            paused: self.paused,
            move_history: self.move_history.clone(),
            move_count: self.move_count,
            turn_number: self.turn_number,
            started_at: self.started_at,
            ended_at: self.ended_at,
        }
    }

    /// Replaces the whole game with `state`. Nothing changes if the payload is
    /// inconsistent.
    pub fn set_game_state(&mut self, state: GameState) -> Result<(), EngineError> {
        let result = self.restore(state);
        if let Err(err) = &result {
            warn!(%err, "rejected saved game");
        }
        result
    }

    fn restore(&mut self, state: GameState) -> Result<(), EngineError> {
        if state.current_player_index > 1 {
            return Err(EngineError::malformed(format!("player index {}", state.current_player_index)));
        }
        if state.players[0].color() == state.players[1].color() {
            return Err(EngineError::malformed("both players have the same color"));
        }

        let mut board = Board::empty().with_bear_off_rule(self.board.bear_off_rule());
        board.set_state(state.board)?;
        for player in state.players.iter() {
            if !player.is_consistent() || !player.matches_board(&board) {
                return Err(EngineError::malformed(format!(
                    "{} counters do not match the board",
                    player.color()
                )));
            }
        }
        let dice = Dice::validated(state.dice)?;
        if state.move_history.iter().any(|r| !Self::validate_move_coordinates(r.from, r.to)) {
            return Err(EngineError::malformed("move history holds an invalid position"));
        }
        if state.move_count as usize != state.move_history.len() {
            return Err(EngineError::malformed(format!(
                "move count {} but {} recorded moves",
                state.move_count,
                state.move_history.len()
            )));
        }
        if state.turn_number == 0 || state.move_history.iter().any(|r| r.turn > state.turn_number) {
            return Err(EngineError::malformed(format!("turn number {} behind the move history", state.turn_number)));
        }
        let finished = state.players.iter().any(Player::has_won);
        if finished != (state.phase == TurnPhase::GameOver) {
            return Err(EngineError::malformed("phase disagrees with the winner"));
        }
        Self::check_phase_dice(state.phase, &dice)?;

        self.board = board;
        self.dice = dice;
        self.players = state.players;
        self.current_player_index = state.current_player_index;
        self.phase = state.phase;
        self.started = state.started;
        self.paused = state.paused;
        self.move_history = state.move_history;
        self.move_count = state.move_count;
        self.turn_number = state.turn_number;
        self.started_at = state.started_at;
        self.ended_at = state.ended_at;
        debug!(turn = self.turn_number, moves = self.move_count, "game restored");
        Ok(())
    }

    fn check_phase_dice(phase: TurnPhase, dice: &Dice) -> Result<(), EngineError> {
        let rolled = dice.last_roll().is_some();
        match phase {
            TurnPhase::AwaitingRoll if rolled || dice.has_moves() => {
                Err(EngineError::malformed("dice rolled while awaiting a roll"))
            }
            TurnPhase::MovesAvailable | TurnPhase::TurnComplete if !rolled => {
                Err(EngineError::malformed(format!("{phase:?} without a roll")))
            }
            TurnPhase::MovesAvailable if !dice.has_moves() => {
                Err(EngineError::malformed("moves available with no dice left"))
            }
            _ => Ok(()),
        }
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(&self.game_state())?)
    }

    pub fn restore_json(&mut self, json: &str) -> Result<(), EngineError> {
        let state: GameState = serde_json::from_str(json)?;
        self.set_game_state(state)
    }
}
