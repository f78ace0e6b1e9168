mod error;
pub use error::EngineError;
pub use error::PlayError;

mod checker;
pub use checker::Checker;
pub use checker::Color;
pub use checker::Sides;

mod board;
pub use board::BearOffRule;
pub use board::Board;
pub use board::BoardState;
pub use board::Landing;
pub use board::CHECKERS_PER_SIDE;
pub use board::POINTS;

mod player;
pub use player::Player;

mod position;
pub use position::ParsePositionError;
pub use position::Position;

mod outcome;
pub use outcome::GameOutcome;

mod game;
pub use game::GameEngine;
pub use game::GameState;
pub use game::GameStats;
pub use game::MoveRecord;
pub use game::TurnPhase;

mod halfmove;
pub use halfmove::HalfMove;

mod full_move;
pub use full_move::Turn;

mod dice;
pub use dice::Dice;
pub use dice::DiceState;
pub use dice::DieSource;
pub use dice::RandomDice;
pub use dice::ScriptedDice;
