use derive_more::{Display, Error};

use crate::backgammon::Color;

/// Integration errors. Reaching one of these means the caller broke an
/// invariant, not that a player tried something illegal.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("point index {index} is outside 0..24")]
    PointOutOfRange { index: usize },

    #[display("unknown checker color {name:?}")]
    InvalidColor { name: String },

    #[display("{color} has no checker {counter} to move")]
    CounterUnderflow { color: Color, counter: &'static str },

    #[display("die value {value} is outside 1..=6")]
    InvalidDieValue { value: u8 },

    #[display("malformed saved state: {reason}")]
    MalformedState { reason: String },

    #[display("serialization failed: {message}")]
    Serialization { message: String },
}

impl EngineError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        EngineError::MalformedState { reason: reason.into() }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization { message: err.to_string() }
    }
}

/// Why a command was refused. The engine state is untouched whenever one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlayError {
    #[display("the game is paused")]
    Paused,

    #[display("the game is over")]
    GameOver,

    #[display("the dice have not been rolled yet")]
    NotRolled,

    #[display("the dice were already rolled this turn")]
    AlreadyRolled,

    #[display("the current turn still has playable moves")]
    TurnNotComplete,

    #[display("move coordinates are out of range")]
    InvalidCoordinates,

    #[display("that move is not legal in this position")]
    IllegalMove,

    #[display("die value {value} is not available")]
    DieUnavailable { value: u8 },

    #[display("no move of the current turn to undo")]
    NothingToUndo,
}
