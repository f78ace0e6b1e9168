use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A place a checker can move from or to, in external numbering.
/// Points are numbered 1-24; `Bar` and `Off` are the sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Bar,
    Off,
    Point(u8),
}

impl Position {
    /// Creates a Position on the board from an internal index (0-23).
    pub fn from_index(index: usize) -> Self {
        Position::Point(index as u8 + 1)
    }

    /// Internal index (0-23) of a point, or `None` for the sentinels and
    /// out-of-range numbers.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Position::Point(n @ 1..=24) => Some(n as usize - 1),
            _ => None,
        }
    }

    pub fn is_valid_source(&self) -> bool {
        match self {
            Position::Bar => true,
            Position::Off => false,
            Position::Point(_) => self.index().is_some(),
        }
    }

    pub fn is_valid_target(&self) -> bool {
        match self {
            Position::Bar => false,
            Position::Off => true,
            Position::Point(_) => self.index().is_some(),
        }
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Position::from_index(index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Bar => write!(f, "bar"),
            Position::Off => write!(f, "off"),
            Position::Point(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("not a board position: {input:?}")]
pub struct ParsePositionError {
    pub input: String,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "bar" => Ok(Position::Bar),
            "off" => Ok(Position::Off),
            other => other
                .parse::<u8>()
                .map(Position::Point)
                .map_err(|_| ParsePositionError { input: s.to_string() }),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Position::Bar => serializer.serialize_str("bar"),
            Position::Off => serializer.serialize_str("off"),
            Position::Point(n) => serializer.serialize_u8(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u8),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Position::Point(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentinels_and_points() {
        assert_eq!("bar".parse(), Ok(Position::Bar));
        assert_eq!("OFF".parse(), Ok(Position::Off));
        assert_eq!("17".parse(), Ok(Position::Point(17)));
        assert!("home".parse::<Position>().is_err());
    }

    #[test]
    fn test_parse_error_message() {
        let err = " home ".parse::<Position>().unwrap_err();
        assert_eq!(err, ParsePositionError { input: "home".to_string() });
        assert_eq!(err.to_string(), r#"not a board position: "home""#);
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_index_conversion() {
        assert_eq!(Position::Point(1).index(), Some(0));
        assert_eq!(Position::Point(24).index(), Some(23));
        assert_eq!(Position::Point(0).index(), None);
        assert_eq!(Position::Point(25).index(), None);
        assert_eq!(Position::from_index(7), Position::Point(8));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&[Position::Bar, Position::Point(5), Position::Off]).unwrap();
        assert_eq!(json, r#"["bar",5,"off"]"#);
        let back: Vec<Position> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Position::Bar, Position::Point(5), Position::Off]);
    }
}
