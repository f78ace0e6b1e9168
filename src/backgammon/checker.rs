use std::{fmt, ops::{Index, IndexMut}, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::backgammon::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Sign of travel across the external point numbering.
    /// White runs 24 -> 1, Black runs 1 -> 24.
    pub fn direction(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Internal indices (0-23) of this color's home board.
    pub fn home_indices(&self) -> std::ops::RangeInclusive<usize> {
        match self {
            Color::White => 0..=5,
            Color::Black => 18..=23,
        }
    }

    /// Internal index reached by a checker entering from the bar with `die`,
    /// or `None` if `die` is not a die value.
    pub fn entry_index(&self, die: u8) -> Option<usize> {
        if !(1..=6).contains(&die) {
            return None;
        }
        Some(match self {
            Color::White => 24 - die as usize,
            Color::Black => die as usize - 1,
        })
    }

    /// Distance in pips from `index` to this color's off area.
    pub fn pips_to_off(&self, index: usize) -> u8 {
        match self {
            Color::White => index as u8 + 1,
            Color::Black => 24 - index as u8,
        }
    }

    /// Target index of moving `die` pips from `index`, or `None` if the move
    /// would leave the board.
    pub fn advance(&self, index: usize, die: u8) -> Option<usize> {
        let target = index as i16 + self.direction() as i16 * die as i16;
        (0..24).contains(&target).then_some(target as usize)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl FromStr for Color {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(EngineError::InvalidColor { name: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checker {
    pub color: Color,
}

impl Checker {
    pub fn new(color: Color) -> Self {
        Checker { color }
    }
}

/// One value per color. Serializes as `{"white": .., "black": ..}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides<T> {
    pub white: T,
    pub black: T,
}

impl<T> Sides<T> {
    pub fn new(white: T, black: T) -> Self {
        Sides { white, black }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        [(Color::White, &self.white), (Color::Black, &self.black)].into_iter()
    }
}

impl<T> Index<Color> for Sides<T> {
    type Output = T;

    fn index(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl<T> IndexMut<Color> for Sides<T> {
    fn index_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("white".parse::<Color>(), Ok(Color::White));
        assert_eq!(" Black ".parse::<Color>(), Ok(Color::Black));
        assert!(matches!("red".parse::<Color>(), Err(EngineError::InvalidColor { .. })));
    }

    #[test]
    fn test_advance_stays_on_board() {
        assert_eq!(Color::White.advance(5, 3), Some(2));
        assert_eq!(Color::White.advance(2, 3), None);
        assert_eq!(Color::Black.advance(20, 3), Some(23));
        assert_eq!(Color::Black.advance(21, 3), None);
    }

    #[test]
    fn test_entry_and_pips() {
        assert_eq!(Color::White.entry_index(1), Some(23));
        assert_eq!(Color::Black.entry_index(6), Some(5));
        assert_eq!(Color::Black.entry_index(0), None);
        assert_eq!(Color::White.entry_index(7), None);
        assert_eq!(Color::White.pips_to_off(0), 1);
        assert_eq!(Color::Black.pips_to_off(18), 6);
    }
}
