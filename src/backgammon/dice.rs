use std::fmt::Debug;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backgammon::EngineError;

/// Source of single die values in 1..=6.
pub trait DieSource {
    fn next_die(&mut self) -> u8;
}

/// Uniform dice backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn new() -> Self {
        RandomDice { rng: StdRng::from_os_rng() }
    }

    /// Same seed, same sequence of rolls.
    pub fn seeded(seed: u64) -> Self {
        RandomDice { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DieSource for RandomDice {
    fn next_die(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }
}

/// Replays a fixed list of die values, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    values: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = u8>) -> Result<Self, EngineError> {
        let values: Vec<u8> = values.into_iter().collect();
        if values.is_empty() {
            return Err(EngineError::InvalidDieValue { value: 0 });
        }
        if let Some(&value) = values.iter().find(|v| !(1..=6).contains(*v)) {
            return Err(EngineError::InvalidDieValue { value });
        }
        Ok(ScriptedDice { values, cursor: 0 })
    }
}

impl DieSource for ScriptedDice {
    fn next_die(&mut self) -> u8 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Plain snapshot of [`Dice`], `{"last_roll": [a, b] | null, "remaining": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceState {
    pub last_roll: Option<(u8, u8)>,
    pub remaining: Vec<u8>,
}

/// The pair of dice plus the move distances still unused this turn.
/// A double grants four moves of its value, otherwise each die grants one.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Dice {
    last_roll: Option<(u8, u8)>,
    remaining: Vec<u8>,
}

impl Dice {
    pub fn new() -> Self {
        Dice::default()
    }

    /// Test helper and restore path: dice as if `(die1, die2)` had just been rolled.
    pub fn from_numbers(die1: u8, die2: u8) -> Self {
        Dice {
            last_roll: Some((die1, die2)),
            remaining: Self::allotment(die1, die2),
        }
    }

    fn allotment(die1: u8, die2: u8) -> Vec<u8> {
        if die1 == die2 {
            vec![die1; 4]
        } else {
            vec![die1, die2]
        }
    }

    pub fn roll_single(source: &mut impl DieSource) -> u8 {
        source.next_die()
    }

    pub fn roll(&mut self, source: &mut impl DieSource) -> (u8, u8) {
        let die1 = Self::roll_single(source);
        let die2 = Self::roll_single(source);
        self.last_roll = Some((die1, die2));
        self.remaining = Self::allotment(die1, die2);
        debug!(die1, die2, "rolled dice");
        (die1, die2)
    }

    pub fn last_roll(&self) -> Option<(u8, u8)> {
        self.last_roll
    }

    pub fn is_double(&self) -> bool {
        matches!(self.last_roll, Some((a, b)) if a == b)
    }

    /// Removes one occurrence of `value` from the remaining distances.
    pub fn use_move(&mut self, value: u8) -> bool {
        match self.remaining.iter().position(|&v| v == value) {
            Some(index) => {
                self.remaining.remove(index);
                true
            }
            None => false,
        }
    }

    /// Puts a previously used `value` back, keeping roll order.
    pub(crate) fn restore_move(&mut self, value: u8) {
        let Some((die1, die2)) = self.last_roll else {
            return;
        };
        let mut pending = self.remaining.clone();
        pending.push(value);
        let mut rebuilt = Vec::with_capacity(pending.len());
        for die in Self::allotment(die1, die2) {
            if let Some(index) = pending.iter().position(|&v| v == die) {
                pending.swap_remove(index);
                rebuilt.push(die);
            }
        }
        self.remaining = rebuilt;
    }

    pub fn has_moves(&self) -> bool {
        !self.remaining.is_empty()
    }

    pub fn all_used(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn can_use_move(&self, value: u8) -> bool {
        self.remaining.contains(&value)
    }

    pub fn available_moves(&self) -> Vec<u8> {
        self.remaining.clone()
    }

    /// Distinct remaining values, in roll order.
    pub fn unique_values(&self) -> Vec<u8> {
        let mut values = Vec::with_capacity(2);
        for &v in &self.remaining {
            if !values.contains(&v) {
                values.push(v);
            }
        }
        values
    }

    pub fn state(&self) -> DiceState {
        DiceState {
            last_roll: self.last_roll,
            remaining: self.remaining.clone(),
        }
    }

    /// Replaces the dice with `state` after checking that `remaining` could
    /// have been left over from `last_roll`.
    pub fn set_state(&mut self, state: DiceState) -> Result<(), EngineError> {
        let dice = Self::validated(state)?;
        *self = dice;
        Ok(())
    }

    pub(crate) fn validated(state: DiceState) -> Result<Dice, EngineError> {
        let mut values: Vec<u8> = state.remaining.clone();
        if let Some((a, b)) = state.last_roll {
            values.extend([a, b]);
        }
        if let Some(&value) = values.iter().find(|v| !(1..=6).contains(*v)) {
            return Err(EngineError::InvalidDieValue { value });
        }
        match state.last_roll {
            None if !state.remaining.is_empty() => {
                return Err(EngineError::malformed("remaining dice without a roll"));
            }
            None => {}
            Some((a, b)) => {
                let mut pool = Self::allotment(a, b);
                for value in &state.remaining {
                    match pool.iter().position(|v| v == value) {
                        Some(index) => {
                            pool.swap_remove(index);
                        }
                        None => {
                            return Err(EngineError::malformed(format!(
                                "remaining die {value} was not part of roll {a}/{b}"
                            )));
                        }
                    }
                }
            }
        }
        Ok(Dice {
            last_roll: state.last_roll,
            remaining: state.remaining,
        })
    }

    pub fn reset(&mut self) {
        self.last_roll = None;
        self.remaining.clear();
    }
}

impl Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.last_roll {
            None => write!(f, "Dice(not rolled)"),
            Some((a, b)) if a == b => write!(f, "Double({a}): {} left", self.remaining.len()),
            Some((a, b)) => write!(f, "Dice({a} | {b}): remaining {:?}", self.remaining),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice() {
        for i in 1..=6 {
            for j in 1..=6 {
                let mut dice = Dice::from_numbers(i, j);
                if i == j {
                    assert!(dice.is_double());
                    assert_eq!(dice.available_moves(), vec![i; 4]);
                    let mut count = 0;
                    while dice.use_move(i) {
                        count += 1;
                    }
                    assert_eq!(count, 4);
                } else {
                    assert!(!dice.is_double());
                    assert_eq!(dice.available_moves(), vec![i, j]);
                    assert!(dice.use_move(j));
                    assert!(!dice.use_move(j));
                    assert!(dice.use_move(i));
                }
                assert!(dice.all_used());
            }
        }
    }

    #[test]
    fn test_dice_roll() {
        let mut source = RandomDice::seeded(7);
        let mut dice = Dice::new();
        for _ in 1..=100 {
            let (a, b) = dice.roll(&mut source);
            assert!((1..=6).contains(&a));
            assert!((1..=6).contains(&b));
            if dice.is_double() {
                assert_eq!(dice.available_moves(), vec![a; 4]);
            } else {
                assert_eq!(dice.available_moves(), vec![a, b]);
            }
        }
    }

    #[test]
    fn test_scripted_roll_keeps_order() {
        let mut source = ScriptedDice::new([5, 2, 3, 3]).unwrap();
        let mut dice = Dice::new();
        assert_eq!(dice.roll(&mut source), (5, 2));
        assert_eq!(dice.available_moves(), vec![5, 2]);
        assert_eq!(dice.roll(&mut source), (3, 3));
        assert_eq!(dice.available_moves(), vec![3, 3, 3, 3]);
        assert_eq!(dice.roll(&mut source), (5, 2));
    }

    #[test]
    fn test_scripted_rejects_bad_values() {
        assert_eq!(ScriptedDice::new([1, 7]).unwrap_err(), EngineError::InvalidDieValue { value: 7 });
        assert!(ScriptedDice::new([]).is_err());
    }

    #[test]
    fn test_use_move_first_match() {
        let mut dice = Dice {
            last_roll: Some((2, 4)),
            remaining: vec![2, 4, 6],
        };
        assert!(dice.use_move(4));
        assert_eq!(dice.available_moves(), vec![2, 6]);
        assert!(!dice.use_move(4));
        assert_eq!(dice.available_moves(), vec![2, 6]);
        assert!(dice.can_use_move(6));
        assert!(!dice.can_use_move(4));
    }

    #[test]
    fn test_restore_move_keeps_roll_order() {
        let mut dice = Dice::from_numbers(6, 1);
        assert!(dice.use_move(6));
        dice.restore_move(6);
        assert_eq!(dice.available_moves(), vec![6, 1]);
    }

    #[test]
    fn test_state_round_trip_and_validation() {
        let mut dice = Dice::from_numbers(4, 4);
        dice.use_move(4);
        let state = dice.state();
        let mut restored = Dice::new();
        restored.set_state(state.clone()).unwrap();
        assert_eq!(restored, dice);

        let bogus = DiceState { last_roll: Some((1, 2)), remaining: vec![3] };
        assert!(matches!(restored.set_state(bogus), Err(EngineError::MalformedState { .. })));
        assert_eq!(restored.state(), state);

        let orphan = DiceState { last_roll: None, remaining: vec![2] };
        assert!(restored.set_state(orphan).is_err());
    }

    #[test]
    fn test_reset() {
        let mut dice = Dice::from_numbers(3, 5);
        dice.reset();
        assert_eq!(dice.last_roll(), None);
        assert!(!dice.has_moves());
        assert!(!dice.is_double());
    }
}
