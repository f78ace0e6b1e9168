//! Engine configuration.
//!
//! Every field has a default, so a partial JSON document such as
//! `{"seed": 42}` is a complete configuration.

use serde::{Deserialize, Serialize};

use crate::backgammon::{BearOffRule, EngineError, RandomDice};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the White seat, which moves first.
    pub white_name: String,
    pub black_name: String,
    /// `permissive` lets a checker bear off before its whole side is home.
    pub bear_off_rule: BearOffRule,
    /// Fixed seed for reproducible dice. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            white_name: "White".to_string(),
            black_name: "Black".to_string(),
            bear_off_rule: BearOffRule::RequireHomeBoard,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn dice_source(&self) -> RandomDice {
        match self.seed {
            Some(seed) => RandomDice::seeded(seed),
            None => RandomDice::new(),
        }
    }
}
