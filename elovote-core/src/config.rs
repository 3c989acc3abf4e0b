/// Tunable constants of the rating engine and pair selector.
///
/// Every field has a documented default, so a partial `[elo]` table in a
/// config file only overrides what it names.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_RATING, DEFAULT_ROUNDS, EXPLORATION_RATE, TOP_FRACTION};
use crate::error::{EloError, Result};
use crate::types::Item;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EloConfig {
    /// Probability of a fully random pair. Default 0.2.
    pub exploration_rate: f64,
    /// Candidate pool fraction and far-opponent probability. Default 0.1.
    pub top_fraction: f64,
    /// Rating of a freshly created item. Default 1000.0.
    pub default_rating: f64,
    /// Round count of a freshly created item. Default 0.
    pub default_rounds: u32,
}

impl Default for EloConfig {
    fn default() -> Self {
        EloConfig {
            exploration_rate: EXPLORATION_RATE,
            top_fraction: TOP_FRACTION,
            default_rating: DEFAULT_RATING,
            default_rounds: DEFAULT_ROUNDS,
        }
    }
}

impl EloConfig {
    /// The entry a new name starts with.
    pub fn default_item(&self) -> Item {
        Item {
            rating: self.default_rating,
            rounds: self.default_rounds,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(EloError::InvalidConfig(format!(
                "exploration_rate must be between 0.0 and 1.0, got {}",
                self.exploration_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.top_fraction) {
            return Err(EloError::InvalidConfig(format!(
                "top_fraction must be between 0.0 and 1.0, got {}",
                self.top_fraction
            )));
        }
        if !self.default_rating.is_finite() {
            return Err(EloError::InvalidConfig(format!(
                "default_rating must be finite, got {}",
                self.default_rating
            )));
        }
        Ok(())
    }
}
