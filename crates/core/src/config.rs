//! Game configuration
//!
//! Board size, scoring/progression rules and the randomizer. All fields have
//! defaults, so a partial JSON document is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::Randomizer;
use crate::scoring::ScoringRules;
use crate::types::{BOARD_COLS, BOARD_ROWS};

/// Largest supported board dimension
pub const MAX_BOARD_DIM: usize = 64;

/// Smallest supported board dimension (the I piece is four cells long)
pub const MIN_BOARD_DIM: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub scoring: ScoringRules,
    pub randomizer: Randomizer,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = MIN_BOARD_DIM..=MAX_BOARD_DIM;
        if !dims.contains(&self.rows) || !dims.contains(&self.cols) {
            return Err(ConfigError::BoardSize {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.scoring.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        let base_ms = self.scoring.base_drop_interval_ms;
        let min_ms = self.scoring.min_drop_interval_ms;
        if min_ms == 0 || base_ms < min_ms {
            return Err(ConfigError::DropInterval { base_ms, min_ms });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: BOARD_ROWS as usize,
            cols: BOARD_COLS as usize,
            scoring: ScoringRules::default(),
            randomizer: Randomizer::default(),
        }
    }
}
