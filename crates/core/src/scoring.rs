//! Scoring module - line clear points and level progression
//!
//! The canonical table awards `[0, 10, 20, 30, 40]` for clearing 0..=4 lines at
//! once, with no level multiplier. [`ScoringRules::classic`] swaps in the
//! `[0, 100, 300, 500, 800]` table. Every `lines_per_level` cleared lines the
//! level advances and the drop interval shrinks by a fixed step down to a floor.

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_DROP_MS, CLASSIC_LINE_CLEAR_POINTS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS,
    LINES_PER_LEVEL, LINE_CLEAR_POINTS,
};

/// Points table and level/speed progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Points indexed by lines cleared in one lock
    pub line_clear_points: [u32; 5],
    pub lines_per_level: u32,
    pub base_drop_interval_ms: u32,
    pub drop_interval_step_ms: u32,
    pub min_drop_interval_ms: u32,
}

impl ScoringRules {
    /// Same progression, `[0, 100, 300, 500, 800]` points
    pub fn classic() -> Self {
        Self {
            line_clear_points: CLASSIC_LINE_CLEAR_POINTS,
            ..Self::default()
        }
    }

    /// Points for clearing `lines` rows in a single lock.
    ///
    /// Counts beyond the table use the last entry.
    pub fn points_for(&self, lines: usize) -> u32 {
        let last = self.line_clear_points.len() - 1;
        self.line_clear_points[lines.min(last)]
    }

    /// Drop interval at `level` (1-based)
    pub fn drop_interval_for_level(&self, level: u32) -> u32 {
        let steps = level.saturating_sub(1);
        self.base_drop_interval_ms
            .saturating_sub(steps.saturating_mul(self.drop_interval_step_ms))
            .max(self.min_drop_interval_ms)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            line_clear_points: LINE_CLEAR_POINTS,
            lines_per_level: LINES_PER_LEVEL,
            base_drop_interval_ms: BASE_DROP_MS,
            drop_interval_step_ms: DROP_INTERVAL_STEP_MS,
            min_drop_interval_ms: DROP_INTERVAL_MIN_MS,
        }
    }
}

/// Progress within the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub lines_in_level: u32,
    pub drop_interval_ms: u32,
}

impl LevelProgress {
    pub fn new(rules: &ScoringRules) -> Self {
        Self {
            level: 1,
            lines_in_level: 0,
            drop_interval_ms: rules.base_drop_interval_ms,
        }
    }

    /// Count cleared lines; returns true if the level advanced.
    ///
    /// Reaching the threshold resets the in-level counter to zero.
    pub fn add_lines(&mut self, lines: u32, rules: &ScoringRules) -> bool {
        if lines == 0 {
            return false;
        }
        self.lines_in_level += lines;
        if self.lines_in_level < rules.lines_per_level {
            return false;
        }
        self.level += 1;
        self.lines_in_level = 0;
        self.drop_interval_ms = rules.drop_interval_for_level(self.level);
        true
    }
}
