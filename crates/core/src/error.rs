//! Error types for the simulation core
//!
//! Gameplay itself never fails: blocked moves are rejected with a `false` return and
//! intents that don't fit the current state are dropped. The only fallible paths
//! are a rejected lock (which ends the session) and config validation.

use std::fmt;

/// Why a piece could not be integrated into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockError {
    /// A covered cell is above the visible board; the stack has overflowed.
    SpawnBlocked,
    /// A covered cell is outside the walls, below the floor or already occupied.
    Obstructed,
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::SpawnBlocked => write!(f, "piece locked above the visible board"),
            LockError::Obstructed => write!(f, "piece locked onto a wall, the floor or the stack"),
        }
    }
}

impl std::error::Error for LockError {}

/// Rejected [`GameConfig`](crate::config::GameConfig) values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board dimension outside the supported range
    BoardSize { rows: usize, cols: usize },
    /// `lines_per_level` must be at least 1
    ZeroLinesPerLevel,
    /// Drop interval floor must be positive and not above the base interval
    DropInterval { base_ms: u32, min_ms: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize { rows, cols } => {
                write!(f, "unsupported board size {}x{}", rows, cols)
            }
            ConfigError::ZeroLinesPerLevel => write!(f, "lines_per_level must be at least 1"),
            ConfigError::DropInterval { base_ms, min_ms } => write!(
                f,
                "invalid drop interval: base {}ms, minimum {}ms",
                base_ms, min_ms
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
