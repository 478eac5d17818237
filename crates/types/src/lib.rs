//! Shared types for the blockfall workspace
//!
//! Plain data types and default constants used by the simulation core, the input
//! mapping and the terminal renderer. This crate has no dependencies.
//!
//! # Board Dimensions
//!
//! The default playfield is 20 rows by 10 columns. Rows grow downward from the
//! top (row 0), columns grow to the right (column 0). A piece may sit partly
//! above the board (negative rows) while it spawns.
//!
//! # Timing and Progression Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Drop interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Interval floor |
//! | `LINES_PER_LEVEL` | 5 | Lines needed to advance a level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind, SessionState, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//!
//! assert!(Intent::Rotate.is_valid_in(SessionState::Playing));
//! assert!(!Intent::Rotate.is_valid_in(SessionState::Paused));
//!
//! assert_eq!(BOARD_ROWS, 20);
//! assert_eq!(BOARD_COLS, 10);
//! ```

/// Default board height in rows
pub const BOARD_ROWS: u16 = 20;

/// Default board width in columns
pub const BOARD_COLS: u16 = 10;

/// Row a freshly spawned piece is anchored at (one row above the board)
pub const SPAWN_ROW: i32 = -1;

/// Driver frame interval in milliseconds
pub const TICK_MS: u32 = 16;

/// Drop interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval reduction applied on every level-up
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Drop interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines cleared within a level before the level advances
pub const LINES_PER_LEVEL: u32 = 5;

/// Points per line clear, indexed by the number of lines cleared at once.
pub const LINE_CLEAR_POINTS: [u32; 5] = [0, 10, 20, 30, 40];

/// Alternate points table used by some historical rule sets.
pub const CLASSIC_LINE_CLEAR_POINTS: [u32; 5] = [0, 100, 300, 500, 800];

/// Number of entries kept on the leaderboard
pub const LEADERBOARD_CAPACITY: usize = 5;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in the order random draws index into.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// A cell on the board: `None` is empty, `Some(kind)` is locked by that kind.
pub type Cell = Option<PieceKind>;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Menu, before the first game or after returning to menu
    #[default]
    Start,
    Playing,
    Paused,
    /// The last lock overflowed the board
    Over,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Start => "start",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::Over => "over",
        }
    }
}

/// Abstract player intents, already decoupled from any input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down, locking it if blocked
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    Pause,
    Resume,
    /// Begin a game from the menu
    Start,
    /// Begin a new game after game over
    Restart,
    /// Abandon the current game and go back to the menu
    ReturnToMenu,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("RETURNTOMENU"), Some(Intent::ReturnToMenu));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotate" => Some(Intent::Rotate),
            "pause" => Some(Intent::Pause),
            "resume" => Some(Intent::Resume),
            "start" => Some(Intent::Start),
            "restart" => Some(Intent::Restart),
            "returntomenu" => Some(Intent::ReturnToMenu),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::Rotate => "rotate",
            Intent::Pause => "pause",
            Intent::Resume => "resume",
            Intent::Start => "start",
            Intent::Restart => "restart",
            Intent::ReturnToMenu => "returnToMenu",
        }
    }

    /// Whether the session accepts this intent in `state`.
    pub fn is_valid_in(&self, state: SessionState) -> bool {
        match self {
            Intent::MoveLeft
            | Intent::MoveRight
            | Intent::SoftDrop
            | Intent::HardDrop
            | Intent::Rotate
            | Intent::Pause => state == SessionState::Playing,
            Intent::Resume => state == SessionState::Paused,
            Intent::Start => state == SessionState::Start,
            Intent::Restart => state == SessionState::Over,
            Intent::ReturnToMenu => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_defaults() {
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_INTERVAL_STEP_MS, 100);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(LINES_PER_LEVEL, 5);
        assert_eq!(LINE_CLEAR_POINTS, [0, 10, 20, 30, 40]);
    }

    #[test]
    fn intent_names_round_trip() {
        for intent in [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::SoftDrop,
            Intent::HardDrop,
            Intent::Rotate,
            Intent::Pause,
            Intent::Resume,
            Intent::Start,
            Intent::Restart,
            Intent::ReturnToMenu,
        ] {
            assert_eq!(Intent::from_str(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn gameplay_intents_only_valid_while_playing() {
        for state in [SessionState::Start, SessionState::Paused, SessionState::Over] {
            assert!(!Intent::MoveLeft.is_valid_in(state));
            assert!(!Intent::HardDrop.is_valid_in(state));
            assert!(!Intent::Pause.is_valid_in(state));
        }
        assert!(Intent::MoveLeft.is_valid_in(SessionState::Playing));
    }

    #[test]
    fn lifecycle_intents_match_their_state() {
        assert!(Intent::Start.is_valid_in(SessionState::Start));
        assert!(!Intent::Start.is_valid_in(SessionState::Over));
        assert!(Intent::Restart.is_valid_in(SessionState::Over));
        assert!(!Intent::Restart.is_valid_in(SessionState::Playing));
        assert!(Intent::Resume.is_valid_in(SessionState::Paused));
        assert!(!Intent::Resume.is_valid_in(SessionState::Playing));
        for state in [
            SessionState::Start,
            SessionState::Playing,
            SessionState::Paused,
            SessionState::Over,
        ] {
            assert!(Intent::ReturnToMenu.is_valid_in(state));
        }
    }
}
