//! Core game logic - the board/piece simulation engine
//!
//! Pure, synchronous and deterministic for a given random source and clock. No
//! rendering, input devices or storage live here. A driver feeds intents and
//! frame ticks in, then reads state (or a [`GameSnapshot`]) back out for
//! drawing.
//!
//! # Module Structure
//!
//! - [`shape`]: the seven tetromino matrices and clockwise rotation
//! - [`board`]: grid of locked cells, collision, locking and line clears
//! - [`piece`]: active/next piece controller
//! - [`session`]: `Start → Playing ⇄ Paused → Over` state machine with score, level and time
//! - [`scoring`]: points table and level/drop-interval progression
//! - [`rng`]: random sources and piece selection (uniform or 7-bag)
//! - [`clock`]: time sources and the pause-aware stopwatch
//! - [`events`]: change notifications for presentation code
//! - [`leaderboard`]: top-5 survival times
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameSession};
//! use blockfall_core::types::{Intent, SessionState};
//!
//! let mut game = GameSession::new(GameConfig::default(), 12345);
//! game.start("ann");
//!
//! game.apply_intent(Intent::MoveRight);
//! game.apply_intent(Intent::Rotate);
//! game.apply_intent(Intent::HardDrop);
//!
//! assert_eq!(game.state(), SessionState::Playing);
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;

#[cfg(test)]
mod testing;

pub use blockfall_types as types;

pub use board::Board;
pub use clock::{Clock, ManualClock, Stopwatch, SystemClock};
pub use config::GameConfig;
pub use error::{ConfigError, LockError};
pub use events::SessionEvent;
pub use leaderboard::{format_time, HighScoreEntry, Leaderboard};
pub use piece::{Piece, PieceController};
pub use rng::{PieceGenerator, RandomSource, Randomizer, SimpleRng};
pub use scoring::{LevelProgress, ScoringRules};
pub use session::GameSession;
pub use shape::Shape;
pub use snapshot::GameSnapshot;
