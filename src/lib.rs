//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one `blockfall::{core,input,term,types}`
//! namespace and adds the pieces that touch the filesystem: config loading and
//! the persisted leaderboard.

pub mod config;
pub mod highscores;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::load_config;
pub use highscores::HighScoreStore;
