//! Terminal input mapping.
//!
//! Translates `crossterm` key events into [`crate::types::Intent`]s. Keys that
//! mean different things in different screens (Enter, `p`) take the current
//! [`crate::types::SessionState`] into account; everything else maps the same
//! way in every state and the session drops what it can't use.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
