//! Session events for presentation collaborators
//!
//! The session queues an event for every observable change. Collaborators drain
//! the queue with [`GameSession::take_events`](crate::session::GameSession::take_events)
//! after each tick or intent and update their presentation from it.

use crate::types::{PieceKind, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged {
        from: SessionState,
        to: SessionState,
    },
    PieceLocked {
        kind: PieceKind,
        lines_cleared: u32,
    },
    LinesCleared {
        count: u32,
        points: u32,
        score: u32,
    },
    LevelUp {
        level: u32,
        drop_interval_ms: u32,
    },
    /// Emitted once when the board overflows
    GameOver {
        player: String,
        score: u32,
        level: u32,
        elapsed_ms: u64,
    },
}
