use crate::piece::Piece;
use crate::types::{Cell, SessionState};

/// Everything a renderer reads from a session for one frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major locked cells
    pub board: Vec<Cell>,
    pub active: Option<Piece>,
    /// Landing row of the active piece
    pub ghost_row: Option<i32>,
    pub next: Option<Piece>,
    pub state: SessionState,
    pub player: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub elapsed_ms: u64,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    /// Locked cell at `(row, col)`; empty outside the board
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.board[row * self.cols + col]
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms / 1000
    }
}
