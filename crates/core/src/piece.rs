//! Piece controller - owns the active and next piece
//!
//! Applies move/rotate/drop requests against a [`Board`] and hands locked pieces
//! over to it. Rejected moves and rotations leave the piece untouched.

use crate::board::Board;
use crate::error::LockError;
use crate::rng::PieceGenerator;
use crate::shape::{spawn_column, Shape, ShapeCells};
use crate::types::{PieceKind, SPAWN_ROW};

/// A falling piece: kind, current rotation and top-left anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// New piece in spawn orientation, anchored at the spawn row and column 0
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::spawn(kind),
            row: SPAWN_ROW,
            col: 0,
        }
    }

    /// Absolute `(row, col)` of every covered cell
    pub fn cells(&self) -> ShapeCells {
        self.shape
            .cells()
            .into_iter()
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
            .collect()
    }

    fn collides(&self, board: &Board) -> bool {
        board.collides(self.row, self.col, &self.shape)
    }
}

/// Active/next piece pair plus the generator feeding it
#[derive(Debug)]
pub struct PieceController {
    active: Option<Piece>,
    next: Piece,
    generator: PieceGenerator,
}

impl PieceController {
    pub fn new(mut generator: PieceGenerator) -> Self {
        let next = Piece::new(generator.next_kind());
        Self {
            active: None,
            next,
            generator,
        }
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    /// Drop the active piece and draw a fresh next piece
    pub fn reset(&mut self) {
        self.active = None;
        self.next = Piece::new(self.generator.next_kind());
    }

    /// Promote the next piece to active, centered above the board, and draw a
    /// new next piece.
    pub fn spawn_next(&mut self, board: &Board) {
        let fresh = Piece::new(self.generator.next_kind());
        let mut piece = std::mem::replace(&mut self.next, fresh);
        piece.col = spawn_column(board.cols(), piece.shape.width());
        piece.row = SPAWN_ROW;
        self.active = Some(piece);
    }

    /// Shift the active piece by `(d_col, d_row)` unless that collides
    pub fn try_move(&mut self, board: &Board, d_col: i32, d_row: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let moved = Piece {
            row: active.row + d_row,
            col: active.col + d_col,
            ..*active
        };
        if moved.collides(board) {
            return false;
        }
        *active = moved;
        true
    }

    /// Rotate the active piece clockwise in place; no wall kicks
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let rotated = Piece {
            shape: active.shape.rotated_cw(),
            ..*active
        };
        if rotated.collides(board) {
            return false;
        }
        *active = rotated;
        true
    }

    /// Move the active piece down until blocked, then lock it.
    ///
    /// Returns the number of lines cleared by the lock.
    pub fn hard_drop(&mut self, board: &mut Board) -> Result<usize, LockError> {
        while self.try_move(board, 0, 1) {}
        self.lock_and_advance(board)
    }

    /// Lock the active piece, clear full rows and spawn the next piece.
    ///
    /// On [`LockError::SpawnBlocked`] neither the board nor the active piece
    /// change; the caller ends the session.
    pub fn lock_and_advance(&mut self, board: &mut Board) -> Result<usize, LockError> {
        let Some(active) = self.active else {
            return Ok(0);
        };

        board.lock(active.row, active.col, &active.shape, active.kind)?;
        tracing::trace!(
            kind = active.kind.letter(),
            row = active.row,
            col = active.col,
            "piece locked"
        );

        let cleared = board.clear_full_rows();
        self.spawn_next(board);
        Ok(cleared)
    }

    /// Row the active piece would land on if dropped now
    pub fn ghost_row(&self, board: &Board) -> Option<i32> {
        let active = self.active?;
        let mut row = active.row;
        while !board.collides(row + 1, active.col, &active.shape) {
            row += 1;
        }
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Randomizer;
    use crate::testing::Always;

    fn controller(kind: PieceKind) -> PieceController {
        PieceController::new(PieceGenerator::new(Always(kind), Randomizer::Uniform))
    }

    #[test]
    fn spawn_centers_above_board() {
        let board = Board::default();
        let mut pc = controller(PieceKind::I);
        assert!(pc.active().is_none());

        pc.spawn_next(&board);
        let active = pc.active().unwrap();
        assert_eq!(active.kind, PieceKind::I);
        assert_eq!(active.row, -1);
        assert_eq!(active.col, 3);
    }

    #[test]
    fn move_blocked_by_wall_leaves_piece() {
        let board = Board::default();
        let mut pc = controller(PieceKind::O);
        pc.spawn_next(&board);

        for _ in 0..4 {
            assert!(pc.try_move(&board, -1, 0));
        }
        let before = *pc.active().unwrap();
        assert!(!pc.try_move(&board, -1, 0));
        assert_eq!(*pc.active().unwrap(), before);
    }

    #[test]
    fn rotation_blocked_by_wall() {
        let board = Board::default();
        let mut pc = controller(PieceKind::I);
        pc.spawn_next(&board);
        // Push the vertical bar against the right wall then try to lay it flat.
        assert!(pc.try_rotate(&board));
        while pc.try_move(&board, 1, 0) {}
        let before = *pc.active().unwrap();
        assert_eq!(before.col, 9);
        assert!(!pc.try_rotate(&board));
        assert_eq!(*pc.active().unwrap(), before);
    }

    #[test]
    fn hard_drop_lands_on_floor() {
        let mut board = Board::default();
        let mut pc = controller(PieceKind::O);
        pc.spawn_next(&board);

        assert_eq!(pc.ghost_row(&board), Some(18));
        assert_eq!(pc.hard_drop(&mut board), Ok(0));
        assert!(board.is_occupied(18, 4));
        assert!(board.is_occupied(19, 5));
        assert_eq!(board.occupied_count(), 4);
        // A fresh piece is waiting at the top.
        assert_eq!(pc.active().unwrap().row, -1);
    }

    #[test]
    fn lock_above_board_is_rejected() {
        let mut board = Board::default();
        let mut pc = controller(PieceKind::T);
        pc.spawn_next(&board);
        let before = *pc.active().unwrap();

        assert_eq!(pc.lock_and_advance(&mut board), Err(LockError::SpawnBlocked));
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(*pc.active().unwrap(), before);
    }

    #[test]
    fn piece_cells_are_absolute() {
        let mut piece = Piece::new(PieceKind::O);
        piece.row = 5;
        piece.col = 2;
        assert_eq!(piece.cells().as_slice(), &[(5, 2), (5, 3), (6, 2), (6, 3)]);
    }
}
