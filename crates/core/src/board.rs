//! Board module - manages the grid of locked cells
//!
//! The board is a `rows × cols` grid (20×10 by default) where each cell is empty
//! or holds the kind of the piece that locked there. Storage is a flat row-major
//! vector. Coordinates are `(row, col)`; row 0 is the top of the visible area and
//! negative rows are above it.

use crate::error::LockError;
use crate::shape::Shape;
use crate::types::{Cell, PieceKind, BOARD_COLS, BOARD_ROWS};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at `(row, col)`, `None` if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at `(row, col)`. Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True if in bounds and non-empty
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Whether `shape` anchored at `(origin_row, origin_col)` hits a wall, the
    /// floor or a locked cell.
    ///
    /// Cells above the board (negative rows) only collide with the side walls.
    pub fn collides(&self, origin_row: i32, origin_col: i32, shape: &Shape) -> bool {
        shape.cells().iter().any(|&(dr, dc)| {
            let row = origin_row + dr;
            let col = origin_col + dc;
            col < 0
                || col >= self.cols as i32
                || row >= self.rows as i32
                || (row >= 0 && self.is_occupied(row, col))
        })
    }

    /// Write `kind` into every cell `shape` covers.
    ///
    /// Fails without touching the board if any covered cell is above the
    /// visible area ([`LockError::SpawnBlocked`]), or is outside the walls,
    /// below the floor or already occupied ([`LockError::Obstructed`]).
    pub fn lock(
        &mut self,
        origin_row: i32,
        origin_col: i32,
        shape: &Shape,
        kind: PieceKind,
    ) -> Result<(), LockError> {
        let cells = shape.cells();
        if cells.iter().any(|&(dr, _)| origin_row + dr < 0) {
            return Err(LockError::SpawnBlocked);
        }
        if self.collides(origin_row, origin_col, shape) {
            return Err(LockError::Obstructed);
        }

        for &(dr, dc) in &cells {
            self.set(origin_row + dr, origin_col + dc, Some(kind));
        }
        Ok(())
    }

    /// Borrow one row of cells; `None` below the last row
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    /// Remove every full row at once and return how many were removed.
    ///
    /// Remaining rows keep their order and drop by the number of cleared rows
    /// beneath them; vacated rows at the top are emptied.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.cols;
        let mut cleared = 0;
        let mut write_row = self.rows;

        // Two-pointer compaction, scanning bottom to top.
        for read_row in (0..self.rows).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * width;
                self.cells.copy_within(src..src + width, write_row * width);
            }
        }

        self.cells[..write_row * width].fill(None);
        cleared
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, `.` empty and a piece letter occupied.
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str]) -> Self {
        let cols = rows[0].len();
        let mut board = Self::new(rows.len(), cols);
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                board.set(r as i32, c as i32, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_ROWS as usize, BOARD_COLS as usize)
    }
}
