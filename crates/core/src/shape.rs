//! Shape module - tetromino occupancy matrices and rotation
//!
//! A shape is a small boolean matrix (at most 4x4) describing which cells a piece
//! covers relative to its top-left anchor. Rotation is clockwise by
//! transpose-then-reverse, so an N×M shape becomes M×N.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest dimension a shape can have
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupied offsets of a shape, `(row, col)` relative to the anchor
pub type ShapeCells = ArrayVec<(i32, i32), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// Immutable occupancy matrix for one piece kind in one rotation
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    /// Row-major occupancy; entries outside `rows × cols` are always false
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Panics if the matrix is empty, ragged or larger than 4x4. Only the static
    /// library and tests construct shapes this way.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM, "bad shape height");
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM, "bad shape width");

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape");
            for (c, &v) in row.iter().enumerate() {
                bits[r][c] = v != 0;
            }
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        }
    }

    /// Spawn orientation for a piece kind
    pub fn spawn(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[&[1, 1, 1, 1]]),
            PieceKind::J => Self::from_rows(&[&[0, 1], &[0, 1], &[1, 1]]),
            PieceKind::L => Self::from_rows(&[&[1, 0], &[1, 0], &[1, 1]]),
            PieceKind::O => Self::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::S => Self::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
            PieceKind::T => Self::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
            PieceKind::Z => Self::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        }
    }

    /// Number of matrix rows
    pub fn height(&self) -> usize {
        self.rows as usize
    }

    /// Number of matrix columns
    pub fn width(&self) -> usize {
        self.cols as usize
    }

    /// Occupied offsets in row-major order
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for r in 0..self.height() {
            for c in 0..self.width() {
                if self.bits[r][c] {
                    out.push((r as i32, c as i32));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: `rotated[i][j] = original[N-1-j][i]`
    pub fn rotated_cw(&self) -> Self {
        let n = self.height();
        let m = self.width();
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in bits.iter_mut().enumerate().take(m) {
            for (j, bit) in row.iter_mut().enumerate().take(n) {
                *bit = self.bits[n - 1 - j][i];
            }
        }
        Self {
            rows: m as u8,
            cols: n as u8,
            bits,
        }
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for r in 0..self.height() {
            let row: String = (0..self.width())
                .map(|c| if self.bits[r][c] { '#' } else { '.' })
                .collect();
            list.entry(&row);
        }
        list.finish()
    }
}

/// Column a piece of the given width spawns at: `floor(cols/2) - ceil(width/2)`
pub fn spawn_column(board_cols: usize, shape_width: usize) -> i32 {
    (board_cols / 2) as i32 - shape_width.div_ceil(2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_spawn_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(Shape::spawn(kind).cells().len(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn rotation_swaps_dimensions() {
        let j = Shape::spawn(PieceKind::J);
        assert_eq!((j.height(), j.width()), (3, 2));
        let r = j.rotated_cw();
        assert_eq!((r.height(), r.width()), (2, 3));
    }

    #[test]
    fn t_rotates_clockwise() {
        // ###      .#
        // .#.  ->  ##
        //          .#
        let t = Shape::spawn(PieceKind::T).rotated_cw();
        assert_eq!(t, Shape::from_rows(&[&[0, 1], &[1, 1], &[0, 1]]));
    }

    #[test]
    fn i_rotates_to_vertical_bar() {
        let i = Shape::spawn(PieceKind::I).rotated_cw();
        assert_eq!(i, Shape::from_rows(&[&[1], &[1], &[1], &[1]]));
    }

    #[test]
    fn cells_are_row_major() {
        let s = Shape::spawn(PieceKind::S);
        assert_eq!(s.cells().as_slice(), &[(0, 1), (0, 2), (1, 0), (1, 1)]);
    }

    #[test]
    fn spawn_column_centers_piece() {
        assert_eq!(spawn_column(10, 4), 3);
        assert_eq!(spawn_column(10, 3), 3);
        assert_eq!(spawn_column(10, 2), 4);
        assert_eq!(spawn_column(7, 2), 2);
    }

    #[test]
    fn debug_prints_matrix() {
        let o = Shape::spawn(PieceKind::O);
        assert_eq!(format!("{:?}", o), "[\"##\", \"##\"]");
    }
}
