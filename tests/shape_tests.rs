//! Shape tests: spawn orientations, rotation and spawn column

use blockfall::core::shape::spawn_column;
use blockfall::core::Shape;
use blockfall::types::PieceKind;

#[test]
fn every_shape_has_four_cells() {
    for kind in PieceKind::ALL {
        assert_eq!(Shape::spawn(kind).cells().len(), 4, "{kind:?}");
    }
}

#[test]
fn four_rotations_return_to_spawn() {
    for kind in PieceKind::ALL {
        let spawn = Shape::spawn(kind);
        let mut shape = spawn;
        for _ in 0..4 {
            shape = shape.rotated_cw();
        }
        assert_eq!(shape, spawn, "{kind:?}");
    }
}

#[test]
fn rotation_swaps_dimensions() {
    for kind in PieceKind::ALL {
        let spawn = Shape::spawn(kind);
        let turned = spawn.rotated_cw();
        assert_eq!(turned.height(), spawn.width());
        assert_eq!(turned.width(), spawn.height());
        assert_eq!(turned.cells().len(), 4);
    }
}

#[test]
fn t_rotates_clockwise() {
    // [[1,1,1],[0,1,0]] -> [[0,1],[1,1],[0,1]]
    let turned = Shape::spawn(PieceKind::T).rotated_cw();
    assert_eq!(turned, Shape::from_rows(&[&[0, 1], &[1, 1], &[0, 1]]));
}

#[test]
fn i_becomes_vertical() {
    let turned = Shape::spawn(PieceKind::I).rotated_cw();
    assert_eq!(turned.height(), 4);
    assert_eq!(turned.width(), 1);
}

#[test]
fn o_is_rotation_invariant() {
    let o = Shape::spawn(PieceKind::O);
    assert_eq!(o.rotated_cw(), o);
}

#[test]
fn spawn_column_centers_pieces() {
    assert_eq!(spawn_column(10, 4), 3);
    assert_eq!(spawn_column(10, 3), 3);
    assert_eq!(spawn_column(10, 2), 4);
    assert_eq!(spawn_column(10, 1), 4);
    assert_eq!(spawn_column(7, 2), 2);
}
