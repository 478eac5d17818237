//! Scripted sources shared by the unit tests.

use crate::rng::RandomSource;
use crate::types::PieceKind;

/// Always draws the same kind
pub(crate) struct Always(pub(crate) PieceKind);

impl RandomSource for Always {
    fn next_u32(&mut self) -> u32 {
        PieceKind::ALL.iter().position(|k| *k == self.0).unwrap() as u32
    }
}
