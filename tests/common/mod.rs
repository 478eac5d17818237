//! Scripted sources shared by the integration tests.

use blockfall::core::RandomSource;
use blockfall::types::PieceKind;

/// Random source that always selects the same kind.
pub struct Always(pub PieceKind);

impl RandomSource for Always {
    fn next_u32(&mut self) -> u32 {
        PieceKind::ALL.iter().position(|k| *k == self.0).unwrap() as u32
    }
}
