//! RNG module - random sources and piece selection
//!
//! The engine consumes randomness through [`RandomSource`]. [`SimpleRng`] is a
//! seeded LCG so a given seed always replays the same piece sequence.
//! [`PieceGenerator`] turns raw draws into piece kinds, either uniformly and
//! independently per draw, or from a shuffled bag of all seven kinds.

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Uniform 32-bit random source
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Random value in `[0, max)`
    fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low LCG bits cycle with short periods; use the high half.
        self.state >> 16
    }
}

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomizer {
    /// Each draw is independent and uniform over the seven kinds
    #[default]
    Uniform,
    /// Draw without replacement from a shuffled bag of all seven kinds
    SevenBag,
}

/// Piece kind generator backed by a [`RandomSource`]
pub struct PieceGenerator {
    rng: Box<dyn RandomSource + Send>,
    mode: Randomizer,
    bag: [PieceKind; 7],
    bag_index: usize,
}

impl PieceGenerator {
    pub fn new(rng: impl RandomSource + Send + 'static, mode: Randomizer) -> Self {
        Self {
            rng: Box::new(rng),
            mode,
            bag: PieceKind::ALL,
            // Start exhausted so the first bag draw shuffles.
            bag_index: PieceKind::ALL.len(),
        }
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        match self.mode {
            Randomizer::Uniform => {
                PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            Randomizer::SevenBag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }

    /// Fisher-Yates shuffle of a fresh bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        for i in (1..self.bag.len()).rev() {
            let j = self.rng.next_range((i + 1) as u32) as usize;
            self.bag.swap(i, j);
        }
        self.bag_index = 0;
    }
}

impl std::fmt::Debug for PieceGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieceGenerator")
            .field("mode", &self.mode)
            .field("bag_index", &self.bag_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0).state(), 1);
    }

    #[test]
    fn uniform_draws_cover_every_kind() {
        let mut gen = PieceGenerator::new(SimpleRng::new(7), Randomizer::Uniform);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let kind = gen.next_kind();
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn seven_bag_yields_each_kind_once_per_bag() {
        let mut gen = PieceGenerator::new(SimpleRng::new(1), Randomizer::SevenBag);
        for _ in 0..3 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| gen.next_kind()).collect();
            drawn.sort_by_key(|k| PieceKind::ALL.iter().position(|a| a == k));
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn randomizer_serde_names() {
        let json = serde_json::to_string(&Randomizer::SevenBag).unwrap();
        assert_eq!(json, "\"seven_bag\"");
        let back: Randomizer = serde_json::from_str("\"uniform\"").unwrap();
        assert_eq!(back, Randomizer::Uniform);
    }
}
