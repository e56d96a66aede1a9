//! RNG module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L) in a uniformly
//! shuffled order. Pieces are drawn until the bag is empty, then a new bag is
//! shuffled. Seeded construction makes a session reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    bag: [PieceKind; 7],
    /// Pieces left in the current bag; `bag[..left]`, drawn from the back
    left: usize,
    rng: StdRng,
}

impl PieceBag {
    /// Create a bag generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a bag generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Start with an empty bag; the first draw shuffles a fresh one.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            bag: PieceKind::ALL,
            left: 0,
            rng,
        }
    }

    /// Discard the rest of the current bag. The RNG stream continues.
    pub fn reset(&mut self) {
        self.left = 0;
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.left = self.bag.len();
    }

    /// Draw the next piece, shuffling a new bag when the current one is empty
    pub fn draw(&mut self) -> PieceKind {
        if self.left == 0 {
            self.refill_bag();
        }
        self.left -= 1;
        self.bag[self.left]
    }

    /// Peek at the next piece without disturbing the sequence
    pub fn peek(&self) -> PieceKind {
        if self.left > 0 {
            return self.bag[self.left - 1];
        }
        let mut preview = self.clone();
        preview.draw()
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[..self.left]
    }
}

impl Iterator for PieceBag {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
