//! Random swap drawing.
//!
//! Each swap picks `a` uniformly from `[0, n)`, then `b` uniformly from
//! the remaining `n - 1` slots by drawing from `[0, n - 1)` and stepping
//! over `a`. Consecutive swaps are independent: repeats and back-to-back
//! reversals are allowed.

use smallvec::SmallVec;

use crate::core::{GameRng, SlotId, SwapPair};
use crate::error::ConfigError;

/// A round's worth of swaps. Inline up to the longest standard shuffle.
pub type SwapSequence = SmallVec<[SwapPair; 16]>;

/// Draws distinct-slot swap pairs for a fixed cup count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomSwapGenerator {
    cup_count: u8,
}

impl RandomSwapGenerator {
    /// Create a generator for `cup_count` cups.
    ///
    /// Fewer than two cups cannot form a swap and is a configuration error.
    pub fn new(cup_count: u8) -> Result<Self, ConfigError> {
        if cup_count < 2 {
            return Err(ConfigError::CannotSwap { cup_count });
        }
        Ok(Self { cup_count })
    }

    #[must_use]
    pub fn cup_count(&self) -> u8 {
        self.cup_count
    }

    /// Draw one swap. Never returns `a == b`.
    pub fn draw(&self, rng: &mut GameRng) -> SwapPair {
        let n = self.cup_count as usize;
        let a = rng.gen_index(n);
        let mut b = rng.gen_index(n - 1);
        if b >= a {
            b += 1;
        }
        // Both indices are < cup_count, which is a u8.
        SwapPair::new(SlotId::new(a as u8), SlotId::new(b as u8))
    }

    /// Draw `swap_count` swaps in order.
    pub fn sequence(&self, rng: &mut GameRng, swap_count: u32) -> SwapSequence {
        (0..swap_count).map(|_| self.draw(rng)).collect()
    }
}
