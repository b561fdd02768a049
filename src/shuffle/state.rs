//! Combined permutation + ball state for one round.

use crate::core::{CupId, SlotId, SwapPair};

use super::{BallTracker, SlotPermutation};

/// Cup arrangement and ball position of the current round.
///
/// Owns both structures so a swap always advances them together.
/// Created fresh per round and dropped when the round ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffleState {
    permutation: SlotPermutation,
    ball: BallTracker,
    swaps_applied: u32,
}

impl ShuffleState {
    /// Identity arrangement of `cup_count` cups with the ball at `ball_slot`.
    ///
    /// # Panics
    ///
    /// Panics if `ball_slot` is not a slot of this round.
    #[must_use]
    pub fn new(cup_count: u8, ball_slot: SlotId) -> Self {
        assert!(
            ball_slot.0 < cup_count,
            "ball slot {ball_slot} outside {cup_count} cups"
        );
        Self {
            permutation: SlotPermutation::identity(cup_count),
            ball: BallTracker::new(ball_slot),
            swaps_applied: 0,
        }
    }

    /// Apply one swap to the cups and the ball.
    pub fn apply_swap(&mut self, swap: SwapPair) {
        self.permutation.swap(swap);
        self.ball.apply_swap(swap);
        self.swaps_applied += 1;
    }

    #[must_use]
    pub fn ball_slot(&self) -> SlotId {
        self.ball.current_slot()
    }

    #[must_use]
    pub fn cup_at(&self, slot: SlotId) -> Option<CupId> {
        self.permutation.cup_at(slot)
    }

    #[must_use]
    pub fn cup_count(&self) -> u8 {
        self.permutation.len() as u8
    }

    #[must_use]
    pub fn contains(&self, slot: SlotId) -> bool {
        slot.index() < self.permutation.len()
    }

    #[must_use]
    pub fn permutation(&self) -> &SlotPermutation {
        &self.permutation
    }

    #[must_use]
    pub fn swaps_applied(&self) -> u32 {
        self.swaps_applied
    }
}
