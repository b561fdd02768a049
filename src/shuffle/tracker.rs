//! Ball position tracking.

use crate::core::{SlotId, SwapPair};

/// Ground-truth slot of the ball.
///
/// `apply_swap` is the only mutator: a swap touching the ball's slot
/// moves the ball to the other slot, any other swap leaves it alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BallTracker {
    slot: SlotId,
}

impl BallTracker {
    /// Place the ball at `slot`.
    #[must_use]
    pub const fn new(slot: SlotId) -> Self {
        Self { slot }
    }

    /// Follow the ball through one swap.
    pub fn apply_swap(&mut self, swap: SwapPair) {
        self.slot = swap.follow(self.slot);
    }

    /// Where the ball is now.
    #[must_use]
    pub const fn current_slot(&self) -> SlotId {
        self.slot
    }
}
