//! Slot and cup identifiers.
//!
//! ## SlotId
//!
//! A fixed physical position on the table. Slots never move.
//!
//! ## CupId
//!
//! A movable cup. Cups travel between slots as swaps are applied.

use serde::{Deserialize, Serialize};

/// Fixed physical position, 0-based, in `[0, cup_count)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u8);

impl SlotId {
    /// Create a new slot ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw slot index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all slots of a round with `cup_count` cups.
    ///
    /// ```
    /// use cup_shuffle::core::SlotId;
    ///
    /// let slots: Vec<_> = SlotId::all(3).collect();
    /// assert_eq!(slots, vec![SlotId::new(0), SlotId::new(1), SlotId::new(2)]);
    /// ```
    pub fn all(cup_count: u8) -> impl Iterator<Item = SlotId> {
        (0..cup_count).map(SlotId)
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Identity of one physical cup. Has no behavior beyond identity.
///
/// At round start cup `n` sits in slot `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CupId(pub u8);

impl CupId {
    /// Create a new cup ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cup({})", self.0)
    }
}

/// An unordered exchange of the cups at two slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwapPair {
    pub a: SlotId,
    pub b: SlotId,
}

impl SwapPair {
    /// Create a swap of slots `a` and `b`.
    #[must_use]
    pub const fn new(a: SlotId, b: SlotId) -> Self {
        Self { a, b }
    }

    /// Does this swap touch `slot`?
    #[must_use]
    pub fn involves(self, slot: SlotId) -> bool {
        self.a == slot || self.b == slot
    }

    /// The slot a ball at `slot` ends up in after this swap.
    #[must_use]
    pub fn follow(self, slot: SlotId) -> SlotId {
        if slot == self.a {
            self.b
        } else if slot == self.b {
            self.a
        } else {
            slot
        }
    }

    /// A swap of a slot with itself moves nothing.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.a == self.b
    }
}

impl std::fmt::Display for SwapPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} <-> {})", self.a.0, self.b.0)
    }
}
