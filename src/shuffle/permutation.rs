//! Slot → cup mapping.
//!
//! A bijection between the slots of a round and its cups. The only
//! mutator exchanges two entries, so bijectivity holds after every swap.

use smallvec::SmallVec;

use crate::core::{CupId, SlotId, SwapPair};

/// Which cup currently occupies each slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotPermutation {
    cups: SmallVec<[CupId; 8]>,
}

impl SlotPermutation {
    /// Identity mapping: cup `n` in slot `n`.
    #[must_use]
    pub fn identity(cup_count: u8) -> Self {
        Self {
            cups: (0..cup_count).map(CupId::new).collect(),
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cups.is_empty()
    }

    /// The cup at `slot`, or `None` if the slot is out of range.
    #[must_use]
    pub fn cup_at(&self, slot: SlotId) -> Option<CupId> {
        self.cups.get(slot.index()).copied()
    }

    /// The slot currently holding `cup`.
    #[must_use]
    pub fn slot_of(&self, cup: CupId) -> Option<SlotId> {
        self.cups
            .iter()
            .position(|&c| c == cup)
            .map(|i| SlotId::new(i as u8))
    }

    /// Exchange the cups at the two slots of `swap`.
    ///
    /// A swap of a slot with itself leaves the mapping unchanged; the
    /// caller still spends the swap's animation time on it.
    ///
    /// # Panics
    ///
    /// Panics if either slot is out of range.
    pub fn swap(&mut self, swap: SwapPair) {
        self.cups.swap(swap.a.index(), swap.b.index());
    }

    /// Cups in slot order.
    #[must_use]
    pub fn as_slice(&self) -> &[CupId] {
        &self.cups
    }

    /// Every cup appears exactly once.
    #[must_use]
    pub fn is_bijection(&self) -> bool {
        let mut seen: SmallVec<[bool; 8]> = SmallVec::from_elem(false, self.cups.len());
        for cup in &self.cups {
            match seen.get_mut(cup.0 as usize) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }
}
