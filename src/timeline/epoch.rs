//! Session epochs.
//!
//! Every continuation scheduled for a round carries the token that was
//! live when it was scheduled. Beginning a new epoch makes every older
//! token stale at once; there is no finer-grained cancellation.

use serde::{Deserialize, Serialize};

/// Snapshot of the epoch counter captured by a continuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpochToken(pub u64);

impl std::fmt::Display for EpochToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}

/// The live, monotonically increasing epoch counter.
#[derive(Clone, Debug, Default)]
pub struct SessionEpoch {
    current: u64,
}

impl SessionEpoch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede everything in flight and return the new live token.
    pub fn begin_new_epoch(&mut self) -> EpochToken {
        self.current += 1;
        EpochToken(self.current)
    }

    /// The live token.
    #[must_use]
    pub fn current(&self) -> EpochToken {
        EpochToken(self.current)
    }

    /// Was `token` captured in the live epoch?
    #[must_use]
    pub fn is_current(&self, token: EpochToken) -> bool {
        token.0 == self.current
    }
}
