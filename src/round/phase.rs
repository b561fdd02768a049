//! Round phases and the continuations that move between them.

use serde::{Deserialize, Serialize};

/// Result of comparing the player's pick against the ball.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// Where a round is in its reveal → shuffle → select → resolve sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ball shown at its starting slot.
    Revealing,
    /// Swap `step` (0-based) is in progress or was just performed.
    Shuffling { step: u32 },
    /// Unlocked and waiting for the player's pick.
    AwaitingSelection,
    /// Pick made, ball revealed at its true slot.
    Resolving(Outcome),
    /// Terminal: the pick was correct.
    Advancing,
    /// Terminal: the pick was wrong.
    Ending,
}

impl RoundPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundPhase::Advancing | RoundPhase::Ending)
    }
}

/// A suspended piece of round logic waiting on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStep {
    /// Reveal dwell elapsed: lower cups, hide ball.
    EndReveal,
    /// Settle elapsed: draw swaps, perform the first.
    BeginShuffle,
    /// Swap `step` finished animating: start the inter-step pause.
    SwapSettled { step: u32 },
    /// Inter-step pause elapsed: perform swap `step` or unlock.
    NextSwap { step: u32 },
    /// Ball has been shown long enough: play the outcome cue.
    OutcomeCue,
    /// Cue played: lower the cups.
    LowerCups,
    /// Cups lowered: hide the ball and hand back to the session.
    Finish,
}

/// What the session should do after feeding a round a continuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundProgress {
    /// More continuations are queued, or the round is awaiting input.
    Pending,
    /// Round resolved correct.
    Advance,
    /// Round resolved incorrect.
    End,
}
