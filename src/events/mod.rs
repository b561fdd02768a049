//! Events emitted to the presentation, audio and outcome collaborators.
//!
//! The core never renders or plays anything itself. It describes what
//! happened in slot indices and durations; the host decides screen
//! coordinates, sounds and dialog text.

use serde::{Deserialize, Serialize};

use crate::core::SlotId;

/// Fire-and-forget audio cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// One swap step of the shuffle.
    ShuffleStep,
    /// Correct pick.
    Success,
    /// Wrong pick.
    Fail,
}

/// Something the outside world should show, play or record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A round began with a fresh identity arrangement.
    RoundStarted {
        stage: u8,
        stage_count: u8,
        cup_count: u8,
    },
    /// The ball became visible at `slot`.
    BallShown { slot: SlotId },
    BallHidden,
    /// All cups raised or lowered over `duration_ms`.
    CupsLifted { lifted: bool, duration_ms: u64 },
    SelectionLocked,
    SelectionUnlocked,
    /// The cups at slots `a` and `b` trade places over `duration_ms`.
    Swapped { a: SlotId, b: SlotId, duration_ms: u64 },
    Cue(Cue),
    /// Every stage cleared. Terminal for the run.
    Won { player: String },
    /// Wrong pick. Terminal for the run.
    Lost,
    /// The in-game HUD should disappear (reset to menu).
    HudHidden,
    /// The main menu should appear.
    MenuShown,
}

impl GameEvent {
    /// Is this one of the two run-ending events?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::Won { .. } | GameEvent::Lost)
    }
}

/// Receiver for emitted events.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
