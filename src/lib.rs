//! # cup-shuffle
//!
//! Round orchestration engine for a "find the ball under the cup" shell
//! game. A ball is revealed under one of N cups, the cups are shuffled
//! through random pairwise swaps, and the player picks the cup hiding
//! the ball. Correct picks advance through a fixed table of levels; a
//! wrong pick ends the run.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Free**: The core emits slot-level events
//!    (`Swapped`, `BallShown`, cues) and never renders or plays anything.
//!
//! 2. **One Timeline**: Every pause is a continuation on a virtual-clock
//!    [`Timeline`]. Hosts drive it in real time or run it instantly.
//!
//! 3. **Epoch Cancellation**: Continuations carry the [`EpochToken`] live
//!    when they were queued. Restarting or resetting bumps the epoch and
//!    everything older is dropped on arrival.
//!
//! ## Example
//!
//! ```
//! use cup_shuffle::{GameConfig, GameEvent, GameSession, MemoryWinnerStore, SessionStatus};
//!
//! let mut session = GameSession::new(
//!     GameConfig::default().with_seed(7),
//!     Vec::<GameEvent>::new(),
//!     MemoryWinnerStore::new(),
//! );
//! session.start("Mina");
//!
//! // Play every stage perfectly.
//! while session.status() == SessionStatus::Playing {
//!     session.run_until_idle();
//!     if let Some(ball) = session.round().map(|r| r.ball_slot()) {
//!         session.choose(ball);
//!     }
//! }
//!
//! assert!(session.sink().contains(&GameEvent::Won { player: "Mina".into() }));
//! ```
//!
//! ## Modules
//!
//! - `core`: Slot/cup identities, RNG, level table and pacing
//! - `shuffle`: Swap generation, slot permutation, ball tracking
//! - `timeline`: Session epochs and the virtual-clock task queue
//! - `round`: The per-round state machine
//! - `session`: Player, level progression, run outcome
//! - `events`: Presentation/audio/outcome boundary
//! - `winners`: Persistence of cleared runs

pub mod core;
pub mod error;
pub mod events;
pub mod round;
pub mod session;
pub mod shuffle;
pub mod timeline;
pub mod winners;

// Re-export commonly used types
pub use crate::core::{
    CupId, SlotId, SwapPair,
    GameRng, GameRngState,
    GameConfig, Level, LevelTable, Pacing,
};

pub use crate::error::{ConfigError, StoreError};

pub use crate::events::{Cue, EventSink, GameEvent};

pub use crate::shuffle::{BallTracker, RandomSwapGenerator, ShuffleState, SlotPermutation, SwapSequence};

pub use crate::timeline::{EpochToken, SessionEpoch, Timeline};

pub use crate::round::{Outcome, RoundMachine, RoundPhase};

pub use crate::session::{GameSession, PlayerName, RunOutcome, SessionStatus};

pub use crate::winners::{JsonFileWinnerStore, MemoryWinnerStore, WinnerBoard, WinnerRecord, WinnerStore};
