//! Round orchestration.
//!
//! A round runs `Revealing → Shuffling → AwaitingSelection → Resolving`
//! and stops in `Advancing` or `Ending`. Every pause between phases is a
//! [`RoundStep`] on the session's timeline, so a superseded round simply
//! stops being fed.

mod machine;
mod phase;

pub use machine::{RoundContext, RoundMachine};
pub use phase::{Outcome, RoundPhase, RoundProgress, RoundStep};
