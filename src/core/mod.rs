//! Core types: slot and cup identities, RNG, configuration.
//!
//! These are the building blocks every other module shares.

pub mod slot;
pub mod rng;
pub mod config;

pub use slot::{CupId, SlotId, SwapPair};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, Level, LevelTable, Pacing};
