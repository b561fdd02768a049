//! Error types.
//!
//! Only configuration and storage can fail. Round play never returns an
//! error: stale continuations and invalid input are absorbed as no-ops.

use thiserror::Error;

/// Invalid level table or game configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("level table is empty")]
    EmptyLevelTable,

    #[error("stage {stage}: needs at least 2 cups to swap, got {cup_count}")]
    TooFewCups { stage: u8, cup_count: u8 },

    #[error("cannot draw a swap from {cup_count} cup(s)")]
    CannotSwap { cup_count: u8 },

    #[error("stage {stage}: swap speed must be positive")]
    ZeroSwapSpeed { stage: u8 },

    #[error("stage numbers must run 1..=n in order: expected {expected}, got {found}")]
    StageOutOfOrder { expected: u8, found: u8 },

    #[error("stage {stage} is not harder than the stage before it")]
    DifficultyRegression { stage: u8 },

    #[error("malformed configuration: {message}")]
    Malformed { message: String },
}

/// Failure reading or writing the winner list.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("winner store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("winner store JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}
