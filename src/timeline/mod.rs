//! Cooperative scheduling and cancellation.
//!
//! The game runs on one logical timeline. Every artificial delay is a
//! continuation queued on a [`Timeline`] together with the
//! [`EpochToken`] live at the time. When it fires, the owner compares
//! that token against the [`SessionEpoch`] and drops it if a reset or
//! restart has happened since. Bumping the epoch is the only way to stop
//! an in-flight round.

mod epoch;
mod scheduler;

pub use epoch::{EpochToken, SessionEpoch};
pub use scheduler::{Scheduled, Timeline};
