//! Shuffle mechanics: swap drawing, the slot permutation and ball tracking.
//!
//! ## Example
//!
//! ```
//! use cup_shuffle::core::{GameRng, SlotId};
//! use cup_shuffle::shuffle::{RandomSwapGenerator, ShuffleState};
//!
//! let mut rng = GameRng::new(3);
//! let generator = RandomSwapGenerator::new(3).unwrap();
//! let mut state = ShuffleState::new(3, SlotId::new(1));
//! let ball_cup = state.cup_at(SlotId::new(1));
//!
//! for swap in generator.sequence(&mut rng, 10) {
//!     state.apply_swap(swap);
//! }
//!
//! // The ball never leaves the cup it started under.
//! assert_eq!(state.cup_at(state.ball_slot()), ball_cup);
//! ```

mod generator;
mod permutation;
mod state;
mod tracker;

pub use generator::{RandomSwapGenerator, SwapSequence};
pub use permutation::SlotPermutation;
pub use state::ShuffleState;
pub use tracker::BallTracker;
