//! Game session: player identity, level progression, run outcome.

mod game;
mod player;

pub use game::{GameSession, RunOutcome, SessionStatus, Wake};
pub use player::{PlayerName, DEFAULT_PLAYER_NAME, MAX_PLAYER_NAME_CHARS};
