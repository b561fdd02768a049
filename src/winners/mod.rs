//! Recent winners and where they are kept.

mod board;
mod store;

pub use board::{WinnerBoard, WinnerRecord, DEFAULT_CAPACITY};
pub use store::{JsonFileWinnerStore, MemoryWinnerStore, WinnerStore};
