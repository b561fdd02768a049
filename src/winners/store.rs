//! Winner persistence.
//!
//! The core only ever calls [`WinnerStore::record_win`], once per cleared
//! run. Storage format and retention belong to the store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::error::StoreError;

use super::{WinnerBoard, WinnerRecord, DEFAULT_CAPACITY};

/// Persistence collaborator for cleared runs.
pub trait WinnerStore {
    /// Current winners, newest first.
    fn load(&self) -> WinnerBoard;

    /// Record that `name` cleared every stage.
    fn record_win(&mut self, name: &str) -> Result<(), StoreError>;
}

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// In-process store. Forgets everything on drop.
#[derive(Clone, Debug, Default)]
pub struct MemoryWinnerStore {
    board: WinnerBoard,
}

impl MemoryWinnerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WinnerStore for MemoryWinnerStore {
    fn load(&self) -> WinnerBoard {
        self.board.clone()
    }

    fn record_win(&mut self, name: &str) -> Result<(), StoreError> {
        let record = WinnerRecord {
            name: name.to_string(),
            recorded_at_ms: now_unix_ms(),
        };
        self.board.push(record, DEFAULT_CAPACITY);
        Ok(())
    }
}

/// Store backed by a JSON array on disk.
///
/// A missing, unreadable or malformed file reads as an empty board.
#[derive(Clone, Debug)]
pub struct JsonFileWinnerStore {
    path: PathBuf,
    capacity: usize,
}

impl JsonFileWinnerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Keep at most `capacity` winners.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<WinnerBoard, StoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(WinnerBoard::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl WinnerStore for JsonFileWinnerStore {
    fn load(&self) -> WinnerBoard {
        self.read().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Discarding unreadable winner list");
            WinnerBoard::new()
        })
    }

    fn record_win(&mut self, name: &str) -> Result<(), StoreError> {
        let mut board = self.load();
        board.push(
            WinnerRecord {
                name: name.to_string(),
                recorded_at_ms: now_unix_ms(),
            },
            self.capacity,
        );
        let json = serde_json::to_vec(&board)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
