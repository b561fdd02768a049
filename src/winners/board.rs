//! The list of recent winners.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How many winners are kept.
pub const DEFAULT_CAPACITY: usize = 20;

/// One cleared run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub name: String,
    /// Unix time in milliseconds.
    pub recorded_at_ms: u64,
}

impl WinnerRecord {
    /// `YYYY.MM.DD HH:MM` in UTC, or `None` if the timestamp is out of range.
    #[must_use]
    pub fn formatted_time(&self) -> Option<String> {
        let format = time::format_description::parse("[year].[month].[day] [hour]:[minute]").ok()?;
        let nanos = i128::from(self.recorded_at_ms) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .ok()?
            .format(&format)
            .ok()
    }
}

/// Most recent winners, newest first, bounded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinnerBoard {
    records: Vec<WinnerRecord>,
}

impl Default for WinnerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl WinnerBoard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Insert a record at the front, keeping at most `capacity`.
    pub fn push(&mut self, record: WinnerRecord, capacity: usize) {
        self.records.insert(0, record);
        self.records.truncate(capacity);
    }

    /// Newest first.
    #[must_use]
    pub fn records(&self) -> &[WinnerRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
