//! Virtual-clock task queue.
//!
//! A single logical timeline: continuations are queued with a delay and
//! dispatched strictly in `(due time, scheduling order)` order. The clock
//! only moves when the host pops work, so the same inputs always replay
//! the same way. A real-time host sleeps until [`Timeline::next_due`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::EpochToken;

/// A continuation popped from the timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduled<W> {
    /// Virtual time the continuation fires at.
    pub due_ms: u64,
    /// Epoch live when it was scheduled.
    pub token: EpochToken,
    pub wake: W,
}

#[derive(Debug)]
struct Entry<W> {
    due_ms: u64,
    seq: u64,
    token: EpochToken,
    wake: W,
}

impl<W> PartialEq for Entry<W> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<W> Eq for Entry<W> {}

impl<W> PartialOrd for Entry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W> Ord for Entry<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Pending continuations ordered by due time.
#[derive(Debug)]
pub struct Timeline<W> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry<W>>>,
}

impl<W> Default for Timeline<W> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }
}

impl<W> Timeline<W> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Queue `wake` to fire `delay_ms` from now under `token`.
    pub fn schedule(&mut self, delay_ms: u64, token: EpochToken, wake: W) {
        let entry = Entry {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            token,
            wake,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Due time of the earliest pending continuation.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(e)| e.due_ms)
    }

    /// Number of pending continuations, stale ones included.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pop the earliest continuation due at or before `until_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Scheduled<W>> {
        if self.next_due()? > until_ms {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(Scheduled {
            due_ms: entry.due_ms,
            token: entry.token,
            wake: entry.wake,
        })
    }

    /// Pop the earliest continuation regardless of due time.
    pub fn pop_next(&mut self) -> Option<Scheduled<W>> {
        self.pop_due(u64::MAX)
    }

    /// Move the clock forward without dispatching anything.
    ///
    /// Never moves it backwards.
    pub fn advance_clock_to(&mut self, at_ms: u64) {
        self.now_ms = self.now_ms.max(at_ms);
    }
}
