//! Failed-Attempt Counters
//!
//! Storage abstraction behind login throttling. The caller supplies the
//! limit; the store checks and counts in one step.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;

/// Counter backend errors
#[derive(Debug, Error)]
pub enum ThrottleStoreError {
    #[error("Throttle backend unavailable: {0}")]
    Unavailable(String),
}

/// Per-identifier attempt state
///
/// `failure_count` counts admitted attempts since the last reset; an
/// attempt is counted when it starts and forgiven by `reset` on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureEntry {
    pub failure_count: u32,
    pub last_attempt_at: DateTime<Utc>,
}

/// Outcome of [`FailureCounterStore::try_begin_attempt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The attempt may proceed; `attempt` is its 1-based number
    Admitted { attempt: u32 },
    /// The limit is reached; the entry was left untouched
    Throttled,
}

/// Trait for failure counter backends
///
/// `try_begin_attempt` must check and count in one atomic step per key so
/// that concurrent attempts can never exceed the limit.
#[trait_variant::make(FailureCounterStore: Send)]
pub trait LocalFailureCounterStore {
    /// Current failure count for `key` (0 when unknown or aged out)
    async fn failures(&self, key: &str) -> Result<u32, ThrottleStoreError>;

    /// Admit and count an attempt for `key` unless `limit` attempts are
    /// already counted
    async fn try_begin_attempt(&self, key: &str, limit: u32)
    -> Result<Admission, ThrottleStoreError>;

    /// Forget all failures for `key`
    async fn reset(&self, key: &str) -> Result<(), ThrottleStoreError>;
}

/// Process-local counter table
///
/// With a `window`, an entry whose last attempt is older than the window
/// counts as zero. Without one, entries only clear through `reset`.
#[derive(Debug, Default)]
pub struct InMemoryFailureCounter {
    window: Option<Duration>,
    entries: Mutex<HashMap<String, FailureEntry>>,
}

impl InMemoryFailureCounter {
    pub fn new(window: Option<Duration>) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of one entry (diagnostics and tests)
    pub fn entry(&self, key: &str) -> Option<FailureEntry> {
        self.entries.lock().get(key).copied()
    }

    fn is_stale(&self, entry: &FailureEntry, now: DateTime<Utc>) -> bool {
        match self.window.and_then(|w| chrono::Duration::from_std(w).ok()) {
            Some(window) => now - entry.last_attempt_at > window,
            None => false,
        }
    }
}

impl FailureCounterStore for InMemoryFailureCounter {
    async fn failures(&self, key: &str) -> Result<u32, ThrottleStoreError> {
        let now = Utc::now();
        let entries = self.entries.lock();
        Ok(entries
            .get(key)
            .filter(|entry| !self.is_stale(entry, now))
            .map_or(0, |entry| entry.failure_count))
    }

    async fn try_begin_attempt(
        &self,
        key: &str,
        limit: u32,
    ) -> Result<Admission, ThrottleStoreError> {
        let now = Utc::now();
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(key) {
            if !self.is_stale(entry, now) && entry.failure_count >= limit {
                return Ok(Admission::Throttled);
            }
        }

        let entry = entries.entry(key.to_string()).or_insert(FailureEntry {
            failure_count: 0,
            last_attempt_at: now,
        });
        if self.is_stale(entry, now) {
            entry.failure_count = 0;
        }
        entry.failure_count = entry.failure_count.saturating_add(1);
        entry.last_attempt_at = now;
        Ok(Admission::Admitted {
            attempt: entry.failure_count,
        })
    }

    async fn reset(&self, key: &str) -> Result<(), ThrottleStoreError> {
        if let Some(entry) = self.entries.lock().get_mut(key) {
            entry.failure_count = 0;
        }
        Ok(())
    }
}
