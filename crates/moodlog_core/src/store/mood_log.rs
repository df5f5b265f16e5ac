//! Per-day mood log with last-write-wins replacement.
//!
//! # Responsibility
//! - Hold the loaded records in storage order.
//! - Record a mood for a date and persist the whole log synchronously.
//! - Serve the most recent records for history display.
//!
//! # Invariants
//! - At most one record per date.
//! - Recording an existing date removes the earlier record and appends the
//!   new one, so storage order is the order of each date's latest write.
//! - In-memory state changes only after the store accepted the write.

use super::csv_store::CsvMoodStore;
use super::{compact_by_date, MoodStore, StoreResult};
use crate::model::mood::{MoodLabel, MoodRecord};
use chrono::NaiveDate;
use log::{info, warn};
use std::path::PathBuf;

#[derive(Debug)]
pub struct MoodLog<S: MoodStore = CsvMoodStore> {
    store: S,
    records: Vec<MoodRecord>,
}

impl MoodLog<CsvMoodStore> {
    /// Loads the CSV log at `path`; a missing file yields an empty log.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::load(CsvMoodStore::new(path))
    }
}

impl<S: MoodStore> MoodLog<S> {
    /// Loads records from `store`.
    ///
    /// Duplicate dates in the persisted data are compacted with the same
    /// last-write-wins rule used by `record`; the store itself is not
    /// rewritten until the next `record`.
    ///
    /// # Errors
    /// - `StoreError::ReadMalformed` / `ReadFailed` from the backend.
    pub fn load(store: S) -> StoreResult<Self> {
        let mut records = store.load_records()?;
        let dropped = compact_by_date(&mut records);
        if dropped > 0 {
            warn!(
                "event=mood_log_load module=mood_log status=degraded duplicates_dropped={} location={}",
                dropped,
                store.location()
            );
        }
        Ok(Self { store, records })
    }

    /// Records `mood` for `date`, replacing any earlier record for that date.
    ///
    /// # Errors
    /// - `StoreError::WriteFailed` when persisting fails; the log keeps its
    ///   pre-call contents.
    pub fn record(&mut self, mood: MoodLabel, date: NaiveDate) -> StoreResult<()> {
        let mut next = self.records.clone();
        next.push(MoodRecord::new(date, mood));
        let replaced = compact_by_date(&mut next) > 0;

        self.store.save_records(&next)?;
        self.records = next;
        info!(
            "event=mood_record module=mood_log status=ok date={} mood={} replaced={} rows={}",
            date,
            mood.name(),
            replaced,
            self.records.len()
        );
        Ok(())
    }

    /// Returns the last `n` records in storage order, or all if fewer.
    pub fn recent(&self, n: usize) -> &[MoodRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn records(&self) -> &[MoodRecord] {
        &self.records
    }

    pub fn get(&self, date: NaiveDate) -> Option<MoodLabel> {
        self.records
            .iter()
            .find(|record| record.date == date)
            .map(|record| record.mood)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Backend location, for display and diagnostics.
    pub fn source(&self) -> String {
        self.store.location()
    }
}
