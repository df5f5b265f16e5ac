//! In-memory mood store.
//!
//! Used by tests and by callers that do not want a file on disk. Writes can
//! be switched to fail to exercise the write-failure path.

use super::{MoodStore, StoreError, StoreResult};
use crate::model::mood::MoodRecord;
use std::io;
use std::path::PathBuf;

const MEMORY_LOCATION: &str = ":memory:";

#[derive(Debug, Clone, Default)]
pub struct MemoryMoodStore {
    records: Option<Vec<MoodRecord>>,
    fail_writes: bool,
    save_count: usize,
}

impl MemoryMoodStore {
    /// Store that has never been written (reads as absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`.
    pub fn with_records(records: Vec<MoodRecord>) -> Self {
        Self {
            records: Some(records),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Records as last persisted, or `None` if nothing was ever written.
    pub fn persisted(&self) -> Option<&[MoodRecord]> {
        self.records.as_deref()
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl MoodStore for MemoryMoodStore {
    fn load_records(&self) -> StoreResult<Vec<MoodRecord>> {
        Ok(self.records.clone().unwrap_or_default())
    }

    fn save_records(&mut self, records: &[MoodRecord]) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed {
                path: PathBuf::from(MEMORY_LOCATION),
                source: io::Error::new(io::ErrorKind::Other, "writes disabled"),
            });
        }
        self.records = Some(records.to_vec());
        self.save_count += 1;
        Ok(())
    }

    fn location(&self) -> String {
        MEMORY_LOCATION.to_string()
    }
}
