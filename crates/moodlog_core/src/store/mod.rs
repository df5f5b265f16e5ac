//! Mood log persistence.
//!
//! # Responsibility
//! - Define the storage contract behind `MoodLog`.
//! - Provide the CSV file backend and an in-memory backend.
//! - Keep last-write-wins compaction by date in one place.
//!
//! # Invariants
//! - An absent store reads as an empty log; a present but unparsable store is
//!   an error, never an empty log.
//! - A failed write leaves the previously persisted store intact.
//! - No locking: concurrent writers from separate processes can lose updates.

use crate::model::mood::MoodRecord;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod csv_store;
pub mod memory;
pub mod mood_log;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for mood log reads and writes.
#[derive(Debug)]
pub enum StoreError {
    /// Store exists but its content cannot be parsed.
    ReadMalformed {
        path: PathBuf,
        line: Option<u64>,
        reason: String,
    },
    /// Store exists but could not be read.
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn malformed(
        path: impl Into<PathBuf>,
        line: Option<u64>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ReadMalformed {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReadMalformed { .. } => "store_read_malformed",
            Self::ReadFailed { .. } => "store_read_failed",
            Self::WriteFailed { .. } => "store_write_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadMalformed {
                path,
                line: Some(line),
                reason,
            } => write!(
                f,
                "mood log `{}` is malformed at line {line}: {reason}",
                path.display()
            ),
            Self::ReadMalformed {
                path,
                line: None,
                reason,
            } => write!(f, "mood log `{}` is malformed: {reason}", path.display()),
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read mood log `{}`: {source}", path.display())
            }
            Self::WriteFailed { path, source } => {
                write!(f, "failed to save mood log `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadMalformed { .. } => None,
            Self::ReadFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
        }
    }
}

/// Storage backend for mood records.
pub trait MoodStore {
    /// Reads all records in stored order. Absent storage yields `Ok(vec![])`.
    fn load_records(&self) -> StoreResult<Vec<MoodRecord>>;
    /// Replaces the stored records with `records`.
    fn save_records(&mut self, records: &[MoodRecord]) -> StoreResult<()>;
    /// Human-readable location for diagnostics.
    fn location(&self) -> String;
}

/// Keeps only the last record for each date, preserving the relative order
/// of the kept records. Returns the number of records dropped.
pub fn compact_by_date(records: &mut Vec<MoodRecord>) -> usize {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    let mut kept: Vec<MoodRecord> = records
        .iter()
        .rev()
        .filter(|record| seen.insert(record.date))
        .copied()
        .collect();
    kept.reverse();
    *records = kept;
    before - records.len()
}
