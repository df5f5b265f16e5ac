//! CSV file backend for the mood log.
//!
//! # Responsibility
//! - Read and write the `Date,Mood` table.
//! - Distinguish an absent file from an unreadable or malformed one.
//!
//! # Invariants
//! - Header is exactly `Date,Mood`.
//! - Dates are ISO 8601 `YYYY-MM-DD`; moods are label display strings.
//! - Writes go through a sibling temp file renamed over the target; an
//!   existing file keeps its permissions.

use super::{MoodStore, StoreError, StoreResult};
use crate::model::mood::{MoodLabel, MoodRecord};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_FILE_NAME: &str = "mood_log.csv";

const DATE_FORMAT: &str = "%Y-%m-%d";
const HEADER_DATE: &str = "Date";
const HEADER_MOOD: &str = "Mood";

#[derive(Debug, Serialize, Deserialize)]
struct StoredRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Mood")]
    mood: String,
}

/// Mood store persisted as a CSV file.
#[derive(Debug, Clone)]
pub struct CsvMoodStore {
    path: PathBuf,
}

impl CsvMoodStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_failed(&self, source: io::Error) -> StoreError {
        StoreError::ReadFailed {
            path: self.path.clone(),
            source,
        }
    }

    fn write_failed(&self, source: io::Error) -> StoreError {
        StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }

    fn map_csv_read_error(&self, err: csv::Error) -> StoreError {
        let line = err.position().map(|position| position.line());
        match err.into_kind() {
            csv::ErrorKind::Io(source) => self.read_failed(source),
            csv::ErrorKind::Utf8 { err, .. } => {
                StoreError::malformed(&self.path, line, format!("invalid UTF-8: {err}"))
            }
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => StoreError::malformed(
                &self.path,
                line,
                format!("expected {expected_len} fields, found {len}"),
            ),
            other => StoreError::malformed(&self.path, line, format!("{other:?}")),
        }
    }

    fn parse_row(&self, record: &StringRecord, headers: &StringRecord) -> StoreResult<MoodRecord> {
        let line = record.position().map(|position| position.line());
        let row: StoredRow = record
            .deserialize(Some(headers))
            .map_err(|err| StoreError::malformed(&self.path, line, err.to_string()))?;

        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|_| {
            StoreError::malformed(
                &self.path,
                line,
                format!("invalid date `{}` (expected YYYY-MM-DD)", row.date),
            )
        })?;
        let mood = MoodLabel::parse_display(&row.mood).ok_or_else(|| {
            StoreError::malformed(&self.path, line, format!("unknown mood `{}`", row.mood))
        })?;

        Ok(MoodRecord::new(date, mood))
    }

    fn read_file(&self, file: File) -> StoreResult<Vec<MoodRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|err| self.map_csv_read_error(err))?
            .clone();
        if headers.len() != 2
            || headers.get(0) != Some(HEADER_DATE)
            || headers.get(1) != Some(HEADER_MOOD)
        {
            return Err(StoreError::malformed(
                &self.path,
                Some(1),
                format!(
                    "expected header `{HEADER_DATE},{HEADER_MOOD}`, found `{}`",
                    headers.iter().collect::<Vec<_>>().join(",")
                ),
            ));
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|err| self.map_csv_read_error(err))?;
            records.push(self.parse_row(&record, &headers)?);
        }
        Ok(records)
    }

    fn write_file(&self, records: &[MoodRecord]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());
            writer.write_record([HEADER_DATE, HEADER_MOOD])?;
            for record in records {
                writer.serialize(StoredRow {
                    date: record.date.format(DATE_FORMAT).to_string(),
                    mood: record.mood.display().to_string(),
                })?;
            }
            writer.flush()?;
        }
        temp.as_file_mut().flush()?;
        temp.as_file().sync_all()?;
        // Replacing the file must not reset its mode to the temp file's 0600.
        match fs::metadata(&self.path) {
            Ok(metadata) => temp.as_file().set_permissions(metadata.permissions())?,
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl MoodStore for CsvMoodStore {
    fn load_records(&self) -> StoreResult<Vec<MoodRecord>> {
        let started_at = Instant::now();
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok mode=absent path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=store_read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(self.read_failed(err));
            }
        };

        match self.read_file(file) {
            Ok(records) => {
                info!(
                    "event=store_load module=store status=ok mode=file duration_ms={} rows={}",
                    started_at.elapsed().as_millis(),
                    records.len()
                );
                Ok(records)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save_records(&mut self, records: &[MoodRecord]) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.write_file(records) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok duration_ms={} rows={}",
                    started_at.elapsed().as_millis(),
                    records.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error duration_ms={} error_code=store_write_failed path={} error={}",
                    started_at.elapsed().as_millis(),
                    self.path.display(),
                    err
                );
                Err(self.write_failed(err))
            }
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::CsvMoodStore;
    use crate::model::mood::{MoodLabel, MoodRecord};
    use crate::store::{MoodStore, StoreError};
    use chrono::NaiveDate;

    #[test]
    fn writes_header_and_display_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.csv");
        let mut store = CsvMoodStore::new(&path);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        store
            .save_records(&[MoodRecord::new(date, MoodLabel::Happy)])
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Date,Mood\n2025-01-01,😊 Happy\n");
    }

    #[test]
    fn empty_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.csv");
        std::fs::write(&path, "").unwrap();

        let err = CsvMoodStore::new(&path).load_records().unwrap_err();
        assert!(matches!(err, StoreError::ReadMalformed { .. }));
    }

    #[test]
    fn header_only_file_is_an_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mood_log.csv");
        std::fs::write(&path, "Date,Mood\n").unwrap();

        let records = CsvMoodStore::new(&path).load_records().unwrap();
        assert!(records.is_empty());
    }
}
