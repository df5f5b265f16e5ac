//! Application configuration.
//!
//! # Responsibility
//! - Carry the tunables the applet needs: store location, history window,
//!   collaborator limits and logging setup.
//! - Validate values before any component is built from them.
//!
//! # Invariants
//! - `AppConfig::default()` always validates.

use crate::collaborator::voice::DEFAULT_CAPTURE_DURATION;
use crate::logging::default_log_level;
use crate::message::composer::DEFAULT_GENERATION_MAX_LENGTH;
use crate::store::csv_store::DEFAULT_STORE_FILE_NAME;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Number of records shown in the history view.
pub const DEFAULT_HISTORY_WINDOW: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// CSV mood log location.
    pub store_path: PathBuf,
    /// How many recent records the history view shows.
    pub history_window: usize,
    /// Length of one voice capture.
    pub voice_capture: Duration,
    /// Max output length requested from the text generator.
    pub generation_max_length: usize,
    /// Optional frame bound for camera sessions; `None` runs until cancelled.
    pub camera_max_frames: Option<usize>,
    /// `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE_NAME),
            history_window: DEFAULT_HISTORY_WINDOW,
            voice_capture: DEFAULT_CAPTURE_DURATION,
            generation_max_length: DEFAULT_GENERATION_MAX_LENGTH,
            camera_max_frames: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Default config with a custom store path.
    pub fn with_store_path(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStorePath);
        }
        if self.history_window == 0 {
            return Err(ConfigError::ZeroHistoryWindow);
        }
        if self.voice_capture.is_zero() {
            return Err(ConfigError::ZeroCaptureDuration);
        }
        if self.generation_max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        if self.camera_max_frames == Some(0) {
            return Err(ConfigError::ZeroCameraFrames);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyStorePath,
    ZeroHistoryWindow,
    ZeroCaptureDuration,
    ZeroMaxLength,
    ZeroCameraFrames,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorePath => write!(f, "store path must not be empty"),
            Self::ZeroHistoryWindow => write!(f, "history window must be at least 1"),
            Self::ZeroCaptureDuration => write!(f, "voice capture duration must be positive"),
            Self::ZeroMaxLength => write!(f, "generation max length must be at least 1"),
            Self::ZeroCameraFrames => write!(f, "camera frame bound must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
