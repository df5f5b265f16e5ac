//! Mood tracker use-case service.
//!
//! # Responsibility
//! - Resolve the effective mood from selector, text or voice input.
//! - Compose replies, save today's mood and serve the history window.
//! - Run the camera preview when that capability is present.
//!
//! # Invariants
//! - Collaborator failures degrade or report; they never abort the session.
//! - Saving uses the injected clock's date, so tests control "today".

use crate::classifier::resolve_selection;
use crate::collaborator::camera::{
    CameraError, CameraSession, CameraSummary, CancelToken, FrameSink,
};
use crate::collaborator::capability::{Capability, CapabilitySet, Collaborators};
use crate::collaborator::voice::{capture_voice_mood, VoiceOutcome};
use crate::config::{AppConfig, ConfigError};
use crate::message::composer::{ComposedMessage, MessageComposer};
use crate::model::mood::{MoodLabel, MoodRecord};
use crate::store::csv_store::CsvMoodStore;
use crate::store::mood_log::MoodLog;
use crate::store::{MoodStore, StoreError, StoreResult};
use chrono::{Local, NaiveDate};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Service-level error for session setup and capability-gated actions.
#[derive(Debug)]
pub enum MoodServiceError {
    Config(ConfigError),
    Store(StoreError),
    /// Requested action needs a capability that failed to initialize.
    Unavailable(Capability),
    Camera(CameraError),
}

impl Display for MoodServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Unavailable(capability) => write!(f, "{}", capability.degraded_notice()),
            Self::Camera(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MoodServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Unavailable(_) => None,
            Self::Camera(err) => Some(err),
        }
    }
}

impl From<ConfigError> for MoodServiceError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<StoreError> for MoodServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CameraError> for MoodServiceError {
    fn from(value: CameraError) -> Self {
        Self::Camera(value)
    }
}

pub type MoodServiceResult<T> = Result<T, MoodServiceError>;

/// One interactive session over a mood log.
pub struct MoodService<S: MoodStore = CsvMoodStore, C: Clock = SystemClock> {
    config: AppConfig,
    log: MoodLog<S>,
    collaborators: Collaborators,
    composer: MessageComposer,
    clock: C,
}

impl MoodService<CsvMoodStore, SystemClock> {
    /// Opens the CSV log named by `config.store_path`.
    ///
    /// # Errors
    /// - Invalid config, or a present but unreadable/malformed store.
    pub fn open(config: AppConfig, collaborators: Collaborators) -> MoodServiceResult<Self> {
        let store = CsvMoodStore::new(config.store_path.clone());
        Self::with_store(config, store, collaborators, SystemClock)
    }
}

impl<S: MoodStore, C: Clock> MoodService<S, C> {
    pub fn with_store(
        config: AppConfig,
        store: S,
        collaborators: Collaborators,
        clock: C,
    ) -> MoodServiceResult<Self> {
        config.validate()?;
        let log = MoodLog::load(store)?;
        for capability in collaborators.capabilities().missing() {
            warn!(
                "event=session_open module=service status=degraded capability={}",
                capability.as_str()
            );
        }
        Ok(Self {
            composer: MessageComposer::new(config.generation_max_length),
            config,
            log,
            collaborators,
            clock,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.collaborators.capabilities()
    }

    pub fn log(&self) -> &MoodLog<S> {
        &self.log
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Effective mood from the selector plus optional typed text.
    pub fn select(&self, selected: MoodLabel, typed_text: &str) -> MoodLabel {
        resolve_selection(selected, typed_text)
    }

    /// Builds the two-part reply for `mood`.
    pub fn compose_message(&self, mood: MoodLabel) -> ComposedMessage {
        self.composer.compose(mood, self.collaborators.generator())
    }

    /// Saves `mood` for today, replacing any earlier entry for today.
    pub fn save_mood(&mut self, mood: MoodLabel) -> StoreResult<MoodRecord> {
        let date = self.clock.today();
        self.save_mood_on(mood, date)
    }

    pub fn save_mood_on(&mut self, mood: MoodLabel, date: NaiveDate) -> StoreResult<MoodRecord> {
        self.log.record(mood, date)?;
        Ok(MoodRecord::new(date, mood))
    }

    /// Most recent records, bounded by the configured history window.
    pub fn history(&self) -> &[MoodRecord] {
        self.log.recent(self.config.history_window)
    }

    /// Listens once for a spoken mood.
    ///
    /// # Errors
    /// - `Unavailable(Voice)` when no recognizer was resolved. Recognition
    ///   failures are reported inside the returned outcome instead.
    pub fn capture_voice(&mut self, current: MoodLabel) -> MoodServiceResult<VoiceOutcome> {
        let duration = self.config.voice_capture;
        let recognizer = self
            .collaborators
            .recognizer_mut()
            .ok_or(MoodServiceError::Unavailable(Capability::Voice))?;
        Ok(capture_voice_mood(recognizer, duration, current))
    }

    /// Runs the camera preview until `cancel` fires or the frame bound hits.
    pub fn run_camera(
        &mut self,
        sink: &mut dyn FrameSink,
        cancel: &CancelToken,
    ) -> MoodServiceResult<CameraSummary> {
        let max_frames = self.config.camera_max_frames;
        let kit = self
            .collaborators
            .camera_mut()
            .ok_or(MoodServiceError::Unavailable(Capability::Camera))?;
        let summary = CameraSession::new(&mut *kit.device, &*kit.detector)
            .with_max_frames(max_frames)
            .run(sink, cancel)?;
        Ok(summary)
    }
}
