//! Core domain logic for the mood tracker.
//! This crate owns the mood log, the free-text classifier and message
//! composition; UI and model backends plug in through collaborator traits.

pub mod classifier;
pub mod collaborator;
pub mod config;
pub mod logging;
pub mod message;
pub mod model;
pub mod service;
pub mod store;

pub use classifier::{classify, resolve_selection};
pub use collaborator::camera::{
    annotate_frame, CameraDevice, CameraError, CameraSession, CameraSummary, CancelToken,
    FaceDetector, Frame, FrameAnnotation, FrameSink, Region,
};
pub use collaborator::capability::{CameraKit, Capability, CapabilitySet, Collaborators};
pub use collaborator::voice::{
    capture_voice_mood, RecognitionError, SpeechRecognizer, VoiceOutcome,
};
pub use collaborator::{ServiceError, TextGenerator};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use message::composer::{build_prompt, ComposedMessage, MessageComposer, PrimarySource};
pub use message::quote_bank::{quotes, random_quote};
pub use model::mood::{MoodLabel, MoodRecord};
pub use service::mood_service::{
    Clock, FixedClock, MoodService, MoodServiceError, MoodServiceResult, SystemClock,
};
pub use store::csv_store::CsvMoodStore;
pub use store::memory::MemoryMoodStore;
pub use store::mood_log::MoodLog;
pub use store::{MoodStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
