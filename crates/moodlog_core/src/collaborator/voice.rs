//! Voice mood input.
//!
//! # Responsibility
//! - Capture one bounded utterance and classify it into a mood.
//!
//! # Invariants
//! - A failed capture leaves the caller's current mood unchanged.
//! - Transcripts are never written to logs.

use crate::classifier::classify;
use crate::model::mood::MoodLabel;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

/// Default length of one voice capture.
pub const DEFAULT_CAPTURE_DURATION: Duration = Duration::from_secs(4);

/// One capture attempt produced no usable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    /// Audio was captured but contained no recognizable speech.
    NoSpeech,
    /// Background noise prevented recognition.
    AmbientNoise,
    /// Recognition backend could not be reached.
    ServiceUnreachable(String),
    Other(String),
}

impl RecognitionError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoSpeech => "no_speech",
            Self::AmbientNoise => "ambient_noise",
            Self::ServiceUnreachable(_) => "service_unreachable",
            Self::Other(_) => "other",
        }
    }
}

impl Display for RecognitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSpeech => write!(f, "could not understand the audio"),
            Self::AmbientNoise => write!(f, "too much background noise"),
            Self::ServiceUnreachable(details) => {
                write!(f, "speech service unreachable: {details}")
            }
            Self::Other(details) => write!(f, "speech recognition failed: {details}"),
        }
    }
}

impl Error for RecognitionError {}

/// Speech-recognition collaborator.
pub trait SpeechRecognizer {
    /// Captures audio for at most `duration` and returns recognized text.
    fn listen(&mut self, duration: Duration) -> Result<String, RecognitionError>;
}

/// Result of one voice capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceOutcome {
    /// Mood to show after the attempt. Equals the prior mood on failure.
    pub mood: MoodLabel,
    /// Lower-cased transcript on success.
    pub transcript: Option<String>,
    pub error: Option<RecognitionError>,
}

impl VoiceOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Listens once and classifies the transcript.
///
/// # Side effects
/// - Blocks for the recognizer's capture duration.
/// - Emits one `voice_capture` log event.
pub fn capture_voice_mood(
    recognizer: &mut dyn SpeechRecognizer,
    duration: Duration,
    current: MoodLabel,
) -> VoiceOutcome {
    let started_at = Instant::now();
    match recognizer.listen(duration) {
        Ok(text) => {
            let transcript = text.trim().to_lowercase();
            let mood = classify(&transcript);
            info!(
                "event=voice_capture module=voice status=ok duration_ms={} mood={}",
                started_at.elapsed().as_millis(),
                mood.name()
            );
            VoiceOutcome {
                mood,
                transcript: Some(transcript),
                error: None,
            }
        }
        Err(err) => {
            warn!(
                "event=voice_capture module=voice status=error duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            );
            VoiceOutcome {
                mood: current,
                transcript: None,
                error: Some(err),
            }
        }
    }
}
