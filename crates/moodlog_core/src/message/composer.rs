//! Two-part reply composition.
//!
//! # Responsibility
//! - Ask the generation collaborator for one short message when available.
//! - Fall back to the quote bank when generation is absent or fails.
//!
//! # Invariants
//! - At most one generation call per `compose`.
//! - `secondary` is always drawn from the quote bank, independently.

use super::quote_bank::random_quote_with;
use crate::collaborator::TextGenerator;
use crate::model::mood::MoodLabel;
use log::{debug, warn};
use rand::Rng;

/// Default max output length passed to the generator.
pub const DEFAULT_GENERATION_MAX_LENGTH: usize = 40;

/// Where the primary message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimarySource {
    Generated,
    /// No generator was supplied.
    QuoteBank,
    /// Generator was supplied but failed or returned blank text.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub primary: String,
    pub secondary: String,
    pub source: PrimarySource,
}

/// Builds the generation prompt for `mood`.
pub fn build_prompt(mood: MoodLabel) -> String {
    format!(
        "The user feels {}. Write one short gentle motivational sentence:",
        mood.display()
    )
}

/// Stateless reply composer.
#[derive(Debug, Clone, Copy)]
pub struct MessageComposer {
    max_length: usize,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATION_MAX_LENGTH)
    }
}

impl MessageComposer {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Composes a reply using the thread RNG for quote selection.
    pub fn compose(
        &self,
        mood: MoodLabel,
        generator: Option<&dyn TextGenerator>,
    ) -> ComposedMessage {
        self.compose_with(mood, generator, &mut rand::thread_rng())
    }

    /// Composes a reply with a caller-supplied RNG.
    pub fn compose_with<R: Rng + ?Sized>(
        &self,
        mood: MoodLabel,
        generator: Option<&dyn TextGenerator>,
        rng: &mut R,
    ) -> ComposedMessage {
        let (primary, source) = match generator {
            None => (random_quote_with(rng).to_string(), PrimarySource::QuoteBank),
            Some(generator) => match generator.generate(&build_prompt(mood), self.max_length) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(
                        "event=message_generate module=message status=ok mood={}",
                        mood.name()
                    );
                    (text.trim().to_string(), PrimarySource::Generated)
                }
                Ok(_) => {
                    warn!(
                        "event=message_generate module=message status=degraded mood={} error_code=empty_output",
                        mood.name()
                    );
                    (random_quote_with(rng).to_string(), PrimarySource::Fallback)
                }
                Err(err) => {
                    warn!(
                        "event=message_generate module=message status=degraded mood={} error={}",
                        mood.name(),
                        err
                    );
                    (random_quote_with(rng).to_string(), PrimarySource::Fallback)
                }
            },
        };

        ComposedMessage {
            primary,
            secondary: random_quote_with(rng).to_string(),
            source,
        }
    }
}
