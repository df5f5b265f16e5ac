//! External collaborator contracts.
//!
//! # Responsibility
//! - Define narrow call/response interfaces for text generation, speech
//!   recognition and camera vision.
//! - Resolve collaborator availability once and pass handles down explicitly.
//!
//! # Invariants
//! - Collaborator internals (models, devices) never leak into core types.
//! - A collaborator failure is converted at the point of use into a fallback
//!   or a user-visible message.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod camera;
pub mod capability;
pub mod voice;

use capability::Capability;

/// Failure reported by an external service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Collaborator failed to initialize or is not installed.
    Unavailable {
        capability: Capability,
        reason: String,
    },
    /// One call to an initialized collaborator failed.
    Failed(String),
}

impl ServiceError {
    pub fn unavailable(capability: Capability, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            capability,
            reason: reason.into(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { capability, reason } => {
                write!(f, "{} service unavailable: {reason}", capability.as_str())
            }
            Self::Failed(message) => write!(f, "service call failed: {message}"),
        }
    }
}

impl Error for ServiceError {}

/// Text-generation collaborator.
///
/// Blocking. Any timeout belongs to the implementation.
pub trait TextGenerator {
    /// Generates text continuing `prompt`, bounded by `max_length` tokens.
    fn generate(&self, prompt: &str, max_length: usize) -> Result<String, ServiceError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str, usize) -> Result<String, ServiceError>,
{
    fn generate(&self, prompt: &str, max_length: usize) -> Result<String, ServiceError> {
        self(prompt, max_length)
    }
}
