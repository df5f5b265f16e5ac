//! Optional collaborator capabilities resolved once at startup.
//!
//! # Responsibility
//! - Name the external capabilities the applet can run without.
//! - Hold collaborator handles that initialized successfully.
//!
//! # Invariants
//! - Each capability is attempted exactly once, in `Collaborators::resolve`.
//! - An initialization failure degrades the capability; it is never fatal.

use super::camera::{CameraDevice, FaceDetector};
use super::voice::SpeechRecognizer;
use super::{ServiceError, TextGenerator};
use log::{info, warn};
use std::collections::BTreeSet;

/// External capability the core can degrade without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    Generation,
    Voice,
    Camera,
}

impl Capability {
    pub const ALL: [Capability; 3] = [Self::Generation, Self::Voice, Self::Camera];

    /// Stable string id used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generation => "generation",
            Self::Voice => "voice",
            Self::Camera => "camera",
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Generation => "Generate a short motivational message for the selected mood.",
            Self::Voice => "Describe your mood by voice instead of typing.",
            Self::Camera => "Show a live camera preview with smile detection.",
        }
    }

    /// Notice shown when the capability failed to initialize.
    pub fn degraded_notice(self) -> &'static str {
        match self {
            Self::Generation => "AI text generator not available, using backup quotes.",
            Self::Voice => "Voice input not available.",
            Self::Camera => "Camera not available.",
        }
    }
}

/// Set of capabilities that initialized successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    available: BTreeSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, capability: Capability) {
        self.available.insert(capability);
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.available.contains(&capability)
    }

    /// Capabilities that are not available, in declaration order.
    pub fn missing(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| !self.contains(*capability))
            .collect()
    }
}

/// Camera device plus detector, available only as a pair.
pub struct CameraKit {
    pub device: Box<dyn CameraDevice>,
    pub detector: Box<dyn FaceDetector>,
}

/// Collaborator handles resolved at startup.
///
/// Handles are passed down to the components that need them instead of
/// being read from global state.
#[derive(Default)]
pub struct Collaborators {
    generator: Option<Box<dyn TextGenerator>>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    camera: Option<CameraKit>,
}

impl Collaborators {
    /// Collaborators with every capability unavailable.
    pub fn none() -> Self {
        Self::default()
    }

    /// Attempts each initializer once and keeps the handles that succeed.
    ///
    /// # Side effects
    /// - Emits `capability_init` log events per capability.
    pub fn resolve<G, V, C>(generation: G, voice: V, camera: C) -> Self
    where
        G: FnOnce() -> Result<Box<dyn TextGenerator>, ServiceError>,
        V: FnOnce() -> Result<Box<dyn SpeechRecognizer>, ServiceError>,
        C: FnOnce() -> Result<CameraKit, ServiceError>,
    {
        Self {
            generator: settle(Capability::Generation, generation()),
            recognizer: settle(Capability::Voice, voice()),
            camera: settle(Capability::Camera, camera()),
        }
    }

    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_camera(mut self, camera: CameraKit) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn capabilities(&self) -> CapabilitySet {
        let mut set = CapabilitySet::new();
        if self.generator.is_some() {
            set.insert(Capability::Generation);
        }
        if self.recognizer.is_some() {
            set.insert(Capability::Voice);
        }
        if self.camera.is_some() {
            set.insert(Capability::Camera);
        }
        set
    }

    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }

    pub fn recognizer_mut(&mut self) -> Option<&mut (dyn SpeechRecognizer + 'static)> {
        self.recognizer.as_deref_mut()
    }

    pub fn camera_mut(&mut self) -> Option<&mut CameraKit> {
        self.camera.as_mut()
    }
}

fn settle<T>(capability: Capability, result: Result<T, ServiceError>) -> Option<T> {
    match result {
        Ok(handle) => {
            info!(
                "event=capability_init module=collaborator status=ok capability={}",
                capability.as_str()
            );
            Some(handle)
        }
        Err(err) => {
            warn!(
                "event=capability_init module=collaborator status=degraded capability={} error={}",
                capability.as_str(),
                err
            );
            None
        }
    }
}
