//! Camera preview session with smile detection.
//!
//! # Responsibility
//! - Run a bounded, cancellable frame loop over an injected camera device.
//! - Label each detected face `Happy` or `Neutral` from smile detection.
//!
//! # Invariants
//! - The device is released on every exit path, including errors.
//! - The cancel token is checked once per loop iteration.
//! - The session does not write to the mood log.

use crate::model::mood::MoodLabel;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Axis-aligned rectangle in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns whether `other` lies fully inside this region.
    pub fn contains(&self, other: &Region) -> bool {
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        other.x >= self.x
            && other.y >= self.y
            && u64::from(other.x) + u64::from(other.width) <= right
            && u64::from(other.y) + u64::from(other.height) <= bottom
    }
}

/// One captured image. Pixel layout is owned by the device implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Overlay for one detected face: bounding box plus label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAnnotation {
    pub region: Region,
    pub label: MoodLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    OpenFailed(String),
    FrameFailed(String),
    DetectionFailed(String),
    DisplayFailed(String),
}

impl Display for CameraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenFailed(details) => write!(f, "failed to open camera: {details}"),
            Self::FrameFailed(details) => write!(f, "failed to read camera frame: {details}"),
            Self::DetectionFailed(details) => write!(f, "face detection failed: {details}"),
            Self::DisplayFailed(details) => write!(f, "failed to display frame: {details}"),
        }
    }
}

impl Error for CameraError {}

/// Camera device collaborator.
pub trait CameraDevice {
    fn open(&mut self) -> Result<(), CameraError>;
    /// Returns `Ok(None)` when the stream has ended.
    fn read_frame(&mut self) -> Result<Option<Frame>, CameraError>;
    /// Releases the device. Must be safe to call after a failed `open`.
    fn release(&mut self);
}

/// Face and smile cascade collaborator.
pub trait FaceDetector {
    fn detect_faces(&self, frame: &Frame) -> Result<Vec<Region>, CameraError>;
    /// Detects smiles inside `face`; returned regions use frame coordinates.
    fn detect_smiles(&self, frame: &Frame, face: Region) -> Result<Vec<Region>, CameraError>;
}

/// Live preview output.
pub trait FrameSink {
    fn show(&mut self, frame: &Frame, annotations: &[FrameAnnotation]) -> Result<(), CameraError>;
}

/// Shared stop signal for a running session.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Counters for one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraSummary {
    pub frames: usize,
    /// Frames where at least one face was labeled `Happy`.
    pub happy_frames: usize,
    pub cancelled: bool,
}

/// Labels every detected face in `frame`.
pub fn annotate_frame(
    detector: &dyn FaceDetector,
    frame: &Frame,
) -> Result<Vec<FrameAnnotation>, CameraError> {
    let faces = detector.detect_faces(frame)?;
    let mut annotations = Vec::with_capacity(faces.len());
    for face in faces {
        let smiles = detector.detect_smiles(frame, face)?;
        let label = if smiles.iter().any(|smile| face.contains(smile)) {
            MoodLabel::Happy
        } else {
            MoodLabel::Neutral
        };
        annotations.push(FrameAnnotation {
            region: face,
            label,
        });
    }
    Ok(annotations)
}

struct DeviceGuard<'a> {
    device: &'a mut dyn CameraDevice,
}

impl Drop for DeviceGuard<'_> {
    fn drop(&mut self) {
        self.device.release();
        info!("event=camera_release module=camera status=ok");
    }
}

/// Scoped camera preview session.
pub struct CameraSession<'a> {
    device: &'a mut dyn CameraDevice,
    detector: &'a dyn FaceDetector,
    max_frames: Option<usize>,
}

impl<'a> CameraSession<'a> {
    pub fn new(device: &'a mut dyn CameraDevice, detector: &'a dyn FaceDetector) -> Self {
        Self {
            device,
            detector,
            max_frames: None,
        }
    }

    /// Stops the loop after `max_frames` frames even without cancellation.
    pub fn with_max_frames(mut self, max_frames: Option<usize>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Runs the preview loop until cancelled, bounded, or the stream ends.
    ///
    /// # Errors
    /// - Returns the first device, detector or sink error; the device is
    ///   still released.
    pub fn run(
        self,
        sink: &mut dyn FrameSink,
        cancel: &CancelToken,
    ) -> Result<CameraSummary, CameraError> {
        let started_at = Instant::now();
        let detector = self.detector;
        let max_frames = self.max_frames;
        let guard = DeviceGuard {
            device: self.device,
        };

        let result = run_loop(guard, detector, max_frames, sink, cancel);
        match &result {
            Ok(summary) => info!(
                "event=camera_session module=camera status=ok duration_ms={} frames={} happy_frames={} cancelled={}",
                started_at.elapsed().as_millis(),
                summary.frames,
                summary.happy_frames,
                summary.cancelled
            ),
            Err(err) => error!(
                "event=camera_session module=camera status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn run_loop(
    mut guard: DeviceGuard<'_>,
    detector: &dyn FaceDetector,
    max_frames: Option<usize>,
    sink: &mut dyn FrameSink,
    cancel: &CancelToken,
) -> Result<CameraSummary, CameraError> {
    guard.device.open()?;

    let mut summary = CameraSummary::default();
    loop {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        if max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }
        let Some(frame) = guard.device.read_frame()? else {
            break;
        };
        let annotations = annotate_frame(detector, &frame)?;
        if annotations
            .iter()
            .any(|annotation| annotation.label == MoodLabel::Happy)
        {
            summary.happy_frames += 1;
        }
        sink.show(&frame, &annotations)?;
        summary.frames += 1;
    }
    Ok(summary)
}
