use moodlog_core::{
    annotate_frame, CameraDevice, CameraError, CameraSession, CancelToken, FaceDetector, Frame,
    FrameAnnotation, FrameSink, MoodLabel, Region,
};
use std::cell::Cell;
use std::rc::Rc;

struct FakeCamera {
    frames_left: Option<usize>,
    fail_open: bool,
    fail_at: Option<usize>,
    read: usize,
    released: Rc<Cell<usize>>,
}

impl FakeCamera {
    fn endless(released: Rc<Cell<usize>>) -> Self {
        Self {
            frames_left: None,
            fail_open: false,
            fail_at: None,
            read: 0,
            released,
        }
    }
}

impl CameraDevice for FakeCamera {
    fn open(&mut self) -> Result<(), CameraError> {
        if self.fail_open {
            return Err(CameraError::OpenFailed("busy".to_string()));
        }
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, CameraError> {
        if self.fail_at == Some(self.read) {
            return Err(CameraError::FrameFailed("unplugged".to_string()));
        }
        if let Some(left) = self.frames_left.as_mut() {
            if *left == 0 {
                return Ok(None);
            }
            *left -= 1;
        }
        self.read += 1;
        Ok(Some(Frame {
            width: 640,
            height: 480,
            // Odd frames carry a smile.
            data: vec![(self.read % 2) as u8],
        }))
    }

    fn release(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// One face per frame; smiles when the frame's first byte is 1.
struct FakeDetector;

impl FaceDetector for FakeDetector {
    fn detect_faces(&self, _frame: &Frame) -> Result<Vec<Region>, CameraError> {
        Ok(vec![Region::new(100, 100, 200, 200)])
    }

    fn detect_smiles(&self, frame: &Frame, face: Region) -> Result<Vec<Region>, CameraError> {
        if frame.data.first() == Some(&1) {
            Ok(vec![Region::new(face.x + 50, face.y + 120, 100, 40)])
        } else {
            Ok(vec![])
        }
    }
}

#[derive(Default)]
struct CollectingSink {
    shown: Vec<Vec<FrameAnnotation>>,
    cancel_after: Option<(usize, CancelToken)>,
}

impl FrameSink for CollectingSink {
    fn show(&mut self, _frame: &Frame, annotations: &[FrameAnnotation]) -> Result<(), CameraError> {
        self.shown.push(annotations.to_vec());
        if let Some((after, token)) = &self.cancel_after {
            if self.shown.len() >= *after {
                token.cancel();
            }
        }
        Ok(())
    }
}

#[test]
fn smile_inside_face_is_happy_otherwise_neutral() {
    let detector = FakeDetector;
    let smiling = Frame {
        width: 1,
        height: 1,
        data: vec![1],
    };
    let plain = Frame {
        width: 1,
        height: 1,
        data: vec![0],
    };

    let happy = annotate_frame(&detector, &smiling).unwrap();
    assert_eq!(happy.len(), 1);
    assert_eq!(happy[0].label, MoodLabel::Happy);
    assert_eq!(happy[0].region, Region::new(100, 100, 200, 200));

    let neutral = annotate_frame(&detector, &plain).unwrap();
    assert_eq!(neutral[0].label, MoodLabel::Neutral);
}

#[test]
fn smile_outside_face_region_does_not_count() {
    struct StraySmile;
    impl FaceDetector for StraySmile {
        fn detect_faces(&self, _frame: &Frame) -> Result<Vec<Region>, CameraError> {
            Ok(vec![Region::new(0, 0, 50, 50)])
        }
        fn detect_smiles(&self, _frame: &Frame, _face: Region) -> Result<Vec<Region>, CameraError> {
            Ok(vec![Region::new(300, 300, 20, 10)])
        }
    }

    let frame = Frame {
        width: 1,
        height: 1,
        data: vec![],
    };
    let annotations = annotate_frame(&StraySmile, &frame).unwrap();
    assert_eq!(annotations[0].label, MoodLabel::Neutral);
}

#[test]
fn cancel_stops_the_loop_and_releases_device() {
    let released = Rc::new(Cell::new(0));
    let mut camera = FakeCamera::endless(released.clone());
    let cancel = CancelToken::new();
    let mut sink = CollectingSink {
        cancel_after: Some((3, cancel.clone())),
        ..CollectingSink::default()
    };

    let summary = CameraSession::new(&mut camera, &FakeDetector)
        .run(&mut sink, &cancel)
        .unwrap();

    assert_eq!(summary.frames, 3);
    assert_eq!(summary.happy_frames, 2);
    assert!(summary.cancelled);
    assert_eq!(sink.shown.len(), 3);
    assert_eq!(released.get(), 1);
}

#[test]
fn pre_cancelled_session_reads_no_frames() {
    let released = Rc::new(Cell::new(0));
    let mut camera = FakeCamera::endless(released.clone());
    let cancel = CancelToken::new();
    cancel.cancel();

    let summary = CameraSession::new(&mut camera, &FakeDetector)
        .run(&mut CollectingSink::default(), &cancel)
        .unwrap();

    assert_eq!(summary.frames, 0);
    assert!(summary.cancelled);
    assert_eq!(released.get(), 1);
}

#[test]
fn frame_bound_stops_without_cancel() {
    let released = Rc::new(Cell::new(0));
    let mut camera = FakeCamera::endless(released.clone());

    let summary = CameraSession::new(&mut camera, &FakeDetector)
        .with_max_frames(Some(5))
        .run(&mut CollectingSink::default(), &CancelToken::new())
        .unwrap();

    assert_eq!(summary.frames, 5);
    assert!(!summary.cancelled);
    assert_eq!(released.get(), 1);
}

#[test]
fn end_of_stream_finishes_cleanly() {
    let released = Rc::new(Cell::new(0));
    let mut camera = FakeCamera {
        frames_left: Some(2),
        ..FakeCamera::endless(released.clone())
    };

    let summary = CameraSession::new(&mut camera, &FakeDetector)
        .run(&mut CollectingSink::default(), &CancelToken::new())
        .unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(released.get(), 1);
}

#[test]
fn device_is_released_on_open_and_frame_errors() {
    let released = Rc::new(Cell::new(0));
    let mut camera = FakeCamera {
        fail_open: true,
        ..FakeCamera::endless(released.clone())
    };
    let err = CameraSession::new(&mut camera, &FakeDetector)
        .run(&mut CollectingSink::default(), &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, CameraError::OpenFailed(_)));
    assert_eq!(released.get(), 1);

    let mut camera = FakeCamera {
        fail_at: Some(2),
        ..FakeCamera::endless(released.clone())
    };
    let mut sink = CollectingSink::default();
    let err = CameraSession::new(&mut camera, &FakeDetector)
        .run(&mut sink, &CancelToken::new())
        .unwrap_err();
    assert!(matches!(err, CameraError::FrameFailed(_)));
    assert_eq!(sink.shown.len(), 2);
    assert_eq!(released.get(), 2);
}
