//! Gaze Overlay Core - Landmark resolution and gaze classification
//!
//! This crate contains the domain types, the landmark accessor and eye resolver,
//! eye bounding boxes, the nine-zone gaze classifier, and the per-tick session
//! loop that drives an external landmark detector.

pub mod analysis;
pub mod domain;
pub mod landmarks;
pub mod ports;
pub mod session;

pub use analysis::{analyze_frame, GazeClassifier, OverlayConfig, DEFAULT_GAZE_THRESHOLD};
pub use domain::{
    DetectionResult, DrawInstruction, Eye, EyeBox, EyeReading, FaceRecord, Frame, FrameReport,
    GazeLabel, Keypoint, Point2D,
};
pub use landmarks::{eye_box, point_at, point_by_name, resolve_eye, DEFAULT_EYE_BOX_HEIGHT_RATIO};
pub use ports::{Detector, FrameOutput, SessionEvent, SessionSink, Tick, TickSource};
pub use session::{Session, SessionHandle, SessionState, SessionSummary};
