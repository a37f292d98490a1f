//! Core domain types for eye and gaze overlay analysis.

mod detection;
mod gaze;
mod geometry;
mod report;

pub use detection::{DetectionResult, FaceRecord, Keypoint, MeshEntry};
pub use gaze::{Eye, GazeLabel, NOT_DETECTED};
pub use geometry::{EyeBox, Point2D};
pub use report::{DrawInstruction, EyeReading, Frame, FrameReport};
