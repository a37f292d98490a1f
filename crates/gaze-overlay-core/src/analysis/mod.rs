//! Per-frame analysis: gaze classification and overlay composition.

mod classifier;
mod overlay;

pub use classifier::{GazeClassifier, DEFAULT_GAZE_THRESHOLD};
pub use overlay::{analyze_frame, OverlayConfig};
