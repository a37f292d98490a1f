//! Landmark detector port.

use crate::domain::{DetectionResult, Frame};

/// Port for an external face-landmark estimator.
pub trait Detector: Send + Sync {
    /// Estimates face landmarks for `frame`.
    ///
    /// Returns zero or more faces; callers use only the first.
    ///
    /// # Errors
    ///
    /// Returns an error if estimation fails for this frame. A failure is
    /// local to the frame; later frames may succeed.
    fn estimate_faces(&self, frame: &Frame) -> anyhow::Result<Vec<DetectionResult>>;
}
