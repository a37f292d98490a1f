//! Nine-zone gaze classification.

use serde::{Deserialize, Serialize};

use crate::domain::{GazeLabel, Point2D};

/// Default dead zone around the frame center, in pixels.
pub const DEFAULT_GAZE_THRESHOLD: f64 = 50.0;

/// Maps the midpoint of both eyes onto a coarse gaze zone.
///
/// The threshold is an absolute pixel distance and does not scale with the
/// frame size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazeClassifier {
    /// Dead-zone half width in pixels.
    pub threshold: f64,
}

impl Default for GazeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_GAZE_THRESHOLD)
    }
}

impl GazeClassifier {
    /// Creates a classifier with the given threshold.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Classifies the eye midpoint relative to the frame center.
    ///
    /// Zones are tested in a fixed order: center, the four diagonals, the
    /// two horizontal sides, then the two vertical sides. Anything left over
    /// (a point sitting exactly on a threshold boundary) is `Center`.
    #[must_use]
    pub fn classify(
        &self,
        left: Point2D,
        right: Point2D,
        frame_width: f64,
        frame_height: f64,
    ) -> GazeLabel {
        let avg = left.midpoint(right);
        let dx = avg.x - frame_width / 2.0;
        let dy = avg.y - frame_height / 2.0;
        let t = self.threshold;

        let left_of = dx < -t;
        let right_of = dx > t;
        let above = dy < -t;
        let below = dy > t;

        if dx.abs() < t && dy.abs() < t {
            GazeLabel::Center
        } else if left_of && above {
            GazeLabel::TopLeft
        } else if right_of && above {
            GazeLabel::TopRight
        } else if left_of && below {
            GazeLabel::BottomLeft
        } else if right_of && below {
            GazeLabel::BottomRight
        } else if left_of {
            GazeLabel::Left
        } else if right_of {
            GazeLabel::Right
        } else if above {
            GazeLabel::Top
        } else if below {
            GazeLabel::Bottom
        } else {
            GazeLabel::Center
        }
    }
}
