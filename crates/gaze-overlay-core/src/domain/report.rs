//! Per-frame overlay output types.

use serde::{Deserialize, Serialize};

use super::{GazeLabel, Point2D, NOT_DETECTED};

/// A logical video frame handed to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Zero-based position in the session.
    pub index: u64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl Frame {
    /// Creates a new frame descriptor.
    #[must_use]
    pub const fn new(index: u64, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
        }
    }

    /// Returns true once the frame has usable dimensions.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Center of the frame.
    #[must_use]
    pub fn center(&self) -> Point2D {
        Point2D::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// A single overlay draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawInstruction {
    /// Filled circle.
    Point {
        /// Center x.
        x: f64,
        /// Center y.
        y: f64,
        /// CSS color string.
        color: String,
        /// Radius in pixels.
        size: f64,
    },
    /// Closed outline through landmark points.
    Contour {
        /// Outline vertices in index-set order.
        points: Vec<Point2D>,
        /// CSS color string.
        color: String,
        /// Stroke width in pixels.
        line_width: f64,
    },
    /// Stroked rectangle.
    Box {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Rectangle width.
        width: f64,
        /// Rectangle height.
        height: f64,
        /// CSS color string.
        color: String,
        /// Stroke width in pixels.
        line_width: f64,
    },
}

/// Resolved position of one eye and its display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeReading {
    /// Resolved position, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point2D>,
    /// `"X: <x>, Y: <y>"` with rounded coordinates, or `"Not detected"`.
    pub text: String,
}

impl EyeReading {
    /// Reading for a resolved eye.
    #[must_use]
    pub fn at(position: Point2D) -> Self {
        Self {
            position: Some(position),
            text: format!(
                "X: {}, Y: {}",
                round_half_up(position.x),
                round_half_up(position.y)
            ),
        }
    }

    /// Reading for an eye that could not be resolved.
    #[must_use]
    pub fn not_detected() -> Self {
        Self {
            position: None,
            text: NOT_DETECTED.to_string(),
        }
    }
}

/// Overlay output for one processed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Index of the frame this report belongs to.
    pub frame: u64,
    /// Whether the detector returned at least one face.
    pub face_detected: bool,
    /// Left eye reading.
    pub left_eye: EyeReading,
    /// Right eye reading.
    pub right_eye: EyeReading,
    /// Gaze zone, absent unless both eyes resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaze: Option<GazeLabel>,
    /// Gaze zone text, `"Not detected"` when absent.
    pub gaze_text: String,
    /// Draw calls in paint order.
    pub draw: Vec<DrawInstruction>,
}

impl FrameReport {
    /// Report for a frame in which nothing was detected.
    #[must_use]
    pub fn not_detected(frame: u64) -> Self {
        Self {
            frame,
            face_detected: false,
            left_eye: EyeReading::not_detected(),
            right_eye: EyeReading::not_detected(),
            gaze: None,
            gaze_text: GazeLabel::text(None).to_string(),
            draw: Vec::new(),
        }
    }
}

/// Rounds half-way values up, toward positive infinity.
#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
