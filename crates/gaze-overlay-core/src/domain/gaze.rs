//! Eyes and gaze-zone labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown in place of a coordinate or label that could not be derived.
pub const NOT_DETECTED: &str = "Not detected";

/// A logical eye, from the subject's point of view as labeled by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eye {
    /// The detector's left eye.
    Left,
    /// The detector's right eye.
    Right,
}

impl Eye {
    /// Both eyes, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Keypoint name of the iris center for this eye.
    #[must_use]
    pub const fn iris_name(self) -> &'static str {
        match self {
            Self::Left => "leftIris",
            Self::Right => "rightIris",
        }
    }

    /// Keypoint name of the eye center for this eye.
    #[must_use]
    pub const fn eye_name(self) -> &'static str {
        match self {
            Self::Left => "leftEye",
            Self::Right => "rightEye",
        }
    }
}

/// Coarse nine-zone gaze direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GazeLabel {
    /// Within the threshold of the frame center on both axes.
    #[serde(rename = "Center")]
    Center,
    /// Up and to the left.
    #[serde(rename = "Top Left")]
    TopLeft,
    /// Up and to the right.
    #[serde(rename = "Top Right")]
    TopRight,
    /// Down and to the left.
    #[serde(rename = "Bottom Left")]
    BottomLeft,
    /// Down and to the right.
    #[serde(rename = "Bottom Right")]
    BottomRight,
    /// Left only.
    #[serde(rename = "Left")]
    Left,
    /// Right only.
    #[serde(rename = "Right")]
    Right,
    /// Up only.
    #[serde(rename = "Top")]
    Top,
    /// Down only.
    #[serde(rename = "Bottom")]
    Bottom,
}

impl GazeLabel {
    /// Display string of the label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "Center",
            Self::TopLeft => "Top Left",
            Self::TopRight => "Top Right",
            Self::BottomLeft => "Bottom Left",
            Self::BottomRight => "Bottom Right",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }

    /// Display string for an optional label, `"Not detected"` when absent.
    #[must_use]
    pub const fn text(label: Option<Self>) -> &'static str {
        match label {
            Some(label) => label.as_str(),
            None => NOT_DETECTED,
        }
    }
}

impl fmt::Display for GazeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
