//! Overlay composition for one frame.
//!
//! Combines the eye resolver, the box calculator and the classifier into a
//! [`FrameReport`]: the draw calls a renderer should paint, plus the three
//! display texts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GazeClassifier;
use crate::domain::{
    DetectionResult, DrawInstruction, Eye, EyeReading, Frame, FrameReport, GazeLabel,
};
use crate::landmarks::{eye_box, indices, point_by_name, points_of, resolve_eye};
use crate::landmarks::{LandmarkIndexSet, DEFAULT_EYE_BOX_HEIGHT_RATIO};

const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// Colors, sizes and box proportions of the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Stroke color of the eye contour outlines.
    pub eye_landmark_color: String,
    /// Fill color of the resolved eye centers.
    pub eye_center_color: String,
    /// Fill color of the named iris points.
    pub iris_point_color: String,
    /// Stroke color of the iris outlines.
    pub iris_landmark_color: String,
    /// Stroke color of the eye boxes.
    pub eye_box_color: String,
    /// Radius of the named iris points.
    pub iris_point_size: f64,
    /// Radius of the resolved eye centers.
    pub eye_center_size: f64,
    /// Stroke width of contours.
    pub landmark_width: f64,
    /// Stroke width of eye boxes.
    pub eye_box_width: f64,
    /// Eye box height as a fraction of its width.
    pub eye_box_height_ratio: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            eye_landmark_color: TRANSPARENT.to_string(),
            eye_center_color: TRANSPARENT.to_string(),
            iris_point_color: TRANSPARENT.to_string(),
            iris_landmark_color: "yellow".to_string(),
            eye_box_color: "green".to_string(),
            iris_point_size: 2.0,
            eye_center_size: 5.0,
            landmark_width: 1.0,
            eye_box_width: 1.0,
            eye_box_height_ratio: DEFAULT_EYE_BOX_HEIGHT_RATIO,
        }
    }
}

/// Analyzes the first detected face of a frame.
///
/// `detection` is `None` when the detector returned no faces. Text outputs
/// carry coordinates and a gaze label only when both eyes resolve; otherwise
/// all three read "Not detected".
#[must_use]
pub fn analyze_frame(
    frame: &Frame,
    detection: Option<&DetectionResult>,
    config: &OverlayConfig,
    classifier: &GazeClassifier,
) -> FrameReport {
    let Some(detection) = detection else {
        debug!(frame = frame.index, "No face detected");
        return FrameReport::not_detected(frame.index);
    };

    let left = resolve_eye(detection, Eye::Left);
    let right = resolve_eye(detection, Eye::Right);

    let mut draw = Vec::new();

    for eye in Eye::BOTH {
        push_contour(
            &mut draw,
            detection,
            indices::contour(eye),
            &config.eye_landmark_color,
            config.landmark_width,
        );
    }

    if let (Some(l), Some(r)) = (left, right) {
        for p in [l, r] {
            draw.push(DrawInstruction::Point {
                x: p.x,
                y: p.y,
                color: config.eye_center_color.clone(),
                size: config.eye_center_size,
            });
        }
    }

    if let Some(keypoints) = detection.keypoints() {
        for eye in Eye::BOTH {
            if let Some(p) = point_by_name(keypoints, eye.iris_name()) {
                draw.push(DrawInstruction::Point {
                    x: p.x,
                    y: p.y,
                    color: config.iris_point_color.clone(),
                    size: config.iris_point_size,
                });
            }
        }
        for eye in Eye::BOTH {
            push_contour(
                &mut draw,
                detection,
                indices::iris(eye),
                &config.iris_landmark_color,
                config.landmark_width,
            );
        }
    }

    for eye in Eye::BOTH {
        if let Some(b) = eye_box(detection, indices::contour(eye), config.eye_box_height_ratio) {
            draw.push(DrawInstruction::Box {
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
                color: config.eye_box_color.clone(),
                line_width: config.eye_box_width,
            });
        }
    }

    let (left_eye, right_eye, gaze) = match (left, right) {
        (Some(l), Some(r)) => (
            EyeReading::at(l),
            EyeReading::at(r),
            Some(classifier.classify(
                l,
                r,
                f64::from(frame.width),
                f64::from(frame.height),
            )),
        ),
        _ => (EyeReading::not_detected(), EyeReading::not_detected(), None),
    };

    debug!(frame = frame.index, ?gaze, draw_calls = draw.len(), "Analyzed frame");

    FrameReport {
        frame: frame.index,
        face_detected: true,
        left_eye,
        right_eye,
        gaze,
        gaze_text: GazeLabel::text(gaze).to_string(),
        draw,
    }
}

fn push_contour(
    draw: &mut Vec<DrawInstruction>,
    detection: &DetectionResult,
    set: LandmarkIndexSet,
    color: &str,
    line_width: f64,
) {
    let points = points_of(detection, set);
    if !points.is_empty() {
        draw.push(DrawInstruction::Contour {
            points,
            color: color.to_string(),
            line_width,
        });
    }
}
