//! Synthetic detector output builders.

use gaze_overlay_core::landmarks::indices;
use gaze_overlay_core::{DetectionResult, Eye, FaceRecord, Keypoint, Point2D};

/// Number of entries in a refined face mesh (468 face + 10 iris points).
pub const MESH_SIZE: usize = 478;

/// Builder for one face's landmarks.
///
/// Starts from an all-holes mesh of [`MESH_SIZE`] entries; only the points
/// set explicitly resolve.
#[derive(Debug, Clone)]
pub struct DetectionBuilder {
    legacy: bool,
    points: Vec<Option<Keypoint>>,
}

impl DetectionBuilder {
    /// Keypoint layout.
    #[must_use]
    pub fn keypoints() -> Self {
        Self {
            legacy: false,
            points: vec![None; MESH_SIZE],
        }
    }

    /// Legacy positional mesh layout.
    #[must_use]
    pub fn legacy_mesh() -> Self {
        Self {
            legacy: true,
            ..Self::keypoints()
        }
    }

    /// Sets the point at `index`, growing the mesh if needed.
    #[must_use]
    pub fn point(mut self, index: usize, x: f64, y: f64) -> Self {
        if index >= self.points.len() {
            self.points.resize(index + 1, None);
        }
        self.points[index] = Some(Keypoint::new(x, y));
        self
    }

    /// Appends a named keypoint after the mesh. Ignored by the legacy layout.
    #[must_use]
    pub fn named(mut self, name: &str, x: f64, y: f64) -> Self {
        self.points.push(Some(Keypoint::named(name, x, y)));
        self
    }

    /// Places the two corners of `eye`'s contour `half_width` either side of
    /// `center`, so the contour mean is `center`.
    #[must_use]
    pub fn eye_contour(self, eye: Eye, center: Point2D, half_width: f64) -> Self {
        let set = indices::contour(eye);
        self.point(set[0], center.x - half_width, center.y)
            .point(set[8], center.x + half_width, center.y)
    }

    /// Fills `eye`'s primary iris ring around `center` with radius `r`.
    #[must_use]
    pub fn iris(self, eye: Eye, center: Point2D, r: f64) -> Self {
        let set = indices::iris(eye);
        self.point(set[0], center.x, center.y)
            .point(set[1], center.x + r, center.y)
            .point(set[2], center.x, center.y - r)
            .point(set[3], center.x - r, center.y)
            .point(set[4], center.x, center.y + r)
    }

    /// Builds the detection.
    #[must_use]
    pub fn build(self) -> DetectionResult {
        if self.legacy {
            DetectionResult::LegacyMesh(self.mesh_entries())
        } else {
            DetectionResult::Keypoints(self.points)
        }
    }

    /// Builds the wire record a detector would emit for this face.
    #[must_use]
    pub fn build_record(self) -> FaceRecord {
        if self.legacy {
            FaceRecord {
                scaled_mesh: Some(self.mesh_entries()),
                ..FaceRecord::default()
            }
        } else {
            FaceRecord {
                keypoints: Some(self.points),
                ..FaceRecord::default()
            }
        }
    }

    fn mesh_entries(&self) -> Vec<Option<Vec<f64>>> {
        self.points
            .iter()
            .filter(|p| !p.as_ref().is_some_and(|k| k.name.is_some()))
            .map(|p| {
                p.as_ref()
                    .and_then(Keypoint::position)
                    .map(|pos| vec![pos.x, pos.y, 0.0])
            })
            .collect()
    }
}

/// Serializes one frame's faces as a replay file line.
#[must_use]
pub fn replay_line(faces: &[FaceRecord]) -> String {
    serde_json::to_string(faces).unwrap_or_else(|_| "[]".to_string())
}
