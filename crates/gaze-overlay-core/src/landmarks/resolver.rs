//! Eye center resolution.

use tracing::trace;

use super::accessor::{average_of, point_by_name};
use super::indices;
use crate::domain::{DetectionResult, Eye, Point2D};

/// Resolves the center of `eye`, trying each source in turn.
///
/// For the keypoint layout the order is: the named iris point, the mean of
/// the primary iris ring, the mean of the alternate iris ring, the named eye
/// point, then the mean of the eye contour. The legacy mesh layout only
/// supports the contour mean.
#[must_use]
pub fn resolve_eye(detection: &DetectionResult, eye: Eye) -> Option<Point2D> {
    let resolved = match detection {
        DetectionResult::Keypoints(points) => point_by_name(points, eye.iris_name())
            .or_else(|| average_of(detection, indices::iris(eye)))
            .or_else(|| average_of(detection, indices::alt_iris(eye)))
            .or_else(|| point_by_name(points, eye.eye_name()))
            .or_else(|| average_of(detection, indices::contour(eye))),
        DetectionResult::LegacyMesh(_) => average_of(detection, indices::contour(eye)),
    };

    trace!(?eye, ?resolved, "Resolved eye");
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Keypoint;

    const MESH_LEN: usize = 478;

    fn empty_keypoints() -> Vec<Option<Keypoint>> {
        vec![None; MESH_LEN]
    }

    fn set(points: &mut [Option<Keypoint>], index: usize, x: f64, y: f64) {
        points[index] = Some(Keypoint::new(x, y));
    }

    #[test]
    fn test_named_iris_wins_over_indices() {
        let mut points = empty_keypoints();
        set(&mut points, 468, 1.0, 1.0);
        points.push(Some(Keypoint::named("leftIris", 100.0, 200.0)));

        let det = DetectionResult::Keypoints(points);
        assert_eq!(
            resolve_eye(&det, Eye::Left),
            Some(Point2D::new(100.0, 200.0))
        );
    }

    #[test]
    fn test_partial_primary_iris_is_averaged() {
        let mut points = empty_keypoints();
        set(&mut points, 473, 10.0, 10.0);
        set(&mut points, 475, 20.0, 20.0);
        set(&mut points, 477, 30.0, 30.0);

        let det = DetectionResult::Keypoints(points);
        assert_eq!(
            resolve_eye(&det, Eye::Right),
            Some(Point2D::new(20.0, 20.0))
        );
    }

    #[test]
    fn test_truncated_iris_ring_resolves() {
        let mut points = empty_keypoints();
        points.truncate(470);
        set(&mut points, 468, 10.0, 40.0);
        set(&mut points, 469, 30.0, 60.0);

        let det = DetectionResult::Keypoints(points);
        assert_eq!(
            resolve_eye(&det, Eye::Left),
            Some(Point2D::new(20.0, 50.0))
        );
    }

    #[test]
    fn test_named_eye_before_contour() {
        let mut points = empty_keypoints();
        set(&mut points, 33, 1.0, 1.0);
        points.push(Some(Keypoint::named("leftEye", 55.0, 66.0)));

        let det = DetectionResult::Keypoints(points);
        assert_eq!(resolve_eye(&det, Eye::Left), Some(Point2D::new(55.0, 66.0)));
    }

    #[test]
    fn test_contour_fallback_for_keypoints() {
        let mut points = empty_keypoints();
        set(&mut points, 263, 100.0, 50.0);
        set(&mut points, 362, 200.0, 70.0);

        let det = DetectionResult::Keypoints(points);
        assert_eq!(
            resolve_eye(&det, Eye::Right),
            Some(Point2D::new(150.0, 60.0))
        );
        assert_eq!(resolve_eye(&det, Eye::Left), None);
    }

    #[test]
    fn test_legacy_mesh_uses_contour_only() {
        let mut mesh = vec![None; MESH_LEN];
        mesh[33] = Some(vec![10.0, 10.0, 0.0]);
        mesh[133] = Some(vec![30.0, 20.0, 0.0]);
        // Iris points are ignored for the legacy layout.
        mesh[468] = Some(vec![999.0, 999.0, 0.0]);

        let det = DetectionResult::LegacyMesh(mesh);
        assert_eq!(resolve_eye(&det, Eye::Left), Some(Point2D::new(20.0, 15.0)));
    }

    #[test]
    fn test_empty_detection_resolves_nothing() {
        for det in [
            DetectionResult::Keypoints(Vec::new()),
            DetectionResult::LegacyMesh(Vec::new()),
        ] {
            for eye in Eye::BOTH {
                assert_eq!(resolve_eye(&det, eye), None);
            }
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut points = empty_keypoints();
        set(&mut points, 470, 3.0, 4.0);
        let det = DetectionResult::Keypoints(points);

        let first = resolve_eye(&det, Eye::Left);
        assert!(first.is_some());
        assert_eq!(first, resolve_eye(&det, Eye::Left));
    }
}
