//! Layout-agnostic landmark access.

// Point counts are bounded by the mesh size
#![allow(clippy::cast_precision_loss)]

use crate::domain::{DetectionResult, Keypoint, Point2D};

/// Returns the point at `index`, whatever the detection layout.
///
/// Legacy mesh entries resolve when they carry at least two components;
/// keypoints resolve when both `x` and `y` are present. Out-of-range indices,
/// holes and short entries all yield `None`.
#[must_use]
pub fn point_at(detection: &DetectionResult, index: usize) -> Option<Point2D> {
    match detection {
        DetectionResult::LegacyMesh(mesh) => match mesh.get(index)?.as_deref()? {
            [x, y, ..] => Some(Point2D::new(*x, *y)),
            _ => None,
        },
        DetectionResult::Keypoints(points) => points.get(index)?.as_ref()?.position(),
    }
}

/// Returns the position of the first keypoint named exactly `name`.
///
/// The scan stops at the first name match; if that keypoint lacks a
/// coordinate the result is `None`.
#[must_use]
pub fn point_by_name(keypoints: &[Option<Keypoint>], name: &str) -> Option<Point2D> {
    keypoints
        .iter()
        .flatten()
        .find(|point| point.name.as_deref() == Some(name))?
        .position()
}

/// Resolves every index in order, skipping the ones that are absent.
#[must_use]
pub fn points_of(detection: &DetectionResult, indices: &[usize]) -> Vec<Point2D> {
    indices
        .iter()
        .filter_map(|&index| point_at(detection, index))
        .collect()
}

/// Arithmetic mean of the resolvable points among `indices`.
///
/// Partial data is tolerated: only resolved points contribute. Returns
/// `None` when nothing resolves.
#[must_use]
pub fn average_of(detection: &DetectionResult, indices: &[usize]) -> Option<Point2D> {
    let points = points_of(detection, indices);
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

    Some(Point2D::new(sum_x / count, sum_y / count))
}
