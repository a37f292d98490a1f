//! Eye bounding boxes.

use super::accessor::points_of;
use crate::domain::{DetectionResult, EyeBox};

/// Box height as a fraction of its width.
pub const DEFAULT_EYE_BOX_HEIGHT_RATIO: f64 = 1.0 / 3.0;

/// Computes a box around the resolvable points of `indices`.
///
/// The box spans the horizontal extent of the points; its height is
/// `width * height_ratio`, centered on the vertical midpoint of the extent.
/// Returns `None` when no index resolves.
#[must_use]
pub fn eye_box(
    detection: &DetectionResult,
    indices: &[usize],
    height_ratio: f64,
) -> Option<EyeBox> {
    let points = points_of(detection, indices);
    let first = points.first()?;

    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (first.x, first.x, first.y, first.y),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    );

    let width = max_x - min_x;
    let height = width * height_ratio;

    Some(EyeBox {
        x: min_x,
        y: (min_y + max_y) / 2.0 - height / 2.0,
        width,
        height,
    })
}
