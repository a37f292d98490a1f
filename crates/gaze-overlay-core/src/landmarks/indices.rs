//! Face-mesh landmark index sets.
//!
//! Indices refer to positions in a 468-point face mesh, extended to 478
//! points when the iris refinement model is enabled.

use crate::domain::Eye;

/// Ordered landmark indices making up one anatomical region.
pub type LandmarkIndexSet = &'static [usize];

/// Outline of the left eye.
pub const LEFT_EYE_CONTOUR: LandmarkIndexSet = &[
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
];

/// Outline of the right eye.
pub const RIGHT_EYE_CONTOUR: LandmarkIndexSet = &[
    263, 249, 390, 373, 374, 380, 381, 382, 362, 398, 384, 385, 386, 387, 388, 466,
];

/// Left iris ring, center first.
pub const LEFT_IRIS: LandmarkIndexSet = &[468, 469, 470, 471, 472];

/// Right iris ring, center first.
pub const RIGHT_IRIS: LandmarkIndexSet = &[473, 474, 475, 476, 477];

/// Left iris ring without its last point, as emitted by some detector builds.
pub const ALT_LEFT_IRIS: LandmarkIndexSet = &[468, 469, 470, 471];

/// Right iris ring without its last point.
pub const ALT_RIGHT_IRIS: LandmarkIndexSet = &[473, 474, 475, 476];

/// Contour index set of `eye`.
#[must_use]
pub const fn contour(eye: Eye) -> LandmarkIndexSet {
    match eye {
        Eye::Left => LEFT_EYE_CONTOUR,
        Eye::Right => RIGHT_EYE_CONTOUR,
    }
}

/// Primary iris index set of `eye`.
#[must_use]
pub const fn iris(eye: Eye) -> LandmarkIndexSet {
    match eye {
        Eye::Left => LEFT_IRIS,
        Eye::Right => RIGHT_IRIS,
    }
}

/// Alternate iris index set of `eye`.
#[must_use]
pub const fn alt_iris(eye: Eye) -> LandmarkIndexSet {
    match eye {
        Eye::Left => ALT_LEFT_IRIS,
        Eye::Right => ALT_RIGHT_IRIS,
    }
}
