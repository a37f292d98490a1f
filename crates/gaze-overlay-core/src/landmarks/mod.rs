//! Landmark lookup across detector layouts.
//!
//! Provides:
//! - Positional and named point access that never fails, only returns `None`
//! - Eye resolution through the iris / named-point / contour fallback chain
//! - Eye bounding boxes derived from contour extents

mod accessor;
mod eye_box;
pub mod indices;
mod resolver;

pub use accessor::{average_of, point_at, point_by_name, points_of};
pub use eye_box::{eye_box, DEFAULT_EYE_BOX_HEIGHT_RATIO};
pub use indices::LandmarkIndexSet;
pub use resolver::resolve_eye;
