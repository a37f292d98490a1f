//! Test support utilities for gaze-overlay.
//!
//! Provides mocks for every core port and a builder for synthetic
//! detector output in both landmark layouts.
//!
//! # Example
//!
//! ```
//! use gaze_overlay_core::{Eye, Point2D};
//! use gaze_overlay_test_support::{DetectionBuilder, MockDetector};
//!
//! let face = DetectionBuilder::keypoints()
//!     .eye_contour(Eye::Left, Point2D::new(300.0, 240.0), 15.0)
//!     .eye_contour(Eye::Right, Point2D::new(340.0, 240.0), 15.0)
//!     .build();
//!
//! let detector = MockDetector::always(vec![face]);
//! ```

mod builders;
mod mocks;

pub use builders::{replay_line, DetectionBuilder, MESH_SIZE};
pub use mocks::{ManualTicks, MockDetector, MockFrameOutput, MockResponse, MockSessionSink};
