//! Gaze Overlay Adapters - External adapters for gaze-overlay.
//!
//! This crate provides adapters for:
//! - Replaying recorded detector output from JSON Lines files
//! - Timer-paced tick sources

pub mod replay;
pub mod ticks;

pub use replay::ReplayDetector;
pub use ticks::IntervalTicks;
