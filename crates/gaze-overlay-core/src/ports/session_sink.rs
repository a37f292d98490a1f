//! Session event port for status and progress integration.

use crate::domain::{Frame, GazeLabel};

/// Events emitted by a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The loop started.
    Started {
        /// Total ticks, if known.
        total: Option<u64>,
    },
    /// A frame was analyzed and its report written.
    FrameProcessed {
        /// Frame index.
        index: u64,
        /// Whether a face was found.
        face_detected: bool,
        /// Gaze zone, if both eyes resolved.
        gaze: Option<GazeLabel>,
    },
    /// The detector failed. Only the first failure of a session is reported.
    DetectionFailed {
        /// Frame index.
        index: u64,
        /// Status text, `"Detection error: <cause>"`.
        message: String,
    },
    /// A tick was skipped without calling the detector.
    Skipped {
        /// The frame that was not ready.
        frame: Frame,
    },
    /// The loop ended, either because ticks ran out or tracking was stopped.
    Stopped {
        /// Frames analyzed.
        processed: u64,
        /// Detector failures.
        failed: u64,
        /// Ticks skipped.
        skipped: u64,
    },
}

/// Port for receiving session events.
pub trait SessionSink: Send + Sync {
    /// Called when a session event occurs.
    fn on_event(&self, event: SessionEvent);
}
