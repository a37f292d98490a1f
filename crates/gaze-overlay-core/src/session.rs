//! Tracking session: the per-tick detect, analyze and report loop.
//!
//! A [`Session`] owns its tracking flag and frame dimensions. Other parties
//! (a signal handler, a UI, a test) hold a cloneable [`SessionHandle`] to stop
//! tracking or update the dimensions while the loop runs.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analysis::{analyze_frame, GazeClassifier, OverlayConfig};
use crate::domain::Frame;
use crate::ports::{Detector, FrameOutput, SessionEvent, SessionSink, TickSource};

#[derive(Debug, Default)]
struct Shared {
    tracking: AtomicBool,
    width: AtomicU32,
    height: AtomicU32,
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Whether the loop is (or will keep) processing ticks.
    pub tracking: bool,
    /// Current frame width; zero until the source is ready.
    pub width: u32,
    /// Current frame height; zero until the source is ready.
    pub height: u32,
}

/// Cloneable control handle for a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    shared: Arc<Shared>,
}

impl SessionHandle {
    /// Clears the tracking flag. The loop exits before its next tick, and an
    /// in-flight detection result is discarded.
    pub fn stop(&self) {
        if self.shared.tracking.swap(false, Ordering::SeqCst) {
            info!("Tracking stop requested");
        }
    }

    /// Returns true while the session is tracking.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.shared.tracking.load(Ordering::SeqCst)
    }

    /// Updates the frame dimensions used for subsequent ticks.
    pub fn set_dimensions(&self, width: u32, height: u32) {
        self.shared.width.store(width, Ordering::SeqCst);
        self.shared.height.store(height, Ordering::SeqCst);
    }

    /// Snapshot of the session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        SessionState {
            tracking: self.is_tracking(),
            width: self.shared.width.load(Ordering::SeqCst),
            height: self.shared.height.load(Ordering::SeqCst),
        }
    }
}

/// Counters for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames analyzed and written.
    pub processed: u64,
    /// Ticks on which the detector failed.
    pub failed: u64,
    /// Ticks skipped because the frame had no dimensions yet.
    pub skipped: u64,
}

impl SessionSummary {
    /// Returns true if any detector call failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// A gaze tracking session.
#[derive(Debug)]
pub struct Session {
    overlay: OverlayConfig,
    classifier: GazeClassifier,
    handle: SessionHandle,
}

impl Session {
    /// Creates a session for frames of the given size. The session is
    /// tracking from the start; a stop issued through a handle before
    /// [`Session::run`] makes `run` return without processing any tick.
    ///
    /// A zero width or height is allowed: ticks are skipped until
    /// [`SessionHandle::set_dimensions`] supplies a usable size.
    #[must_use]
    pub fn new(overlay: OverlayConfig, classifier: GazeClassifier, width: u32, height: u32) -> Self {
        let handle = SessionHandle {
            shared: Arc::new(Shared {
                tracking: AtomicBool::new(true),
                ..Shared::default()
            }),
        };
        handle.set_dimensions(width, height);

        Self {
            overlay,
            classifier,
            handle,
        }
    }

    /// Returns a handle for stopping the session or resizing its frames.
    #[must_use]
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Runs the loop until the ticks run out or the session is stopped.
    ///
    /// Each tick is fully processed before the next one is pulled. Detector
    /// failures are counted and the loop moves on; only the first one is
    /// surfaced as a [`SessionEvent::DetectionFailed`] event.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing a report fails.
    pub fn run(
        &self,
        ticks: &dyn TickSource,
        detector: &dyn Detector,
        output: &dyn FrameOutput,
        sink: &dyn SessionSink,
    ) -> anyhow::Result<SessionSummary> {
        let total = ticks.count_hint();
        info!(?total, threshold = self.classifier.threshold, "Tracking started");
        sink.on_event(SessionEvent::Started { total });

        let mut summary = SessionSummary::default();

        for tick in ticks.ticks() {
            if !self.handle.is_tracking() {
                debug!(tick = tick.index, "Tracking stopped, leaving loop");
                break;
            }

            let state = self.handle.state();
            let frame = Frame::new(tick.index, state.width, state.height);

            if !frame.is_ready() {
                debug!(tick = tick.index, "Frame not ready, skipping");
                summary.skipped += 1;
                sink.on_event(SessionEvent::Skipped { frame });
                continue;
            }

            let estimate = detector.estimate_faces(&frame);

            if !self.handle.is_tracking() {
                debug!(tick = tick.index, "Tracking stopped, discarding detection");
                break;
            }

            match estimate {
                Ok(faces) => {
                    let report =
                        analyze_frame(&frame, faces.first(), &self.overlay, &self.classifier);
                    output.write(&report)?;
                    summary.processed += 1;
                    sink.on_event(SessionEvent::FrameProcessed {
                        index: frame.index,
                        face_detected: report.face_detected,
                        gaze: report.gaze,
                    });
                }
                Err(e) => {
                    summary.failed += 1;
                    if summary.failed == 1 {
                        sink.on_event(SessionEvent::DetectionFailed {
                            index: frame.index,
                            message: format!("Detection error: {e:#}"),
                        });
                    } else {
                        warn!(frame = frame.index, "Detection error: {e:#}");
                    }
                }
            }
        }

        self.handle.stop();
        output.flush()?;

        info!(
            processed = summary.processed,
            failed = summary.failed,
            skipped = summary.skipped,
            "Tracking stopped"
        );
        sink.on_event(SessionEvent::Stopped {
            processed: summary.processed,
            failed: summary.failed,
            skipped: summary.skipped,
        });

        Ok(summary)
    }
}
