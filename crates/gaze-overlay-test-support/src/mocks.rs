//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use gaze_overlay_core::{
    DetectionResult, Detector, Frame, FrameOutput, FrameReport, SessionEvent, SessionSink, Tick,
    TickSource,
};

/// Scripted reply of a [`MockDetector`] for one frame.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return these faces.
    Faces(Vec<DetectionResult>),
    /// Fail with this message.
    Fail(String),
}

/// Mock implementation of `Detector` for testing.
///
/// Replies are consumed per call, in order; once the script runs out the
/// fallback reply is repeated. Every frame passed in is recorded.
pub struct MockDetector {
    script: Vec<MockResponse>,
    fallback: MockResponse,
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl MockDetector {
    /// Creates a detector that replays `script`, then finds no faces.
    #[must_use]
    pub fn new(script: Vec<MockResponse>) -> Self {
        Self {
            script,
            fallback: MockResponse::Faces(Vec::new()),
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a detector that returns `faces` on every call.
    #[must_use]
    pub fn always(faces: Vec<DetectionResult>) -> Self {
        Self {
            fallback: MockResponse::Faces(faces),
            ..Self::new(Vec::new())
        }
    }

    /// Creates a detector that fails on every call.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self {
            fallback: MockResponse::Fail(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Returns the frames the detector was called with.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of detector calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Detector for MockDetector {
    fn estimate_faces(&self, frame: &Frame) -> anyhow::Result<Vec<DetectionResult>> {
        let call = {
            let mut frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
            frames.push(*frame);
            frames.len() - 1
        };

        match self.script.get(call).unwrap_or(&self.fallback) {
            MockResponse::Faces(faces) => Ok(faces.clone()),
            MockResponse::Fail(message) => Err(anyhow::anyhow!("{message}")),
        }
    }
}

/// Tick source yielding a fixed number of ticks immediately.
pub struct ManualTicks {
    count: u64,
    known: bool,
}

impl ManualTicks {
    /// Creates a source of `count` ticks with a known total.
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self { count, known: true }
    }

    /// Creates a source of `count` ticks that does not report a total.
    #[must_use]
    pub const fn unbounded_hint(count: u64) -> Self {
        Self {
            count,
            known: false,
        }
    }
}

impl TickSource for ManualTicks {
    fn ticks(&self) -> Box<dyn Iterator<Item = Tick> + Send + '_> {
        Box::new((0..self.count).map(Tick::new))
    }

    fn count_hint(&self) -> Option<u64> {
        self.known.then_some(self.count)
    }
}

/// Mock implementation of `FrameOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockFrameOutput {
    reports: Arc<Mutex<Vec<FrameReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockFrameOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<FrameReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockFrameOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameOutput for MockFrameOutput {
    fn write(&self, report: &FrameReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `SessionSink` for testing.
///
/// Captures events for later assertions.
pub struct MockSessionSink {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl MockSessionSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the messages of all `DetectionFailed` events.
    #[must_use]
    pub fn failure_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::DetectionFailed { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of `Skipped` events.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Skipped { .. }))
            .count()
    }

    /// Returns the final counts from the `Stopped` event, if any.
    #[must_use]
    pub fn stopped_counts(&self) -> Option<(u64, u64, u64)> {
        self.events().iter().find_map(|e| match e {
            SessionEvent::Stopped {
                processed,
                failed,
                skipped,
            } => Some((*processed, *failed, *skipped)),
            _ => None,
        })
    }
}

impl Default for MockSessionSink {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionSink for MockSessionSink {
    fn on_event(&self, event: SessionEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
