//! Tick source port driving the per-frame loop.

/// One scheduling tick: a request to process the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Zero-based tick number.
    pub index: u64,
}

impl Tick {
    /// Creates a tick.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self { index }
    }
}

/// Port for producing ticks.
///
/// Implementations may block between ticks (timer pacing) or yield them
/// immediately (replay, tests). The iterator ending ends the session.
pub trait TickSource: Send + Sync {
    /// Returns an iterator over ticks.
    fn ticks(&self) -> Box<dyn Iterator<Item = Tick> + Send + '_>;

    /// Returns the total number of ticks, if known.
    fn count_hint(&self) -> Option<u64>;
}
