//! Timer-paced tick source.

use std::thread;
use std::time::Duration;

use gaze_overlay_core::{Tick, TickSource};

/// Emits ticks at a fixed interval, optionally up to a limit.
///
/// The first tick is immediate. With a zero interval ticks are produced as
/// fast as they are consumed.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTicks {
    interval: Duration,
    limit: Option<u64>,
}

impl IntervalTicks {
    /// Creates a tick source.
    #[must_use]
    pub const fn new(interval: Duration, limit: Option<u64>) -> Self {
        Self { interval, limit }
    }
}

impl TickSource for IntervalTicks {
    fn ticks(&self) -> Box<dyn Iterator<Item = Tick> + Send + '_> {
        let interval = self.interval;
        let end = self.limit.unwrap_or(u64::MAX);

        Box::new((0..end).map(move |index| {
            if index > 0 && !interval.is_zero() {
                thread::sleep(interval);
            }
            Tick::new(index)
        }))
    }

    fn count_hint(&self) -> Option<u64> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_limit_bounds_ticks() {
        let ticks = IntervalTicks::new(Duration::ZERO, Some(4));
        assert_eq!(ticks.count_hint(), Some(4));
        assert_eq!(ticks.ticks().count(), 4);
    }

    #[test]
    fn test_unbounded_without_limit() {
        let ticks = IntervalTicks::new(Duration::ZERO, None);
        assert_eq!(ticks.count_hint(), None);
        assert_eq!(ticks.ticks().take(100).last(), Some(Tick::new(99)));
    }

    #[test]
    fn test_interval_paces_ticks() {
        let ticks = IntervalTicks::new(Duration::from_millis(5), Some(3));
        let start = Instant::now();
        assert_eq!(ticks.ticks().count(), 3);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
