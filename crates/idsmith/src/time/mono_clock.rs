use crate::TimeSource;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A wall-clock-aligned time source that never goes backward.
///
/// The clock captures the wall-clock time and an [`Instant`] once, at
/// construction. Each reading is the captured wall-clock time plus the
/// monotonic time elapsed since then, so NTP steps or manual changes to the
/// system clock after construction are ignored.
///
/// The trade-off is drift: over long uptimes the readings may diverge from
/// the wall clock by however much the system clock was corrected. Since
/// readings never regress, generators using this clock never return
/// [`Error::ClockRegression`].
///
/// Cloning shares the original anchor, so clones agree with each other.
///
/// # Example
///
/// ```
/// use idsmith::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
///
/// [`Error::ClockRegression`]: crate::Error::ClockRegression
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    anchor: u64, // unix millis at `start`
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Anchors a new clock at the current wall-clock time.
    ///
    /// A system clock set before 1970 anchors at `0`.
    pub fn new() -> Self {
        let start = Instant::now();
        let anchor = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64);
        Self::with_anchor(anchor, start)
    }

    /// Anchors a clock at an explicit Unix timestamp (milliseconds) that
    /// corresponds to `start`.
    pub const fn with_anchor(anchor: u64, start: Instant) -> Self {
        Self { start, anchor }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.anchor + self.start.elapsed().as_millis() as u64
    }
}
