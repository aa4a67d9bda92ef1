use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The system wall clock.
///
/// Every call reads `SystemTime::now()`, so adjustments to the system clock
/// (NTP steps, manual changes) are observed immediately. A backward step
/// surfaces as [`Error::ClockRegression`] from the generator.
///
/// A clock set before 1970 reads as `0`.
///
/// [`Error::ClockRegression`]: crate::Error::ClockRegression
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_after_default_epoch() {
        assert!(SystemClock.current_millis() > crate::DEFAULT_EPOCH);
    }
}
