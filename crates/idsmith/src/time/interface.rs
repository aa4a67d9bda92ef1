use std::sync::Arc;

/// Default epoch: Sunday, December 1, 2024 00:00:00 UTC
pub const DEFAULT_EPOCH: u64 = 1_733_011_200_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: u64 = 1_288_834_974_657;

/// UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH: u64 = 0;

/// A source of millisecond timestamps.
///
/// Generators read the clock through this trait so tests can simulate clock
/// regression or rapid-fire timestamps without sleeping.
///
/// Implementations return **milliseconds since the Unix epoch**. The
/// generator subtracts its configured epoch before encoding.
///
/// # Example
///
/// ```
/// use idsmith::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_733_011_201_234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1_733_011_201_234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
