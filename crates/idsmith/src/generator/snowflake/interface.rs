use crate::{IdGenStatus, Identity, Result, SnowflakeId, TimeSource};

/// A minimal interface for generating distributed IDs.
pub trait SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator that has never issued an ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the identity's epoch is later than
    /// the current reading of `time`.
    ///
    /// [`Error::Configuration`]: crate::Error::Configuration
    fn new(identity: Identity, time: T) -> Result<Self>
    where
        Self: Sized;

    /// The identity stamped into every generated ID.
    fn identity(&self) -> Identity;

    /// Attempts to generate the next ID without waiting.
    ///
    /// The returned [`IdGenStatus`] contains either:
    /// - the newly generated ID, or
    /// - a duration to yield/sleep if the millisecond's sequence is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if the clock is behind the last issued
    ///   timestamp
    /// - [`Error::TimestampBeforeEpoch`] / [`Error::TimestampOverflow`] if
    ///   the reading cannot be encoded
    /// - [`Error::LockPoisoned`] for lock-based generators
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampBeforeEpoch`]: crate::Error::TimestampBeforeEpoch
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    /// [`Error::LockPoisoned`]: crate::Error
    fn try_poll_id(&self) -> Result<IdGenStatus>;

    /// Generates the next ID, calling `f(yield_for)` each time the sequence
    /// is exhausted until the clock advances.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::try_poll_id`].
    fn next_id_with(&self, mut f: impl FnMut(u64)) -> Result<SnowflakeId> {
        loop {
            match self.try_poll_id()? {
                IdGenStatus::Ready { id } => break Ok(id),
                IdGenStatus::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Generates the next ID, busy-waiting while the sequence is exhausted.
    ///
    /// The wait is bounded by the clock's next tick (about one millisecond)
    /// and blocks the calling thread without yielding to any scheduler.
    ///
    /// # Errors
    ///
    /// Same as [`SnowflakeGenerator::try_poll_id`].
    fn next_id(&self) -> Result<SnowflakeId> {
        self.next_id_with(|_| core::hint::spin_loop())
    }
}
