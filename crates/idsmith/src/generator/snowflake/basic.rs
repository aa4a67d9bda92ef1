use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::State;
use crate::{IdGenStatus, Identity, Result, SnowflakeGenerator, SnowflakeId, TimeSource};

/// A non-concurrent distributed ID generator.
///
/// State lives in a [`Cell`], so the generator is `Send` but not `Sync`: the
/// compiler rejects sharing one instance across threads without
/// synchronization. Either give each thread its own generator with a distinct
/// `(worker_id, process_id)` pair, or share a [`LockSnowflakeGenerator`].
///
/// ## Recommended When
/// - One generator per thread (or a single-threaded program)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockSnowflakeGenerator`]
///
/// [`LockSnowflakeGenerator`]: crate::LockSnowflakeGenerator
pub struct BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    identity: Identity,
    state: Cell<State>,
    time: T,
}

impl<T> BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator that has never issued an ID.
    ///
    /// # Parameters
    ///
    /// - `identity`: worker ID, process ID and epoch stamped into every ID.
    /// - `time`: A [`TimeSource`] implementation (e.g. [`SystemClock`]) read
    ///   on every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the epoch is later than the
    /// current reading of `time`.
    ///
    /// # Example
    /// ```
    /// use idsmith::{BasicSnowflakeGenerator, Identity, SystemClock};
    ///
    /// let generator = BasicSnowflakeGenerator::new(Identity::default(), SystemClock)?;
    /// let a = generator.next_id()?;
    /// let b = generator.next_id()?;
    /// assert!(a < b);
    /// # Ok::<(), idsmith::Error>(())
    /// ```
    ///
    /// [`SystemClock`]: crate::SystemClock
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn new(identity: Identity, time: T) -> Result<Self> {
        identity.validate_epoch(time.current_millis())?;
        Ok(Self::with_state(identity, State::new(), time))
    }

    /// Creates a generator that behaves as if it last issued `sequence` at
    /// `last_timestamp` (milliseconds since the Unix epoch).
    ///
    /// Mostly useful for tests and tools that need a specific starting
    /// point. State is never persisted by the generator itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the epoch is in the future or
    /// `sequence` exceeds 4095.
    ///
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn from_state(
        identity: Identity,
        last_timestamp: u64,
        sequence: u16,
        time: T,
    ) -> Result<Self> {
        identity.validate_epoch(time.current_millis())?;
        let state = State::seeded(last_timestamp, sequence)?;
        Ok(Self::with_state(identity, state, time))
    }

    fn with_state(identity: Identity, state: State, time: T) -> Self {
        Self {
            identity,
            state: Cell::new(state),
            time,
        }
    }

    /// The identity stamped into every generated ID.
    pub const fn identity(&self) -> Identity {
        self.identity
    }

    /// Generates the next ID, busy-waiting for at most about a millisecond
    /// if this millisecond's 4096 sequence values are spent.
    ///
    /// Every returned ID is strictly greater than all IDs previously returned
    /// by this generator.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if the clock reads earlier than the last
    ///   issued timestamp. State is left untouched, so a later retry may
    ///   succeed.
    /// - [`Error::TimestampBeforeEpoch`] / [`Error::TimestampOverflow`] if
    ///   the clock reading cannot be encoded.
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampBeforeEpoch`]: crate::Error::TimestampBeforeEpoch
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    pub fn next_id(&self) -> Result<SnowflakeId> {
        <Self as SnowflakeGenerator<T>>::next_id(self)
    }

    /// Like [`Self::next_id`] but calls `f(yield_for)` instead of spinning
    /// while the sequence is exhausted.
    ///
    /// # Example
    /// ```
    /// use idsmith::{BasicSnowflakeGenerator, Identity, SystemClock};
    ///
    /// let generator = BasicSnowflakeGenerator::new(Identity::default(), SystemClock)?;
    /// let id = generator.next_id_with(|_| std::thread::yield_now())?;
    /// # let _ = id;
    /// # Ok::<(), idsmith::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    pub fn next_id_with(&self, f: impl FnMut(u64)) -> Result<SnowflakeId> {
        <Self as SnowflakeGenerator<T>>::next_id_with(self, f)
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// # Returns
    /// - `Ok(IdGenStatus::Ready { id })`: A new ID is available
    /// - `Ok(IdGenStatus::Pending { yield_for })`: The time to wait (in
    ///   milliseconds) before trying again
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus> {
        let now = self.time.current_millis();
        let mut state = self.state.get();
        let status = state.advance(now, &self.identity)?;
        self.state.set(state);
        Ok(status)
    }
}

impl<T> SnowflakeGenerator<T> for BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn new(identity: Identity, time: T) -> Result<Self> {
        Self::new(identity, time)
    }

    fn identity(&self) -> Identity {
        self.identity
    }

    fn try_poll_id(&self) -> Result<IdGenStatus> {
        self.try_poll_id()
    }
}
