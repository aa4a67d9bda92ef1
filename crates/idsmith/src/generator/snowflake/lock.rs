use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::State;
use crate::{
    IdGenStatus, Identity, Result, SnowflakeGenerator, SnowflakeId, TimeSource, generator::Mutex,
};

/// A lock-based distributed ID generator for sharing one identity across
/// threads.
///
/// The state sits behind an [`Arc<Mutex<_>>`]; clones share it, so every
/// clone draws from the same `(timestamp, sequence)` space. The clock is read
/// while the lock is held, which keeps readings ordered with the state they
/// are compared against: a thread that read the clock a moment earlier can
/// never be mistaken for a clock regression.
///
/// The lock is released between polls, so a thread waiting out an exhausted
/// sequence does not block others from observing the new millisecond.
///
/// Uses `std::sync::Mutex` by default and `parking_lot::Mutex` with the
/// `parking-lot` feature.
///
/// ## Recommended When
/// - You want one shared generator instead of one identity per thread
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicSnowflakeGenerator`]
///
/// [`BasicSnowflakeGenerator`]: crate::BasicSnowflakeGenerator
pub struct LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    identity: Identity,
    state: Arc<Mutex<State>>,
    time: T,
}

impl<T> Clone for LockSnowflakeGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            identity: self.identity,
            state: Arc::clone(&self.state),
            time: self.time.clone(),
        }
    }
}

impl<T> LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator that has never issued an ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the epoch is later than the
    /// current reading of `time`.
    ///
    /// # Example
    /// ```
    /// use idsmith::{Identity, LockSnowflakeGenerator, SystemClock};
    ///
    /// let generator = LockSnowflakeGenerator::new(Identity::default(), SystemClock)?;
    /// let handles: Vec<_> = (0..4)
    ///     .map(|_| {
    ///         let generator = generator.clone();
    ///         std::thread::spawn(move || generator.next_id())
    ///     })
    ///     .collect();
    ///
    /// for handle in handles {
    ///     handle.join().unwrap()?;
    /// }
    /// # Ok::<(), idsmith::Error>(())
    /// ```
    ///
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn new(identity: Identity, time: T) -> Result<Self> {
        identity.validate_epoch(time.current_millis())?;
        Ok(Self::with_state(identity, State::new(), time))
    }

    /// Creates a generator that behaves as if it last issued `sequence` at
    /// `last_timestamp` (milliseconds since the Unix epoch).
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
            state: Arc::new(Mutex::new(state)),
            time,
        }
    }

    pub const fn identity(&self) -> Identity {
        self.identity
    }

    /// Generates the next ID, spinning outside the lock while the sequence
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if the clock reads earlier than the last
    ///   issued timestamp
    /// - [`Error::TimestampBeforeEpoch`] / [`Error::TimestampOverflow`] if
    ///   the clock reading cannot be encoded
    /// - `Error::LockPoisoned` if another thread panicked while holding the
    ///   lock (std mutex only)
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampBeforeEpoch`]: crate::Error::TimestampBeforeEpoch
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    pub fn next_id(&self) -> Result<SnowflakeId> {
        <Self as SnowflakeGenerator<T>>::next_id(self)
    }

    /// Like [`Self::next_id`] but calls `f(yield_for)` between polls.
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    pub fn next_id_with(&self, f: impl FnMut(u64)) -> Result<SnowflakeId> {
        <Self as SnowflakeGenerator<T>>::next_id_with(self, f)
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let now = self.time.current_millis();
        state.advance(now, &self.identity)
    }
}

impl<T> SnowflakeGenerator<T> for LockSnowflakeGenerator<T>
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
