use core::fmt;

/// A result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The configuration value a [`Error::Configuration`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigField {
    /// The 5-bit worker id of a distributed generator.
    WorkerId,
    /// The 5-bit process id of a distributed generator.
    ProcessId,
    /// The epoch (milliseconds since the Unix epoch) of a distributed
    /// generator.
    Epoch,
    /// A sequence value used to seed generator state.
    Sequence,
    /// The alphabet of a random string generator.
    Alphabet,
    /// The output length of a random string generator.
    Length,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WorkerId => "worker_id",
            Self::ProcessId => "process_id",
            Self::Epoch => "epoch",
            Self::Sequence => "sequence",
            Self::Alphabet => "alphabet",
            Self::Length => "length",
        })
    }
}

/// All errors `idsmith` can produce.
///
/// No variant is ever recovered internally. Sequence exhaustion is not an
/// error: generators wait for the clock to advance instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A generator was constructed with an invalid value.
    ///
    /// The caller must fix the configuration and construct a new generator.
    #[error("invalid {field}: {reason}")]
    Configuration {
        /// The offending field.
        field: ConfigField,
        /// Why the value was rejected.
        reason: String,
    },

    /// The clock was observed behind the last timestamp used by the
    /// generator.
    ///
    /// The generator state is unchanged, so the call may be retried once the
    /// clock has caught up. Retrying in a tight loop is discouraged since the
    /// condition may persist.
    #[error("clock moved backwards by {millis}ms")]
    ClockRegression {
        /// How far behind the last observed timestamp the clock is, in
        /// milliseconds.
        millis: u64,
    },

    /// The clock reported a time earlier than the generator's epoch.
    #[error("current time {now} is before epoch {epoch}")]
    TimestampBeforeEpoch {
        /// The clock reading, in milliseconds since the Unix epoch.
        now: u64,
        /// The configured epoch, in milliseconds since the Unix epoch.
        epoch: u64,
    },

    /// The time elapsed since the epoch no longer fits the 41-bit timestamp
    /// field.
    #[error("timestamp offset {offset}ms exceeds the 41-bit timestamp field")]
    TimestampOverflow {
        /// Milliseconds elapsed since the epoch.
        offset: u64,
    },

    /// The input is not a decimal unsigned 64-bit integer.
    #[error("invalid id {input:?}: expected a decimal unsigned 64-bit integer")]
    InvalidId {
        /// The rejected input.
        input: String,
    },

    /// A thread panicked while holding the generator lock.
    ///
    /// `parking_lot` mutexes do not poison, so this variant only exists
    /// without the `parking-lot` feature.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    pub(crate) fn configuration(field: ConfigField, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
// Collapse every poisoned guard into `LockPoisoned`
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
