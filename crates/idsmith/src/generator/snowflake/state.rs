use crate::{ConfigField, Error, IdGenStatus, Identity, Result, SnowflakeId};

/// Mutable per-generator state: the last timestamp an ID was issued for and
/// the sequence used within it.
///
/// `(last_timestamp, sequence)` only ever moves forward lexicographically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct State {
    last_timestamp: Option<u64>,
    sequence: u16,
}

impl State {
    /// State of a generator that has never issued an ID.
    pub(crate) const fn new() -> Self {
        Self {
            last_timestamp: None,
            sequence: 0,
        }
    }

    /// State of a generator that last issued `sequence` at `last_timestamp`.
    pub(crate) fn seeded(last_timestamp: u64, sequence: u16) -> Result<Self> {
        if u64::from(sequence) > SnowflakeId::max_sequence() {
            return Err(Error::configuration(
                ConfigField::Sequence,
                format!(
                    "{sequence} is outside 0..={}",
                    SnowflakeId::max_sequence()
                ),
            ));
        }
        Ok(Self {
            last_timestamp: Some(last_timestamp),
            sequence,
        })
    }

    /// Reconciles the clock reading `now` with this state.
    ///
    /// On [`IdGenStatus::Ready`] `self` has been advanced to the issued
    /// `(timestamp, sequence)` pair. On [`IdGenStatus::Pending`] or an error
    /// `self` is untouched, and it is also untouched if packing fails.
    pub(crate) fn advance(&mut self, now: u64, identity: &Identity) -> Result<IdGenStatus> {
        let next = match self.last_timestamp {
            Some(last) if now < last => return Err(Self::cold_clock_behind(now, last)),
            Some(last) if now == last => {
                if u64::from(self.sequence) >= SnowflakeId::max_sequence() {
                    return Ok(IdGenStatus::Pending { yield_for: 1 });
                }
                Self {
                    last_timestamp: Some(now),
                    sequence: self.sequence + 1,
                }
            }
            _ => Self {
                last_timestamp: Some(now),
                sequence: 0,
            },
        };

        let id = identity.pack(now, next.sequence)?;
        *self = next;
        Ok(IdGenStatus::Ready { id })
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last_timestamp: u64) -> Error {
        let millis = last_timestamp - now;
        #[cfg(feature = "tracing")]
        tracing::warn!(now, last_timestamp, millis, "clock moved backwards");
        Error::ClockRegression { millis }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new(1, 2, 0).unwrap()
    }

    fn ready(status: IdGenStatus) -> SnowflakeId {
        match status {
            IdGenStatus::Ready { id } => id,
            IdGenStatus::Pending { yield_for } => {
                panic!("unexpected pending (yield for: {yield_for})")
            }
        }
    }

    #[test]
    fn first_id_starts_at_sequence_zero() {
        let mut state = State::new();
        let id = ready(state.advance(100, &identity()).unwrap());
        assert_eq!(id.timestamp(), 100);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn same_millisecond_increments_then_new_millisecond_resets() {
        let mut state = State::new();
        let identity = identity();
        assert_eq!(ready(state.advance(100, &identity).unwrap()).sequence(), 0);
        assert_eq!(ready(state.advance(100, &identity).unwrap()).sequence(), 1);
        assert_eq!(ready(state.advance(100, &identity).unwrap()).sequence(), 2);
        assert_eq!(ready(state.advance(101, &identity).unwrap()).sequence(), 0);
    }

    #[test]
    fn exhausted_sequence_is_pending_and_untouched() {
        let mut state = State::seeded(100, 4095).unwrap();
        let before = state;
        assert_eq!(
            state.advance(100, &identity()).unwrap(),
            IdGenStatus::Pending { yield_for: 1 }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn regression_reports_distance_and_keeps_state() {
        let mut state = State::seeded(6_000, 7).unwrap();
        let before = state;
        assert_eq!(
            state.advance(1_000, &identity()),
            Err(Error::ClockRegression { millis: 5_000 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn failed_pack_keeps_state() {
        let identity = Identity::new(1, 2, 500).unwrap();
        let mut state = State::new();
        assert!(matches!(
            state.advance(100, &identity),
            Err(Error::TimestampBeforeEpoch { .. })
        ));
        assert_eq!(state, State::new());
    }

    #[test]
    fn seeded_sequence_must_fit() {
        assert!(State::seeded(0, 4095).is_ok());
        assert!(matches!(
            State::seeded(0, 4096),
            Err(Error::Configuration {
                field: ConfigField::Sequence,
                ..
            })
        ));
    }
}
