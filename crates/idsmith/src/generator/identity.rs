use crate::{ConfigField, DEFAULT_EPOCH, Error, Result, SnowflakeId};

/// Default worker ID used by [`Identity::default`].
pub const DEFAULT_WORKER_ID: u8 = 1;

/// Default process ID used by [`Identity::default`].
pub const DEFAULT_PROCESS_ID: u8 = 1;

/// The immutable identity a distributed generator stamps into every ID.
///
/// Uniqueness across concurrently running generators relies entirely on each
/// one having a distinct `(worker_id, process_id)` pair. Assigning pairs is
/// the deployment's job; nothing detects two generators sharing one.
///
/// # Example
///
/// ```
/// use idsmith::{ConfigField, Error, Identity, DEFAULT_EPOCH};
///
/// let identity = Identity::new(0, 31, DEFAULT_EPOCH)?;
/// assert_eq!(identity.worker_id(), 0);
/// assert_eq!(identity.process_id(), 31);
///
/// let err = Identity::new(32, 0, DEFAULT_EPOCH).unwrap_err();
/// assert!(matches!(err, Error::Configuration { field: ConfigField::WorkerId, .. }));
/// # Ok::<(), idsmith::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    worker_id: u8,
    process_id: u8,
    epoch: u64,
}

impl Default for Identity {
    /// Worker 1, process 1, [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self {
            worker_id: DEFAULT_WORKER_ID,
            process_id: DEFAULT_PROCESS_ID,
            epoch: DEFAULT_EPOCH,
        }
    }
}

impl Identity {
    /// Validates and builds an identity.
    ///
    /// Signed inputs are accepted so that values read from configuration can
    /// be rejected with a precise error instead of wrapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming [`ConfigField::WorkerId`] or
    /// [`ConfigField::ProcessId`] when either is outside `0..=31`.
    pub fn new(worker_id: i64, process_id: i64, epoch: u64) -> Result<Self> {
        let worker_id = validate_field(
            ConfigField::WorkerId,
            worker_id,
            SnowflakeId::max_worker_id(),
        )?;
        let process_id = validate_field(
            ConfigField::ProcessId,
            process_id,
            SnowflakeId::max_process_id(),
        )?;
        Ok(Self {
            worker_id,
            process_id,
            epoch,
        })
    }

    pub const fn worker_id(&self) -> u8 {
        self.worker_id
    }

    pub const fn process_id(&self) -> u8 {
        self.process_id
    }

    /// Milliseconds since the Unix epoch subtracted from every timestamp.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Rejects an epoch later than the clock reading `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] naming [`ConfigField::Epoch`].
    pub fn validate_epoch(&self, now: u64) -> Result<()> {
        if self.epoch > now {
            return Err(Error::configuration(
                ConfigField::Epoch,
                format!("{} is later than the current time {now}", self.epoch),
            ));
        }
        Ok(())
    }

    /// Packs a clock reading and sequence into an ID carrying this identity.
    ///
    /// # Errors
    ///
    /// - [`Error::TimestampBeforeEpoch`] if `now` precedes the epoch
    /// - [`Error::TimestampOverflow`] if `now - epoch` needs more than 41 bits
    pub fn pack(&self, now: u64, sequence: u16) -> Result<SnowflakeId> {
        let offset = now.checked_sub(self.epoch).ok_or(Error::TimestampBeforeEpoch {
            now,
            epoch: self.epoch,
        })?;
        if offset > SnowflakeId::max_timestamp() {
            return Err(Error::TimestampOverflow { offset });
        }
        Ok(SnowflakeId::from_components(
            offset,
            u64::from(self.worker_id),
            u64::from(self.process_id),
            u64::from(sequence),
        ))
    }
}

fn validate_field(field: ConfigField, value: i64, max: u64) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| u64::from(*v) <= max)
        .ok_or_else(|| Error::configuration(field, format!("{value} is outside 0..={max}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(worker_id: i64, process_id: i64) -> Option<ConfigField> {
        match Identity::new(worker_id, process_id, DEFAULT_EPOCH) {
            Ok(_) => None,
            Err(Error::Configuration { field, .. }) => Some(field),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn accepts_boundaries() {
        assert_eq!(rejected_field(0, 0), None);
        assert_eq!(rejected_field(31, 31), None);
        assert_eq!(rejected_field(0, 31), None);
        assert_eq!(rejected_field(31, 0), None);
    }

    #[test]
    fn rejects_worker_id_out_of_range() {
        assert_eq!(rejected_field(32, 0), Some(ConfigField::WorkerId));
        assert_eq!(rejected_field(-1, 0), Some(ConfigField::WorkerId));
        assert_eq!(rejected_field(256, 0), Some(ConfigField::WorkerId));
        assert_eq!(rejected_field(i64::MIN, 0), Some(ConfigField::WorkerId));
    }

    #[test]
    fn rejects_process_id_out_of_range() {
        assert_eq!(rejected_field(0, 32), Some(ConfigField::ProcessId));
        assert_eq!(rejected_field(0, -1), Some(ConfigField::ProcessId));
        assert_eq!(rejected_field(0, i64::MAX), Some(ConfigField::ProcessId));
    }

    #[test]
    fn worker_id_is_checked_first() {
        assert_eq!(rejected_field(-1, 99), Some(ConfigField::WorkerId));
    }

    #[test]
    fn error_message_carries_value_and_range() {
        let err = Identity::new(32, 0, DEFAULT_EPOCH).unwrap_err();
        assert_eq!(err.to_string(), "invalid worker_id: 32 is outside 0..=31");
    }

    #[test]
    fn default_identity() {
        let identity = Identity::default();
        assert_eq!(identity.worker_id(), 1);
        assert_eq!(identity.process_id(), 1);
        assert_eq!(identity.epoch(), DEFAULT_EPOCH);
    }

    #[test]
    fn epoch_may_not_be_in_the_future() {
        let identity = Identity::new(1, 1, 1_000).unwrap();
        assert!(identity.validate_epoch(1_000).is_ok());
        assert!(matches!(
            identity.validate_epoch(999),
            Err(Error::Configuration {
                field: ConfigField::Epoch,
                ..
            })
        ));
    }

    #[test]
    fn pack_guards_timestamp_range() {
        let identity = Identity::new(5, 10, 1_000).unwrap();

        let id = identity.pack(2_000, 3).unwrap();
        assert_eq!(id.timestamp(), 1_000);
        assert_eq!(id.worker_id(), 5);
        assert_eq!(id.process_id(), 10);
        assert_eq!(id.sequence(), 3);

        assert_eq!(
            identity.pack(999, 0),
            Err(Error::TimestampBeforeEpoch {
                now: 999,
                epoch: 1_000
            })
        );

        let too_far = 1_000 + SnowflakeId::max_timestamp() + 1;
        assert_eq!(
            identity.pack(too_far, 0),
            Err(Error::TimestampOverflow {
                offset: SnowflakeId::max_timestamp() + 1
            })
        );
        assert!(identity.pack(too_far - 1, 0).is_ok());
    }
}
