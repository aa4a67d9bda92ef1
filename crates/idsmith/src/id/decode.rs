use crate::{Result, SnowflakeId};
use chrono::{DateTime, Utc};

/// The fields of a [`SnowflakeId`], with the timestamp resolved to absolute
/// milliseconds since the Unix epoch.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decoded {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub worker_id: u8,
    pub process_id: u8,
    pub sequence: u16,
}

impl Decoded {
    /// The timestamp as a UTC calendar time, or `None` if it is outside the
    /// range `chrono` can represent.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }
}

/// Decodes a decimal ID string generated with `epoch`.
///
/// Only parseability is checked: values that no generator could have produced
/// (e.g. with the reserved bit set) decode to numerically consistent but
/// meaningless fields.
///
/// # Errors
///
/// Returns [`Error::InvalidId`] if `id` is not a decimal `u64`.
///
/// # Example
///
/// ```
/// use idsmith::{SnowflakeId, decode};
///
/// let epoch = 1_609_459_200_000;
/// let id = SnowflakeId::from_components(1000, 5, 10, 0).to_string();
///
/// let decoded = decode(&id, epoch)?;
/// assert_eq!(decoded.timestamp, epoch + 1000);
/// assert_eq!(decoded.worker_id, 5);
/// assert_eq!(decoded.process_id, 10);
/// assert_eq!(decoded.sequence, 0);
/// # Ok::<(), idsmith::Error>(())
/// ```
///
/// [`Error::InvalidId`]: crate::Error::InvalidId
pub fn decode(id: &str, epoch: u64) -> Result<Decoded> {
    Ok(id.parse::<SnowflakeId>()?.decode(epoch))
}
