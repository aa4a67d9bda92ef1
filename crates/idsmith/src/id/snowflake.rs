use crate::{Decoded, Error, Result};
use core::{fmt, str::FromStr};

/// A 64-bit distributed ID.
///
/// - 1 bit reserved (always zero)
/// - 41 bits timestamp (ms since the generator's epoch)
/// - 5 bits worker ID
/// - 5 bits process ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21          17 16           12 11             0
///              +--------------+----------------+--------------+---------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | worker ID (5) | process ID (5)| sequence (12) |
///              +--------------+----------------+--------------+---------------+---------------+
///              |<------------------ MSB ------------- 64 bits ------------ LSB ------------->|
/// ```
///
/// Ordering, hashing and equality follow the raw integer, so IDs from one
/// generator sort in generation order. The textual form ([`fmt::Display`] and
/// [`FromStr`]) is the decimal integer.
///
/// # Example
///
/// ```
/// use idsmith::SnowflakeId;
///
/// let id = SnowflakeId::from_components(1000, 5, 10, 7);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.worker_id(), 5);
/// assert_eq!(id.process_id(), 10);
/// assert_eq!(id.sequence(), 7);
///
/// let parsed: SnowflakeId = id.to_string().parse()?;
/// assert_eq!(parsed, id);
/// # Ok::<(), idsmith::Error>(())
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: u64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 17
    /// through 21.
    pub const WORKER_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit process ID field. Occupies bits 12
    /// through 16.
    pub const PROCESS_ID_MASK: u64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u64 = 22;

    /// Number of bits to shift the worker ID to its correct position (bit 17).
    pub const WORKER_ID_SHIFT: u64 = 17;

    /// Number of bits to shift the process ID to its correct position (bit
    /// 12).
    pub const PROCESS_ID_SHIFT: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Packs the four fields into an ID. Each field is masked to its width.
    pub const fn from_components(
        timestamp: u64,
        worker_id: u64,
        process_id: u64,
        sequence: u64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let process_id = (process_id & Self::PROCESS_ID_MASK) << Self::PROCESS_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | worker_id | process_id | sequence,
        }
    }

    /// Wraps a raw integer without validation.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw integer.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp offset (milliseconds since the epoch).
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the worker ID.
    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the process ID.
    pub const fn process_id(&self) -> u64 {
        (self.id >> Self::PROCESS_ID_SHIFT) & Self::PROCESS_ID_MASK
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    pub const fn max_worker_id() -> u64 {
        Self::WORKER_ID_MASK
    }

    pub const fn max_process_id() -> u64 {
        Self::PROCESS_ID_MASK
    }

    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns `true` if the reserved top bit is clear.
    pub const fn is_valid(&self) -> bool {
        self.id >> 63 == 0
    }

    /// Returns the ID as a zero-padded 20-digit string.
    ///
    /// Padded strings sort lexicographically in the same order as the IDs.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }

    /// Splits the ID into its fields, resolving the timestamp against
    /// `epoch`.
    ///
    /// `epoch` must be the epoch the ID was generated with; any other value
    /// yields a shifted but otherwise consistent timestamp.
    pub const fn decode(&self, epoch: u64) -> Decoded {
        Decoded {
            timestamp: self.timestamp().wrapping_add(epoch),
            worker_id: self.worker_id() as u8,
            process_id: self.process_id() as u8,
            sequence: self.sequence() as u16,
        }
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("worker_id", &self.worker_id())
            .field("process_id", &self.process_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

impl FromStr for SnowflakeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<u64>()
            .map(Self::from_raw)
            .map_err(|_| Error::InvalidId {
                input: s.to_owned(),
            })
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_packed_msb_to_lsb() {
        let id = SnowflakeId::from_components(1, 1, 1, 1);
        assert_eq!(id.to_raw(), (1 << 22) | (1 << 17) | (1 << 12) | 1);
    }

    #[test]
    fn max_fields_leave_top_bit_clear() {
        let id = SnowflakeId::from_components(
            SnowflakeId::max_timestamp(),
            SnowflakeId::max_worker_id(),
            SnowflakeId::max_process_id(),
            SnowflakeId::max_sequence(),
        );
        assert_eq!(id.to_raw(), u64::MAX >> 1);
        assert!(id.is_valid());
        assert!(!SnowflakeId::from_raw(u64::MAX).is_valid());
    }

    #[test]
    fn oversized_components_are_masked() {
        let id = SnowflakeId::from_components(0, 32, 33, 4096);
        assert_eq!(id.worker_id(), 0);
        assert_eq!(id.process_id(), 1);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn ordering_follows_timestamp_then_sequence() {
        let a = SnowflakeId::from_components(10, 31, 31, 4095);
        let b = SnowflakeId::from_components(11, 0, 0, 0);
        let c = SnowflakeId::from_components(11, 0, 0, 1);
        assert!(a < b && b < c);
    }

    #[test]
    fn parses_decimal_and_rejects_garbage() {
        let id = SnowflakeId::from_components(42, 3, 4, 5);
        assert_eq!(id.to_string().parse::<SnowflakeId>(), Ok(id));

        for input in ["", "-1", "12a", "18446744073709551616", " 1"] {
            assert_eq!(
                input.parse::<SnowflakeId>(),
                Err(Error::InvalidId {
                    input: input.to_owned()
                })
            );
        }
    }

    #[test]
    fn padded_string_is_twenty_digits() {
        let id = SnowflakeId::from_raw(42);
        assert_eq!(id.to_padded_string(), "00000000000000000042");
        assert_eq!(
            SnowflakeId::from_raw(u64::MAX).to_padded_string(),
            u64::MAX.to_string()
        );
    }

    #[test]
    fn debug_lists_fields() {
        let id = SnowflakeId::from_components(1, 2, 3, 4);
        let debug = format!("{id:?}");
        assert!(debug.contains("worker_id: 2"));
        assert!(debug.contains("process_id: 3"));
        assert!(debug.contains("sequence: 4"));
    }
}
