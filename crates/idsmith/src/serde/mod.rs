use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::SnowflakeId;

/// Serializes as the decimal string, which survives consumers that parse
/// numbers as doubles. Use [`as_native`] for the integer form.
impl Serialize for SnowflakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

/// Accepts either a decimal string or a native integer.
impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(SnowflakeVisitor)
    }
}

struct SnowflakeVisitor;

impl Visitor<'_> for SnowflakeVisitor {
    type Value = SnowflakeId;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a distributed id as a decimal string or unsigned integer")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let id: SnowflakeId = v.parse().map_err(E::custom)?;
        checked(id)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        checked(SnowflakeId::from_raw(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let raw = u64::try_from(v)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))?;
        checked(SnowflakeId::from_raw(raw))
    }
}

fn checked<E>(id: SnowflakeId) -> Result<SnowflakeId, E>
where
    E: de::Error,
{
    if id.is_valid() {
        Ok(id)
    } else {
        Err(E::custom(format_args!(
            "id {} sets the reserved top bit",
            id.to_raw()
        )))
    }
}

/// Serde helpers for a [`SnowflakeId`] stored as its native `u64`.
///
/// ```
/// use idsmith::SnowflakeId;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Event {
///     #[serde(with = "idsmith::as_native")]
///     id: SnowflakeId,
/// }
/// ```
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer, checked};
    use crate::SnowflakeId;

    /// Serialize an ID as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize an ID from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value
    /// sets the reserved top bit.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        checked(SnowflakeId::from_raw(u64::deserialize(d)?))
    }
}
