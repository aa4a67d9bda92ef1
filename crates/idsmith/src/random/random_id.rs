use uuid::{Builder, Uuid};

use crate::{RandSource, ThreadRandom};

/// Generates RFC 4122 version 4 UUIDs from a [`RandSource`].
///
/// The 16 random bytes are drawn from the source and the version and variant
/// bits are then overwritten, leaving 122 random bits.
///
/// # Example
/// ```
/// use idsmith::RandomIdGenerator;
///
/// let generator = RandomIdGenerator::new();
/// let id = generator.generate();
/// assert_eq!(id.len(), 36);
/// assert_eq!(&id[14..15], "4");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RandomIdGenerator<R = ThreadRandom>
where
    R: RandSource,
{
    rng: R,
}

impl RandomIdGenerator {
    /// Creates a generator backed by [`ThreadRandom`].
    pub const fn new() -> Self {
        Self { rng: ThreadRandom }
    }
}

impl<R> RandomIdGenerator<R>
where
    R: RandSource,
{
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Returns a fresh UUID.
    pub fn generate_uuid(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Returns a fresh UUID in its hyphenated lowercase form.
    pub fn generate(&self) -> String {
        self.generate_uuid().hyphenated().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use uuid::{Variant, Version};

    use super::*;

    struct ZeroRand;

    impl RandSource for ZeroRand {
        fn fill_bytes(&self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn index(&self, _bound: usize) -> usize {
            0
        }
    }

    #[test]
    fn version_and_variant_bits_are_set() {
        let uuid = RandomIdGenerator::new().generate_uuid();
        assert_eq!(uuid.get_version(), Some(Version::Random));
        assert_eq!(uuid.get_variant(), Variant::RFC4122);
    }

    #[test]
    fn version_bits_override_the_source() {
        let id = RandomIdGenerator::with_rng(ZeroRand).generate();
        assert_eq!(id, "00000000-0000-4000-8000-000000000000");
    }

    #[test]
    fn hyphenated_lowercase_form() {
        let id = RandomIdGenerator::new().generate();
        assert_eq!(id.len(), 36);
        for (i, c) in id.chars().enumerate() {
            if matches!(i, 8 | 13 | 18 | 23) {
                assert_eq!(c, '-');
            } else {
                assert!(c.is_ascii_digit() || ('a'..='f').contains(&c), "{id}");
            }
        }
    }

    #[test]
    fn ids_are_unique() {
        let generator = RandomIdGenerator::new();
        let ids: HashSet<_> = (0..10_000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
