use std::collections::HashSet;

use crate::{ConfigField, Error, RandSource, Result, ThreadRandom};

/// The URL-safe alphabet: `A-Z`, `a-z`, `0-9`, `_` and `-`.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Default output length of [`RandomStringGenerator`].
pub const DEFAULT_LENGTH: usize = 21;

const MIN_ALPHABET_LEN: usize = 2;
const MAX_ALPHABET_LEN: usize = 256;

/// Generates fixed-length strings whose characters are drawn uniformly from
/// an alphabet.
///
/// With the default 64-character alphabet and length 21 each string carries
/// 126 bits of randomness.
///
/// # Example
/// ```
/// use idsmith::RandomStringGenerator;
///
/// let generator = RandomStringGenerator::new("0123456789abcdef", 8)?;
/// let s = generator.generate();
/// assert_eq!(s.len(), 8);
/// assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
/// # Ok::<(), idsmith::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct RandomStringGenerator<R = ThreadRandom>
where
    R: RandSource,
{
    alphabet: Vec<char>,
    length: usize,
    rng: R,
}

impl Default for RandomStringGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_LENGTH,
            rng: ThreadRandom,
        }
    }
}

impl RandomStringGenerator {
    /// Creates a generator backed by [`ThreadRandom`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the alphabet does not hold
    /// between 2 and 256 distinct characters, or if `length` is zero.
    pub fn new(alphabet: &str, length: usize) -> Result<Self> {
        Self::with_rng(alphabet, length, ThreadRandom)
    }
}

impl<R> RandomStringGenerator<R>
where
    R: RandSource,
{
    /// Like [`RandomStringGenerator::new`] with a custom random source.
    ///
    /// # Errors
    ///
    /// Same as [`RandomStringGenerator::new`].
    pub fn with_rng(alphabet: &str, length: usize, rng: R) -> Result<Self> {
        let alphabet = validate_alphabet(alphabet)?;
        if length == 0 {
            return Err(Error::configuration(
                ConfigField::Length,
                "must be at least 1",
            ));
        }
        Ok(Self {
            alphabet,
            length,
            rng,
        })
    }

    pub fn alphabet(&self) -> String {
        self.alphabet.iter().collect()
    }

    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns a fresh random string of [`Self::length`] characters.
    pub fn generate(&self) -> String {
        (0..self.length)
            .map(|_| self.alphabet[self.rng.index(self.alphabet.len())])
            .collect()
    }
}

fn validate_alphabet(alphabet: &str) -> Result<Vec<char>> {
    let chars: Vec<char> = alphabet.chars().collect();
    if !(MIN_ALPHABET_LEN..=MAX_ALPHABET_LEN).contains(&chars.len()) {
        return Err(Error::configuration(
            ConfigField::Alphabet,
            format!(
                "has {} characters, expected {MIN_ALPHABET_LEN}..={MAX_ALPHABET_LEN}",
                chars.len()
            ),
        ));
    }

    let mut seen = HashSet::with_capacity(chars.len());
    if let Some(dup) = chars.iter().find(|c| !seen.insert(**c)) {
        return Err(Error::configuration(
            ConfigField::Alphabet,
            format!("character {dup:?} appears more than once"),
        ));
    }
    Ok(chars)
}
