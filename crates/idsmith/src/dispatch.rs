#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    BasicSnowflakeGenerator, DEFAULT_ALPHABET, DEFAULT_EPOCH, DEFAULT_LENGTH,
    DEFAULT_PROCESS_ID, DEFAULT_WORKER_ID, Identity, RandomIdGenerator, RandomStringGenerator,
    Result, SystemClock, TimeSource,
};

/// Which kind of identifier an [`IdGenerator`] produces, and with what
/// parameters.
///
/// With the `serde` feature the variant is selected by a `type` field:
///
/// ```json
/// { "type": "distributed", "worker_id": 3, "process_id": 7 }
/// { "type": "random_string", "length": 12 }
/// { "type": "random_id" }
/// ```
///
/// Omitted fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum IdConfig {
    /// Version 4 UUIDs.
    RandomId,
    /// Random strings over an alphabet.
    RandomString {
        #[cfg_attr(feature = "serde", serde(default = "default_alphabet"))]
        alphabet: String,
        #[cfg_attr(feature = "serde", serde(default = "default_length"))]
        length: usize,
    },
    /// 64-bit distributed IDs.
    Distributed {
        #[cfg_attr(feature = "serde", serde(default = "default_worker_id"))]
        worker_id: i64,
        #[cfg_attr(feature = "serde", serde(default = "default_process_id"))]
        process_id: i64,
        #[cfg_attr(feature = "serde", serde(default = "default_epoch"))]
        epoch: u64,
    },
}

impl Default for IdConfig {
    /// Distributed IDs for worker 1, process 1 and [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::Distributed {
            worker_id: default_worker_id(),
            process_id: default_process_id(),
            epoch: default_epoch(),
        }
    }
}

impl IdConfig {
    /// Random strings with the default alphabet and length.
    pub fn random_string() -> Self {
        Self::RandomString {
            alphabet: default_alphabet(),
            length: default_length(),
        }
    }
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_owned()
}

const fn default_length() -> usize {
    DEFAULT_LENGTH
}

const fn default_worker_id() -> i64 {
    DEFAULT_WORKER_ID as i64
}

const fn default_process_id() -> i64 {
    DEFAULT_PROCESS_ID as i64
}

const fn default_epoch() -> u64 {
    DEFAULT_EPOCH
}

/// A single entry point over every identifier kind.
///
/// Each call to [`IdGenerator::generate`] returns the identifier as a string:
/// a hyphenated UUID, a random string, or the decimal form of a distributed
/// ID.
///
/// # Example
/// ```
/// use idsmith::{IdConfig, IdGenerator};
///
/// let generator = IdGenerator::new(&IdConfig::default())?;
/// let a: u64 = generator.generate()?.parse().unwrap();
/// let b: u64 = generator.generate()?.parse().unwrap();
/// assert!(a < b);
///
/// let generator = IdGenerator::new(&IdConfig::RandomId)?;
/// assert_eq!(generator.generate()?.len(), 36);
/// # Ok::<(), idsmith::Error>(())
/// ```
pub enum IdGenerator<T = SystemClock>
where
    T: TimeSource,
{
    RandomId(RandomIdGenerator),
    RandomString(RandomStringGenerator),
    Distributed(BasicSnowflakeGenerator<T>),
}

impl IdGenerator {
    /// Builds a generator reading the wall clock.
    ///
    /// # Errors
    ///
    /// Same as [`IdGenerator::from_config`].
    pub fn new(config: &IdConfig) -> Result<Self> {
        Self::from_config(config, SystemClock)
    }
}

impl<T> IdGenerator<T>
where
    T: TimeSource,
{
    /// Validates `config` and builds the matching generator. `time` is only
    /// used by distributed generators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the alphabet, length, worker id,
    /// process id or epoch is invalid.
    ///
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn from_config(config: &IdConfig, time: T) -> Result<Self> {
        Ok(match config {
            IdConfig::RandomId => Self::RandomId(RandomIdGenerator::new()),
            IdConfig::RandomString { alphabet, length } => {
                Self::RandomString(RandomStringGenerator::new(alphabet, *length)?)
            }
            IdConfig::Distributed {
                worker_id,
                process_id,
                epoch,
            } => {
                let identity = Identity::new(*worker_id, *process_id, *epoch)?;
                Self::Distributed(BasicSnowflakeGenerator::new(identity, time)?)
            }
        })
    }

    /// Produces the next identifier.
    ///
    /// # Errors
    ///
    /// Random generators never fail. Distributed generators fail as
    /// [`BasicSnowflakeGenerator::next_id`] does.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<String> {
        match self {
            Self::RandomId(generator) => Ok(generator.generate()),
            Self::RandomString(generator) => Ok(generator.generate()),
            Self::Distributed(generator) => Ok(generator.next_id()?.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigField, Error, SnowflakeId, decode};

    struct FixedTime(u64);

    impl TimeSource for FixedTime {
        fn current_millis(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn default_config_is_distributed_1_1() {
        assert_eq!(
            IdConfig::default(),
            IdConfig::Distributed {
                worker_id: 1,
                process_id: 1,
                epoch: DEFAULT_EPOCH,
            }
        );
    }

    #[test]
    fn distributed_ids_are_increasing_decimals() {
        let generator = IdGenerator::new(&IdConfig::default()).unwrap();
        let ids: Vec<u64> = (0..1_000)
            .map(|_| generator.generate().unwrap().parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn distributed_uses_the_given_clock() {
        let config = IdConfig::Distributed {
            worker_id: 5,
            process_id: 10,
            epoch: 1_000,
        };
        let generator = IdGenerator::from_config(&config, FixedTime(3_000)).unwrap();
        let id = generator.generate().unwrap();
        let decoded = decode(&id, 1_000).unwrap();
        assert_eq!(decoded.timestamp, 3_000);
        assert_eq!(decoded.worker_id, 5);
        assert_eq!(decoded.process_id, 10);
        assert_eq!(decoded.sequence, 0);

        let next: SnowflakeId = generator.generate().unwrap().parse().unwrap();
        assert_eq!(next.sequence(), 1);
    }

    #[test]
    fn random_variants_dispatch() {
        let generator = IdGenerator::new(&IdConfig::RandomId).unwrap();
        assert_eq!(generator.generate().unwrap().len(), 36);

        let generator = IdGenerator::new(&IdConfig::RandomString {
            alphabet: "01".to_owned(),
            length: 16,
        })
        .unwrap();
        let s = generator.generate().unwrap();
        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c == '0' || c == '1'));

        let generator = IdGenerator::new(&IdConfig::random_string()).unwrap();
        assert_eq!(generator.generate().unwrap().len(), DEFAULT_LENGTH);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let cases = [
            (
                IdConfig::Distributed {
                    worker_id: -1,
                    process_id: 0,
                    epoch: 0,
                },
                ConfigField::WorkerId,
            ),
            (
                IdConfig::Distributed {
                    worker_id: 0,
                    process_id: 32,
                    epoch: 0,
                },
                ConfigField::ProcessId,
            ),
            (
                IdConfig::Distributed {
                    worker_id: 0,
                    process_id: 0,
                    epoch: 10_000,
                },
                ConfigField::Epoch,
            ),
            (
                IdConfig::RandomString {
                    alphabet: "aa".to_owned(),
                    length: 4,
                },
                ConfigField::Alphabet,
            ),
            (
                IdConfig::RandomString {
                    alphabet: "ab".to_owned(),
                    length: 0,
                },
                ConfigField::Length,
            ),
        ];

        for (config, expected) in cases {
            match IdGenerator::from_config(&config, FixedTime(5_000)) {
                Err(Error::Configuration { field, .. }) => assert_eq!(field, expected),
                Err(other) => panic!("{config:?}: unexpected error {other:?}"),
                Ok(_) => panic!("{config:?}: accepted"),
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json() {
        let config: IdConfig =
            serde_json::from_str(r#"{"type":"distributed","worker_id":3,"process_id":7}"#)
                .unwrap();
        assert_eq!(
            config,
            IdConfig::Distributed {
                worker_id: 3,
                process_id: 7,
                epoch: DEFAULT_EPOCH,
            }
        );

        let config: IdConfig =
            serde_json::from_str(r#"{"type":"random_string","length":12}"#).unwrap();
        assert_eq!(
            config,
            IdConfig::RandomString {
                alphabet: DEFAULT_ALPHABET.to_owned(),
                length: 12,
            }
        );

        let config: IdConfig = serde_json::from_str(r#"{"type":"random_id"}"#).unwrap();
        assert_eq!(config, IdConfig::RandomId);

        assert!(serde_json::from_str::<IdConfig>(r#"{"type":"sequential"}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_to_json() {
        let json = serde_json::to_value(IdConfig::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "distributed",
                "worker_id": 1,
                "process_id": 1,
                "epoch": DEFAULT_EPOCH,
            })
        );
    }
}
