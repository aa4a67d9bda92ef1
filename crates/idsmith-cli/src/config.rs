use anyhow::bail;
use clap::{Args, Parser, Subcommand, ValueEnum};
use idsmith::{DEFAULT_EPOCH, IdConfig, Identity, RandomStringGenerator};

/// Command-line interface of the `idsmith` binary.
///
/// Every option can also be set through an `IDSMITH_*` environment variable
/// or a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "idsmith",
    version,
    about = "Generate and decode distributed IDs, UUIDs and random strings"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print freshly generated identifiers, one per line.
    Generate(GenerateArgs),
    /// Print the fields of distributed IDs as JSON lines.
    Decode(DecodeArgs),
}

/// Kind of identifier to generate.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// 64-bit time-ordered IDs
    Distributed,
    /// Version 4 UUIDs
    RandomId,
    /// Random strings over an alphabet
    RandomString,
}

/// Time source for distributed IDs.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Wall clock, read on every call
    System,
    /// Wall clock sampled once, then advanced by a monotonic timer
    Monotonic,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Kind of identifier to generate.
    ///
    /// Environment variable: `IDSMITH_KIND`
    #[arg(long, env = "IDSMITH_KIND", value_enum, default_value_t = IdKind::Distributed)]
    pub kind: IdKind,

    /// Number of identifiers to print.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Worker id stamped into distributed IDs (0..=31).
    ///
    /// Environment variable: `IDSMITH_WORKER_ID`
    #[arg(long, env = "IDSMITH_WORKER_ID", default_value_t = 1, allow_negative_numbers = true)]
    pub worker_id: i64,

    /// Process id stamped into distributed IDs (0..=31).
    ///
    /// Environment variable: `IDSMITH_PROCESS_ID`
    #[arg(long, env = "IDSMITH_PROCESS_ID", default_value_t = 1, allow_negative_numbers = true)]
    pub process_id: i64,

    /// Epoch of distributed IDs, in milliseconds since the Unix epoch.
    ///
    /// Environment variable: `IDSMITH_EPOCH`
    #[arg(long, env = "IDSMITH_EPOCH", default_value_t = DEFAULT_EPOCH)]
    pub epoch: u64,

    /// Alphabet of random strings.
    ///
    /// Environment variable: `IDSMITH_ALPHABET`
    #[arg(long, env = "IDSMITH_ALPHABET", default_value = idsmith::DEFAULT_ALPHABET)]
    pub alphabet: String,

    /// Length of random strings.
    ///
    /// Environment variable: `IDSMITH_LENGTH`
    #[arg(long, env = "IDSMITH_LENGTH", default_value_t = idsmith::DEFAULT_LENGTH)]
    pub length: usize,

    /// Time source for distributed IDs.
    #[arg(long, value_enum, default_value_t = ClockKind::System)]
    pub clock: ClockKind,
}

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Decimal distributed IDs to decode.
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Epoch the IDs were generated with, in milliseconds since the Unix
    /// epoch.
    ///
    /// Environment variable: `IDSMITH_EPOCH`
    #[arg(long, env = "IDSMITH_EPOCH", default_value_t = DEFAULT_EPOCH)]
    pub epoch: u64,
}

/// Validated settings for the `generate` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub id: IdConfig,
    pub count: usize,
    pub clock: ClockKind,
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = anyhow::Error;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("--count must be greater than 0");
        }

        let id = match args.kind {
            IdKind::Distributed => {
                Identity::new(args.worker_id, args.process_id, args.epoch)?;
                IdConfig::Distributed {
                    worker_id: args.worker_id,
                    process_id: args.process_id,
                    epoch: args.epoch,
                }
            }
            IdKind::RandomId => IdConfig::RandomId,
            IdKind::RandomString => {
                RandomStringGenerator::new(&args.alphabet, args.length)?;
                IdConfig::RandomString {
                    alphabet: args.alphabet,
                    length: args.length,
                }
            }
        };

        Ok(Self {
            id,
            count: args.count,
            clock: args.clock,
        })
    }
}
