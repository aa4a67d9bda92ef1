#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use config::{ClockKind, CliArgs, Command, DecodeArgs, GenerateConfig};
use idsmith::{Error, IdGenerator, MonotonicClock, SystemClock, TimeSource, decode};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    init_telemetry()?;

    match args.command {
        Command::Generate(args) => {
            let config = GenerateConfig::try_from(args)?;
            match config.clock {
                ClockKind::System => run_generate(&config, SystemClock),
                ClockKind::Monotonic => run_generate(&config, MonotonicClock::new()),
            }
        }
        Command::Decode(args) => run_decode(&args),
    }
}

fn run_generate<T>(config: &GenerateConfig, time: T) -> anyhow::Result<()>
where
    T: TimeSource,
{
    tracing::debug!(id = ?config.id, count = config.count, clock = ?config.clock, "generating");

    let generator = IdGenerator::from_config(&config.id, time)?;
    let mut out = BufWriter::new(io::stdout().lock());
    for _ in 0..config.count {
        let id = generator.generate().inspect_err(|err| {
            if let Error::ClockRegression { millis } = err {
                tracing::warn!(millis, "clock moved backwards, stopping");
            }
        })?;
        writeln!(out, "{id}")?;
    }
    out.flush()?;
    Ok(())
}

fn run_decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for id in &args.ids {
        let decoded = decode(id, args.epoch)?;
        let mut line = serde_json::to_value(decoded)?;
        line["id"] = id.as_str().into();
        line["date"] = decoded.date().map(|d| d.to_rfc3339()).into();
        serde_json::to_writer(&mut out, &line)
            .with_context(|| format!("failed to write decoded id {id}"))?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
