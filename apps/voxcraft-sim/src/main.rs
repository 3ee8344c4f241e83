//! Voxcraft headless simulation
//!
//! Loads a flatland world, spawns the entities listed in the config file and
//! advances physics at a fixed tick rate, logging where everything ends up.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxcraft-sim -- [OPTIONS]
//! ```
//!
//! ## Options
//!
//! - `-c, --config <FILE>`: Config file (default: `voxcraft-sim.json`,
//!   created with defaults if missing)
//! - `-t, --ticks <N>`: Ticks to run, overriding the config
//! - `-h, --help`: Print help message
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod config;
mod simulation;

use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::SimConfig;
use crate::simulation::Simulation;

const DEFAULT_CONFIG: &str = "voxcraft-sim.json";

/// Command line options.
#[derive(Debug)]
struct Args {
    config: PathBuf,
    ticks: Option<u32>,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self {
            config: PathBuf::from(DEFAULT_CONFIG),
            ticks: None,
            help: false,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    let value = args.next().context("--config needs a file path")?;
                    parsed.config = PathBuf::from(value);
                }
                "-t" | "--ticks" => {
                    let value = args.next().context("--ticks needs a number")?;
                    parsed.ticks = Some(
                        value
                            .parse()
                            .with_context(|| format!("invalid tick count {value:?}"))?,
                    );
                }
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument {other:?} (see --help)"),
            }
        }
        Ok(parsed)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SimConfig::load_or_create(&args.config)?;
    let ticks = args.ticks.unwrap_or(config.ticks);
    info!(
        "Running {} ticks at {} ticks/s from {}",
        ticks,
        config.tick_rate,
        args.config.display()
    );

    let mut sim = Simulation::new(&config)?;
    sim.run(ticks)?;
    sim.report();
    Ok(())
}

fn print_help() {
    eprintln!(
        "Voxcraft headless physics simulation

USAGE:
    cargo run -p voxcraft-sim -- [OPTIONS]

OPTIONS:
    -c, --config <FILE>     Config file (default: {DEFAULT_CONFIG})
                            Written with defaults if it does not exist
    -t, --ticks <N>         Ticks to run, overriding the config
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Args> {
        Args::parse(args.iter().map(ToString::to_string))
    }

    #[test]
    fn defaults_without_arguments() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG));
        assert_eq!(args.ticks, None);
        assert!(!args.help);
    }

    #[test]
    fn reads_config_and_ticks() {
        let args = parse(&["--config", "sims/rain.json", "-t", "50"]).unwrap();
        assert_eq!(args.config, PathBuf::from("sims/rain.json"));
        assert_eq!(args.ticks, Some(50));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&["--ticks"]).is_err());
        assert!(parse(&["--ticks", "many"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }
}
