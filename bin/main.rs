//! Command-line Enigma simulator.
//!
//! Reads a machine configuration, then converts a message stream line by
//! line.
//!
//! ## Usage
//!
//! Built with the `cli` feature:
//!
//! ```bash
//! cargo install enigma-rotor --features cli
//!
//! # Messages from stdin, results to stdout
//! enigma configs/default.conf < message.in
//!
//! # Explicit input and output files, with debug logging
//! enigma -vv configs/default.conf message.in message.out
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use enigma::{MachineConfig, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI arguments for the simulator.
#[derive(Debug, Parser)]
#[command(name = "enigma")]
#[command(about = "Encrypt and decrypt messages on a simulated rotor machine")]
struct Cli {
    /// Machine configuration file.
    config: PathBuf,

    /// Message file. Defaults to standard input.
    input: Option<PathBuf>,

    /// Output file. Defaults to standard output.
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = MachineConfig::from_file(&cli.config)
        .with_context(|| format!("could not load {}", cli.config.display()))?;
    info!(
        config = %cli.config.display(),
        slots = config.num_slots(),
        pawls = config.num_pawls(),
        rotors = config.catalog().len(),
        "loaded configuration"
    );

    let mut session = Session::new(config.build_machine()?);

    let input: Box<dyn io::BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn io::Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    session.process(input, output)?;
    Ok(())
}
