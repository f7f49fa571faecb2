//! Trackline CLI - Headless runner for path-following scenarios

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{inspect, simulate, validate};
use serde::de::{value::Error as ValueError, IntoDeserializer};
use serde::Deserialize;
use winit::keyboard::KeyCode;

#[derive(Parser)]
#[command(name = "trackline")]
#[command(about = "Path-following motion and chase camera for train demos", long_about = None)]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides per target
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headless and print actor and camera poses
    Simulate {
        /// Path to scenario file
        scenario: String,

        /// Number of ticks to run
        #[arg(long, default_value = "300")]
        frames: u64,

        /// Frame time in seconds
        #[arg(long, default_value = "0.016666668")]
        dt: f64,

        /// Press a key before a frame (FRAME:KEY, e.g. 42:Digit1); repeatable
        #[arg(long, value_parser = parse_press)]
        press: Vec<(u64, KeyCode)>,

        /// Hold a camera drag over a frame range (START:END); repeatable
        #[arg(long, value_parser = parse_range)]
        drag: Vec<(u64, u64)>,

        /// Make the actor asset load fail
        #[arg(long)]
        fail_load: bool,

        /// Print a pose line every N frames
        #[arg(long, default_value = "10")]
        every: u64,
    },

    /// Print path lengths, samples and junctions
    Inspect {
        /// Path to scenario file
        scenario: String,

        /// Samples printed per path
        #[arg(long, default_value = "5")]
        samples: usize,
    },

    /// Check a scenario file for errors and suspicious layout
    Validate {
        /// Path to scenario file
        scenario: String,
    },
}

fn parse_press(s: &str) -> Result<(u64, KeyCode), String> {
    let (frame, key) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FRAME:KEY, got '{}'", s))?;
    let frame: u64 = frame
        .trim()
        .parse()
        .map_err(|e| format!("invalid frame: {}", e))?;
    Ok((frame, parse_key(key.trim())?))
}

/// Key codes are named as in scenario files (`Digit1`, `KeyB`, `F1`, ...).
fn parse_key(name: &str) -> Result<KeyCode, String> {
    let de: serde::de::value::StrDeserializer<'_, ValueError> = name.into_deserializer();
    KeyCode::deserialize(de).map_err(|e| format!("unknown key '{}': {}", name, e))
}

fn parse_range(s: &str) -> Result<(u64, u64), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{}'", s))?;
    let start: u64 = start.trim().parse().map_err(|e| format!("invalid start: {}", e))?;
    let end: u64 = end.trim().parse().map_err(|e| format!("invalid end: {}", e))?;
    if end <= start {
        return Err(format!("drag must end after it starts, got {}:{}", start, end));
    }
    Ok((start, end))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            scenario,
            frames,
            dt,
            press,
            drag,
            fail_load,
            every,
        } => simulate::run(simulate::SimulateArgs {
            scenario,
            frames,
            dt,
            press,
            drag,
            fail_load,
            every,
        }),
        Commands::Inspect { scenario, samples } => inspect::run(&scenario, samples),
        Commands::Validate { scenario } => validate::run(&scenario),
    }
}
